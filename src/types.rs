use serde::{Deserialize, Serialize};

use crate::roles::{AdminRole, ClientRole, RoleSet};
use crate::view::HiddenSelectionPolicy;

/// Which console a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    #[default]
    Admin,
    Client,
}

/// The signed-in role, tied to its console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "app", content = "role", rename_all = "lowercase")]
pub enum SessionRole {
    Admin(AdminRole),
    Client(ClientRole),
}

impl SessionRole {
    pub fn app(self) -> AppKind {
        match self {
            SessionRole::Admin(_) => AppKind::Admin,
            SessionRole::Client(_) => AppKind::Client,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionRole::Admin(r) => r.label(),
            SessionRole::Client(r) => r.label(),
        }
    }
}

/// Configuration stored in ~/.crmdesk/config.json
///
/// Every field is optional; an empty object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub app: AppKind,
    /// Role id for `app` (e.g. "support", "sales_rep"). Defaults to the
    /// most privileged role of the console.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub selection_policy: HiddenSelectionPolicy,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

fn default_page_size() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppKind::default(),
            role: None,
            page_size: default_page_size(),
            selection_policy: HiddenSelectionPolicy::default(),
            simulation: SimulationConfig::default(),
            seed_demo_data: true,
        }
    }
}

impl Config {
    /// Resolve `role` against `app`.
    pub fn session_role(&self) -> Result<SessionRole, String> {
        match (self.app, self.role.as_deref()) {
            (AppKind::Admin, None) => Ok(SessionRole::Admin(AdminRole::SuperAdmin)),
            (AppKind::Client, None) => Ok(SessionRole::Client(ClientRole::Owner)),
            (AppKind::Admin, Some(r)) => AdminRole::parse(r)
                .map(SessionRole::Admin)
                .ok_or_else(|| format!("Unknown admin role: {}", r)),
            (AppKind::Client, Some(r)) => ClientRole::parse(r)
                .map(SessionRole::Client)
                .ok_or_else(|| format!("Unknown client role: {}", r)),
        }
    }
}

/// Simulated network behavior of the mock backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    #[serde(default = "default_min_latency")]
    pub min_latency_ms: u64,
    #[serde(default = "default_max_latency")]
    pub max_latency_ms: u64,
    /// Probability in [0, 1] that any single call fails.
    #[serde(default)]
    pub failure_rate: f64,
}

fn default_min_latency() -> u64 {
    150
}

fn default_max_latency() -> u64 {
    600
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_latency_ms: default_min_latency(),
            max_latency_ms: default_max_latency(),
            failure_rate: 0.0,
        }
    }
}
