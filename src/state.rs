use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::{MockBackend, Simulation};
use crate::store::MockStore;
use crate::types::{Config, SessionRole};

/// Everything a console session owns: its config, role and backend.
pub struct AppState {
    pub config: Config,
    pub role: SessionRole,
    pub backend: MockBackend,
}

impl AppState {
    /// Load ~/.crmdesk/config.json and build the session from it.
    pub fn new() -> Result<Self, String> {
        let config = load_config()?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, String> {
        let role = config.session_role()?;
        let store = if config.seed_demo_data {
            MockStore::seeded()
        } else {
            MockStore::empty()
        };
        let backend = MockBackend::new(store, Simulation::from_config(&config.simulation));
        log::info!(
            "Session ready: {:?} console as {}",
            role.app(),
            role.label()
        );
        Ok(Self {
            config,
            role,
            backend,
        })
    }
}

/// Get the canonical config file path (~/.crmdesk/config.json)
pub fn config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("Could not find home directory")?;
    Ok(home.join(".crmdesk").join("config.json"))
}

/// Load configuration from ~/.crmdesk/config.json
pub fn load_config() -> Result<Config, String> {
    load_config_from(&config_path()?)
}

/// Load configuration from `path`. A missing file yields the defaults; a file
/// that exists but does not parse is an error.
pub fn load_config_from(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read config: {}", e))?;

    let config: Config =
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))?;

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), String> {
    if config.page_size == 0 {
        return Err("pageSize must be at least 1".to_string());
    }
    let sim = &config.simulation;
    if sim.min_latency_ms > sim.max_latency_ms {
        return Err(format!(
            "simulation.minLatencyMs ({}) exceeds maxLatencyMs ({})",
            sim.min_latency_ms, sim.max_latency_ms
        ));
    }
    if !(0.0..=1.0).contains(&sim.failure_rate) {
        return Err(format!(
            "simulation.failureRate must be between 0 and 1, got {}",
            sim.failure_rate
        ));
    }
    config.session_role()?;
    Ok(())
}
