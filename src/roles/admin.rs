//! Admin console roles, navigation and row actions.

use serde::{Deserialize, Serialize};

use super::{Gated, RoleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Support,
    Billing,
    Analyst,
}

impl RoleSet for AdminRole {
    const ALL: &'static [Self] = &[
        AdminRole::SuperAdmin,
        AdminRole::Support,
        AdminRole::Billing,
        AdminRole::Analyst,
    ];

    fn as_str(self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::Support => "support",
            AdminRole::Billing => "billing",
            AdminRole::Analyst => "analyst",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "Super Admin",
            AdminRole::Support => "Support Agent",
            AdminRole::Billing => "Billing Manager",
            AdminRole::Analyst => "Analyst",
        }
    }
}

use AdminRole::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminNav {
    Dashboard,
    Companies,
    Billing,
    Support,
    Users,
    ApiTokens,
    Settings,
}

impl AdminNav {
    pub fn label(self) -> &'static str {
        match self {
            AdminNav::Dashboard => "Dashboard",
            AdminNav::Companies => "Companies",
            AdminNav::Billing => "Billing",
            AdminNav::Support => "Support",
            AdminNav::Users => "Users",
            AdminNav::ApiTokens => "API Tokens",
            AdminNav::Settings => "Settings",
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            AdminNav::Dashboard => "/dashboard",
            AdminNav::Companies => "/companies",
            AdminNav::Billing => "/billing",
            AdminNav::Support => "/support",
            AdminNav::Users => "/users",
            AdminNav::ApiTokens => "/api-tokens",
            AdminNav::Settings => "/settings",
        }
    }
}

impl Gated for AdminNav {
    type Role = AdminRole;

    const ALL: &'static [Self] = &[
        AdminNav::Dashboard,
        AdminNav::Companies,
        AdminNav::Billing,
        AdminNav::Support,
        AdminNav::Users,
        AdminNav::ApiTokens,
        AdminNav::Settings,
    ];

    fn allowed_roles(self) -> &'static [AdminRole] {
        match self {
            AdminNav::Dashboard => &[SuperAdmin, Support, Billing, Analyst],
            AdminNav::Companies => &[SuperAdmin, Support, Billing, Analyst],
            AdminNav::Billing => &[SuperAdmin, Billing, Analyst],
            AdminNav::Support => &[SuperAdmin, Support],
            AdminNav::Users | AdminNav::ApiTokens | AdminNav::Settings => &[SuperAdmin],
        }
    }
}

/// In-row and toolbar actions of the admin screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    CreateCompany,
    EditCompany,
    SuspendCompany,
    DeleteCompany,
    RefundTransaction,
    ExportTransactions,
    AssignTicket,
    CloseTicket,
    InviteUser,
    DeactivateUser,
    CreateApiToken,
    RevokeApiToken,
}

impl Gated for AdminAction {
    type Role = AdminRole;

    const ALL: &'static [Self] = &[
        AdminAction::CreateCompany,
        AdminAction::EditCompany,
        AdminAction::SuspendCompany,
        AdminAction::DeleteCompany,
        AdminAction::RefundTransaction,
        AdminAction::ExportTransactions,
        AdminAction::AssignTicket,
        AdminAction::CloseTicket,
        AdminAction::InviteUser,
        AdminAction::DeactivateUser,
        AdminAction::CreateApiToken,
        AdminAction::RevokeApiToken,
    ];

    fn allowed_roles(self) -> &'static [AdminRole] {
        match self {
            AdminAction::CreateCompany
            | AdminAction::SuspendCompany
            | AdminAction::DeleteCompany
            | AdminAction::InviteUser
            | AdminAction::DeactivateUser
            | AdminAction::CreateApiToken
            | AdminAction::RevokeApiToken => &[SuperAdmin],
            AdminAction::EditCompany => &[SuperAdmin, Support],
            AdminAction::RefundTransaction => &[SuperAdmin, Billing],
            AdminAction::ExportTransactions => &[SuperAdmin, Billing, Analyst],
            AdminAction::AssignTicket | AdminAction::CloseTicket => &[SuperAdmin, Support],
        }
    }
}
