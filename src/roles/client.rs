//! Client CRM roles, navigation and the permission catalog shown on the
//! roles settings page.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Gated, RoleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientRole {
    Owner,
    Admin,
    Manager,
    SalesRep,
    Viewer,
}

impl RoleSet for ClientRole {
    const ALL: &'static [Self] = &[
        ClientRole::Owner,
        ClientRole::Admin,
        ClientRole::Manager,
        ClientRole::SalesRep,
        ClientRole::Viewer,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ClientRole::Owner => "owner",
            ClientRole::Admin => "admin",
            ClientRole::Manager => "manager",
            ClientRole::SalesRep => "sales_rep",
            ClientRole::Viewer => "viewer",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ClientRole::Owner => "Owner",
            ClientRole::Admin => "Administrator",
            ClientRole::Manager => "Branch Manager",
            ClientRole::SalesRep => "Sales Representative",
            ClientRole::Viewer => "Viewer",
        }
    }
}

use ClientRole::{Admin, Manager, Owner, SalesRep, Viewer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientNav {
    Dashboard,
    Leads,
    Sales,
    Products,
    Branches,
    Team,
    Billing,
    Reports,
    Settings,
}

impl ClientNav {
    pub fn label(self) -> &'static str {
        match self {
            ClientNav::Dashboard => "Dashboard",
            ClientNav::Leads => "Leads",
            ClientNav::Sales => "Sales",
            ClientNav::Products => "Products",
            ClientNav::Branches => "Branches",
            ClientNav::Team => "Team",
            ClientNav::Billing => "Billing",
            ClientNav::Reports => "Reports",
            ClientNav::Settings => "Settings",
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            ClientNav::Dashboard => "/dashboard",
            ClientNav::Leads => "/leads",
            ClientNav::Sales => "/sales",
            ClientNav::Products => "/products",
            ClientNav::Branches => "/branches",
            ClientNav::Team => "/team",
            ClientNav::Billing => "/billing",
            ClientNav::Reports => "/reports",
            ClientNav::Settings => "/settings",
        }
    }

    /// The `*.view` permission behind a module page. Dashboard and Settings
    /// are not modules.
    pub fn view_permission(self) -> Option<ClientPermission> {
        match self {
            ClientNav::Dashboard | ClientNav::Settings => None,
            ClientNav::Leads => Some(ClientPermission::LeadsView),
            ClientNav::Sales => Some(ClientPermission::SalesView),
            ClientNav::Products => Some(ClientPermission::ProductsView),
            ClientNav::Branches => Some(ClientPermission::BranchesView),
            ClientNav::Team => Some(ClientPermission::TeamView),
            ClientNav::Billing => Some(ClientPermission::BillingView),
            ClientNav::Reports => Some(ClientPermission::ReportsView),
        }
    }
}

impl Gated for ClientNav {
    type Role = ClientRole;

    const ALL: &'static [Self] = &[
        ClientNav::Dashboard,
        ClientNav::Leads,
        ClientNav::Sales,
        ClientNav::Products,
        ClientNav::Branches,
        ClientNav::Team,
        ClientNav::Billing,
        ClientNav::Reports,
        ClientNav::Settings,
    ];

    fn allowed_roles(self) -> &'static [ClientRole] {
        match self.view_permission() {
            Some(perm) => perm.allowed_roles(),
            None if self == ClientNav::Settings => &[Owner, Admin],
            None => ClientRole::ALL,
        }
    }
}

/// A permission id from the catalog, e.g. `leads.edit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClientPermission {
    #[serde(rename = "leads.view")]
    LeadsView,
    #[serde(rename = "leads.create")]
    LeadsCreate,
    #[serde(rename = "leads.edit")]
    LeadsEdit,
    #[serde(rename = "leads.delete")]
    LeadsDelete,
    #[serde(rename = "leads.assign")]
    LeadsAssign,
    #[serde(rename = "sales.view")]
    SalesView,
    #[serde(rename = "sales.edit")]
    SalesEdit,
    #[serde(rename = "sales.close")]
    SalesClose,
    #[serde(rename = "products.view")]
    ProductsView,
    #[serde(rename = "products.manage")]
    ProductsManage,
    #[serde(rename = "branches.view")]
    BranchesView,
    #[serde(rename = "branches.manage")]
    BranchesManage,
    #[serde(rename = "team.view")]
    TeamView,
    #[serde(rename = "team.invite")]
    TeamInvite,
    #[serde(rename = "team.roles")]
    TeamRoles,
    #[serde(rename = "billing.view")]
    BillingView,
    #[serde(rename = "billing.manage")]
    BillingManage,
    #[serde(rename = "reports.view")]
    ReportsView,
    #[serde(rename = "reports.build")]
    ReportsBuild,
}

impl ClientPermission {
    pub fn id(self) -> &'static str {
        match self {
            ClientPermission::LeadsView => "leads.view",
            ClientPermission::LeadsCreate => "leads.create",
            ClientPermission::LeadsEdit => "leads.edit",
            ClientPermission::LeadsDelete => "leads.delete",
            ClientPermission::LeadsAssign => "leads.assign",
            ClientPermission::SalesView => "sales.view",
            ClientPermission::SalesEdit => "sales.edit",
            ClientPermission::SalesClose => "sales.close",
            ClientPermission::ProductsView => "products.view",
            ClientPermission::ProductsManage => "products.manage",
            ClientPermission::BranchesView => "branches.view",
            ClientPermission::BranchesManage => "branches.manage",
            ClientPermission::TeamView => "team.view",
            ClientPermission::TeamInvite => "team.invite",
            ClientPermission::TeamRoles => "team.roles",
            ClientPermission::BillingView => "billing.view",
            ClientPermission::BillingManage => "billing.manage",
            ClientPermission::ReportsView => "reports.view",
            ClientPermission::ReportsBuild => "reports.build",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClientPermission::LeadsView => "View leads",
            ClientPermission::LeadsCreate => "Create leads",
            ClientPermission::LeadsEdit => "Edit leads",
            ClientPermission::LeadsDelete => "Delete leads",
            ClientPermission::LeadsAssign => "Assign leads",
            ClientPermission::SalesView => "View deals",
            ClientPermission::SalesEdit => "Edit deals",
            ClientPermission::SalesClose => "Close deals",
            ClientPermission::ProductsView => "View products",
            ClientPermission::ProductsManage => "Manage products",
            ClientPermission::BranchesView => "View branches",
            ClientPermission::BranchesManage => "Manage branches",
            ClientPermission::TeamView => "View team",
            ClientPermission::TeamInvite => "Invite members",
            ClientPermission::TeamRoles => "Change roles",
            ClientPermission::BillingView => "View billing",
            ClientPermission::BillingManage => "Manage subscription",
            ClientPermission::ReportsView => "View reports",
            ClientPermission::ReportsBuild => "Build reports",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ClientPermission::LeadsView => "See the lead list and pipeline board.",
            ClientPermission::LeadsCreate => "Add new leads manually or by import.",
            ClientPermission::LeadsEdit => "Change lead details and move them between stages.",
            ClientPermission::LeadsDelete => "Remove leads, including bulk delete.",
            ClientPermission::LeadsAssign => "Change the owner of a lead.",
            ClientPermission::SalesView => "See deals and the sales board.",
            ClientPermission::SalesEdit => "Change deal amount, probability and stage.",
            ClientPermission::SalesClose => "Mark deals as won or lost.",
            ClientPermission::ProductsView => "See the product catalog.",
            ClientPermission::ProductsManage => "Add, edit and archive products.",
            ClientPermission::BranchesView => "See branches and their managers.",
            ClientPermission::BranchesManage => "Add and edit branches.",
            ClientPermission::TeamView => "See team members.",
            ClientPermission::TeamInvite => "Invite new team members.",
            ClientPermission::TeamRoles => "Change a member's role or deactivate them.",
            ClientPermission::BillingView => "See invoices and the current plan.",
            ClientPermission::BillingManage => "Change plan and payment method.",
            ClientPermission::ReportsView => "Open saved reports.",
            ClientPermission::ReportsBuild => "Create reports with the report builder.",
        }
    }

    /// The group this permission is listed under.
    pub fn group(self) -> &'static PermissionGroup {
        PERMISSION_GROUPS
            .iter()
            .find(|g| g.permissions.contains(&self))
            .unwrap_or(&PERMISSION_GROUPS[0])
    }
}

impl Gated for ClientPermission {
    type Role = ClientRole;

    const ALL: &'static [Self] = &[
        ClientPermission::LeadsView,
        ClientPermission::LeadsCreate,
        ClientPermission::LeadsEdit,
        ClientPermission::LeadsDelete,
        ClientPermission::LeadsAssign,
        ClientPermission::SalesView,
        ClientPermission::SalesEdit,
        ClientPermission::SalesClose,
        ClientPermission::ProductsView,
        ClientPermission::ProductsManage,
        ClientPermission::BranchesView,
        ClientPermission::BranchesManage,
        ClientPermission::TeamView,
        ClientPermission::TeamInvite,
        ClientPermission::TeamRoles,
        ClientPermission::BillingView,
        ClientPermission::BillingManage,
        ClientPermission::ReportsView,
        ClientPermission::ReportsBuild,
    ];

    fn allowed_roles(self) -> &'static [ClientRole] {
        match self {
            ClientPermission::LeadsView
            | ClientPermission::LeadsCreate
            | ClientPermission::LeadsEdit => &[Owner, Admin, Manager, SalesRep],
            ClientPermission::LeadsDelete | ClientPermission::LeadsAssign => {
                &[Owner, Admin, Manager]
            }
            ClientPermission::SalesView => &[Owner, Admin, Manager, SalesRep, Viewer],
            ClientPermission::SalesEdit => &[Owner, Admin, Manager, SalesRep],
            ClientPermission::SalesClose => &[Owner, Admin, Manager],
            ClientPermission::ProductsView => &[Owner, Admin, Manager, SalesRep, Viewer],
            ClientPermission::ProductsManage => &[Owner, Admin],
            ClientPermission::BranchesView => &[Owner, Admin, Manager],
            ClientPermission::BranchesManage => &[Owner, Admin],
            ClientPermission::TeamView => &[Owner, Admin, Manager],
            ClientPermission::TeamInvite => &[Owner, Admin],
            ClientPermission::TeamRoles => &[Owner],
            ClientPermission::BillingView | ClientPermission::BillingManage => &[Owner],
            ClientPermission::ReportsView => &[Owner, Admin, Manager, Viewer],
            ClientPermission::ReportsBuild => &[Owner, Admin, Manager],
        }
    }
}

/// A titled group of permissions on the roles settings page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub permissions: &'static [ClientPermission],
}

pub static PERMISSION_GROUPS: &[PermissionGroup] = &[
    PermissionGroup {
        id: "leads",
        label: "Leads",
        description: "Lead capture and qualification.",
        permissions: &[
            ClientPermission::LeadsView,
            ClientPermission::LeadsCreate,
            ClientPermission::LeadsEdit,
            ClientPermission::LeadsDelete,
            ClientPermission::LeadsAssign,
        ],
    },
    PermissionGroup {
        id: "sales",
        label: "Sales",
        description: "Deals and the sales pipeline.",
        permissions: &[
            ClientPermission::SalesView,
            ClientPermission::SalesEdit,
            ClientPermission::SalesClose,
        ],
    },
    PermissionGroup {
        id: "products",
        label: "Products",
        description: "Product catalog.",
        permissions: &[ClientPermission::ProductsView, ClientPermission::ProductsManage],
    },
    PermissionGroup {
        id: "branches",
        label: "Branches",
        description: "Branch offices.",
        permissions: &[ClientPermission::BranchesView, ClientPermission::BranchesManage],
    },
    PermissionGroup {
        id: "team",
        label: "Team",
        description: "Members and roles.",
        permissions: &[
            ClientPermission::TeamView,
            ClientPermission::TeamInvite,
            ClientPermission::TeamRoles,
        ],
    },
    PermissionGroup {
        id: "billing",
        label: "Billing",
        description: "Subscription and invoices.",
        permissions: &[ClientPermission::BillingView, ClientPermission::BillingManage],
    },
    PermissionGroup {
        id: "reports",
        label: "Reports",
        description: "Saved and custom reports.",
        permissions: &[ClientPermission::ReportsView, ClientPermission::ReportsBuild],
    },
];

impl ClientRole {
    /// Permission ids granted to this role.
    pub fn permission_ids(self) -> BTreeSet<&'static str> {
        ClientPermission::ALL
            .iter()
            .filter(|p| p.allowed_roles().contains(&self))
            .map(|p| p.id())
            .collect()
    }

    /// Permissions of one group granted to this role; may be empty.
    pub fn permissions_in(self, group_id: &str) -> Vec<ClientPermission> {
        PERMISSION_GROUPS
            .iter()
            .filter(|g| g.id == group_id)
            .flat_map(|g| g.permissions.iter().copied())
            .filter(|p| p.allowed_roles().contains(&self))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{can_perform, visible_nav_items};

    #[test]
    fn test_every_permission_belongs_to_exactly_one_group() {
        for perm in ClientPermission::ALL {
            let count = PERMISSION_GROUPS
                .iter()
                .filter(|g| g.permissions.contains(perm))
                .count();
            assert_eq!(count, 1, "{:?}", perm);
            assert!(perm.id().starts_with(perm.group().id));
        }
    }

    #[test]
    fn test_permission_serde_uses_ids() {
        for perm in ClientPermission::ALL {
            let json = serde_json::to_value(perm).unwrap();
            assert_eq!(json, perm.id());
        }
    }

    #[test]
    fn test_viewer_has_empty_billing_module() {
        assert!(ClientRole::Viewer.permissions_in("billing").is_empty());
        assert!(!visible_nav_items::<ClientNav>(ClientRole::Viewer).contains(&ClientNav::Billing));
        assert!(!can_perform(ClientRole::Viewer, ClientPermission::BillingView));
    }

    #[test]
    fn test_sales_rep_nav() {
        assert_eq!(
            visible_nav_items::<ClientNav>(ClientRole::SalesRep),
            vec![ClientNav::Dashboard, ClientNav::Leads, ClientNav::Sales, ClientNav::Products]
        );
    }

    #[test]
    fn test_module_nav_matches_view_permission() {
        for &role in ClientRole::ALL {
            let nav = visible_nav_items::<ClientNav>(role);
            for &item in ClientNav::ALL {
                if let Some(perm) = item.view_permission() {
                    assert_eq!(
                        nav.contains(&item),
                        can_perform(role, perm),
                        "{:?} {:?}",
                        role,
                        item
                    );
                }
            }
        }
    }

    #[test]
    fn test_owner_has_every_permission() {
        assert_eq!(
            ClientRole::Owner.permission_ids().len(),
            ClientPermission::ALL.len()
        );
        assert!(ClientRole::Manager.permission_ids().contains("reports.build"));
        assert!(!ClientRole::Manager.permission_ids().contains("team.roles"));
    }
}
