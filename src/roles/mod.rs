//! Role gate: which navigation items and in-row actions a role gets to see.
//!
//! This is presentation gating only. Nothing here authorizes anything; there is
//! no server-side enforcement behind it and a "permission denied" screen built
//! on it is advisory.
//!
//! Roles, nav items and actions are closed enums; each item's allowed-role set
//! is an exhaustive `match`, so adding a variant fails to compile until it is
//! placed.

pub mod admin;
pub mod client;

use std::fmt::Debug;
use std::hash::Hash;

pub use admin::{AdminAction, AdminNav, AdminRole};
pub use client::{ClientNav, ClientPermission, ClientRole, PermissionGroup};

/// A closed set of roles.
pub trait RoleSet: Copy + Eq + Hash + Debug + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn label(self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_str() == value)
    }
}

/// Something rendered only for a fixed set of roles (nav item, row action).
pub trait Gated: Copy + Eq + Debug + 'static {
    type Role: RoleSet;

    /// Every item, in display order.
    const ALL: &'static [Self];

    fn allowed_roles(self) -> &'static [Self::Role];
}

/// Nav items visible to `role`, in declaration order.
pub fn visible_nav_items<N: Gated>(role: N::Role) -> Vec<N> {
    N::ALL
        .iter()
        .copied()
        .filter(|item| item.allowed_roles().contains(&role))
        .collect()
}

/// Whether `role` may see the control for `action`.
pub fn can_perform<A: Gated>(role: A::Role, action: A) -> bool {
    action.allowed_roles().contains(&role)
}

/// Every action of type `A` visible to `role`.
pub fn allowed_actions<A: Gated>(role: A::Role) -> Vec<A> {
    visible_nav_items::<A>(role)
}
