use serde::{Deserialize, Serialize};

use crate::roles::{AdminRole, ClientRole, RoleSet};
use crate::view::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
    Invited,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Invited => "Invited",
        }
    }
}

/// A platform operator account in the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub status: UserStatus,
    pub company: String,
    pub last_login: Option<String>,
}

impl Record for User {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.id.as_str()),
            "name" => FieldValue::text(self.name.as_str()),
            "email" => FieldValue::text(self.email.as_str()),
            "role" => FieldValue::text(self.role.as_str()),
            "status" => FieldValue::text(self.status.as_str()),
            "company" => FieldValue::text(self.company.as_str()),
            "lastLogin" => FieldValue::opt_text(self.last_login.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    Active,
    #[serde(rename = "On Leave")]
    OnLeave,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberStatus::Active => "Active",
            MemberStatus::OnLeave => "On Leave",
            MemberStatus::Inactive => "Inactive",
        }
    }
}

/// A member of a client tenant's sales team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: ClientRole,
    pub status: MemberStatus,
    pub department: String,
    pub branch_id: Option<String>,
    /// Id of the member this one reports to.
    pub manager_id: Option<String>,
    pub last_login: Option<String>,
}

impl Record for TeamMember {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.id.as_str()),
            "name" => FieldValue::text(self.name.as_str()),
            "email" => FieldValue::text(self.email.as_str()),
            "role" => FieldValue::text(self.role.as_str()),
            "status" => FieldValue::text(self.status.as_str()),
            "department" => FieldValue::text(self.department.as_str()),
            "branchId" => FieldValue::opt_text(self.branch_id.as_deref()),
            "managerId" => FieldValue::opt_text(self.manager_id.as_deref()),
            "lastLogin" => FieldValue::opt_text(self.last_login.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

/// Direct reports of `manager_id`, in input order.
pub fn direct_reports<'a>(members: &'a [TeamMember], manager_id: &str) -> Vec<&'a TeamMember> {
    members
        .iter()
        .filter(|m| m.manager_id.as_deref() == Some(manager_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, manager: Option<&str>) -> TeamMember {
        TeamMember {
            id: id.into(),
            name: id.into(),
            email: format!("{id}@example.com"),
            role: ClientRole::SalesRep,
            status: MemberStatus::Active,
            department: "Sales".into(),
            branch_id: None,
            manager_id: manager.map(String::from),
            last_login: None,
        }
    }

    #[test]
    fn test_role_field_uses_role_id() {
        let m = member("m1", None);
        assert_eq!(m.field("role"), FieldValue::text("sales_rep"));
        assert_eq!(m.field("lastLogin"), FieldValue::Missing);
    }

    #[test]
    fn test_direct_reports() {
        let team = vec![
            member("boss", None),
            member("a", Some("boss")),
            member("b", Some("a")),
        ];
        let reports: Vec<&str> = direct_reports(&team, "boss")
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(reports, vec!["a"]);
    }
}
