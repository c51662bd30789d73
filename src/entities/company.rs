use serde::{Deserialize, Serialize};

use crate::view::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyStatus {
    Active,
    Trial,
    Suspended,
}

impl CompanyStatus {
    pub const ALL: [CompanyStatus; 3] = [
        CompanyStatus::Active,
        CompanyStatus::Trial,
        CompanyStatus::Suspended,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CompanyStatus::Active => "Active",
            CompanyStatus::Trial => "Trial",
            CompanyStatus::Suspended => "Suspended",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// Seat and storage usage of a tenant. Storage and limit are in GB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub users: u32,
    pub storage: f64,
    pub limit: f64,
}

impl Usage {
    /// Share of the storage limit in use, for the usage bar.
    ///
    /// `storage <= limit` is displayed, never enforced; this can exceed 1.0.
    pub fn storage_ratio(&self) -> f64 {
        if self.limit <= 0.0 {
            return 0.0;
        }
        self.storage / self.limit
    }

    pub fn is_over_limit(&self) -> bool {
        self.storage > self.limit
    }
}

/// A tenant of the SaaS platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub contact_email: String,
    pub website: String,
    pub status: CompanyStatus,
    pub plan: String,
    pub location: String,
    /// Headcount bucket such as "51-200".
    pub employees: String,
    pub usage: Usage,
    pub created_at: String,
    pub updated_at: String,
}

impl Record for Company {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.id.as_str()),
            "name" => FieldValue::text(self.name.as_str()),
            "industry" => FieldValue::text(self.industry.as_str()),
            "contactEmail" => FieldValue::text(self.contact_email.as_str()),
            "website" => FieldValue::text(self.website.as_str()),
            "status" => FieldValue::text(self.status.as_str()),
            "plan" => FieldValue::text(self.plan.as_str()),
            "location" => FieldValue::text(self.location.as_str()),
            "employees" => FieldValue::text(self.employees.as_str()),
            "usage.users" => FieldValue::from(self.usage.users),
            "usage.storage" => FieldValue::Number(self.usage.storage),
            "usage.limit" => FieldValue::Number(self.usage.limit),
            "createdAt" => FieldValue::text(self.created_at.as_str()),
            "updatedAt" => FieldValue::text(self.updated_at.as_str()),
            _ => FieldValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_over_limit_is_reported_not_clamped() {
        let usage = Usage {
            users: 12,
            storage: 120.0,
            limit: 100.0,
        };
        assert!(usage.is_over_limit());
        assert!((usage.storage_ratio() - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_serde_matches_label() {
        for status in CompanyStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
            assert_eq!(CompanyStatus::parse(status.as_str()), Some(status));
        }
    }
}
