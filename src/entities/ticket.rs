use serde::{Deserialize, Serialize};

use crate::view::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketPriority {
    High,
    Medium,
    Low,
}

impl TicketPriority {
    pub const ALL: [TicketPriority; 3] = [
        TicketPriority::High,
        TicketPriority::Medium,
        TicketPriority::Low,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketPriority::High => "High",
            TicketPriority::Medium => "Medium",
            TicketPriority::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
        }
    }

    /// Open and in-progress tickets still need an agent.
    pub fn is_active(self) -> bool {
        matches!(self, TicketStatus::Open | TicketStatus::InProgress)
    }
}

/// A support ticket raised by a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub company: String,
    pub company_id: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created_at: String,
    pub assigned_agent: Option<String>,
}

impl Record for Ticket {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.id.as_str()),
            "subject" => FieldValue::text(self.subject.as_str()),
            "company" => FieldValue::text(self.company.as_str()),
            "companyId" => FieldValue::text(self.company_id.as_str()),
            "priority" => FieldValue::text(self.priority.as_str()),
            "status" => FieldValue::text(self.status.as_str()),
            "createdAt" => FieldValue::text(self.created_at.as_str()),
            "assignedAgent" => FieldValue::opt_text(self.assigned_agent.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_label_round_trips() {
        let json = serde_json::to_string(&TicketStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: TicketStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TicketStatus::InProgress);
        assert_eq!(back.as_str(), "In Progress");
    }
}
