use serde::{Deserialize, Serialize};

use crate::board::Staged;
use crate::view::{FieldValue, Record};

/// Lead pipeline stage. Ordered for display only: any stage may be set from
/// any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Proposal,
    Won,
    Lost,
}

impl LeadStatus {
    pub const PIPELINE: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Proposal,
        LeadStatus::Won,
        LeadStatus::Lost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Proposal => "Proposal",
            LeadStatus::Won => "Won",
            LeadStatus::Lost => "Lost",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::PIPELINE.into_iter().find(|s| s.as_str() == value)
    }

    pub fn is_closed(self) -> bool {
        matches!(self, LeadStatus::Won | LeadStatus::Lost)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub status: LeadStatus,
    pub owner: String,
    /// 0..=100
    pub score: u8,
    pub source: String,
    pub created_at: String,
}

impl Record for Lead {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.id.as_str()),
            "name" => FieldValue::text(self.name.as_str()),
            "company" => FieldValue::text(self.company.as_str()),
            "email" => FieldValue::text(self.email.as_str()),
            "status" => FieldValue::text(self.status.as_str()),
            "owner" => FieldValue::text(self.owner.as_str()),
            "score" => FieldValue::Number(self.score as f64),
            "source" => FieldValue::text(self.source.as_str()),
            "createdAt" => FieldValue::text(self.created_at.as_str()),
            _ => FieldValue::Missing,
        }
    }
}

impl Staged for Lead {
    type Stage = LeadStatus;

    const PIPELINE: &'static [LeadStatus] = &LeadStatus::PIPELINE;

    fn stage(&self) -> LeadStatus {
        self.status
    }

    fn set_stage(&mut self, stage: LeadStatus) {
        self.status = stage;
    }
}
