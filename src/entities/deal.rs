use serde::{Deserialize, Serialize};

use crate::board::Staged;
use crate::view::{FieldValue, Record};

/// Deal stage on the sales board. Unconstrained like the lead pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealStatus {
    Quotation,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl DealStatus {
    pub const PIPELINE: [DealStatus; 5] = [
        DealStatus::Quotation,
        DealStatus::Proposal,
        DealStatus::Negotiation,
        DealStatus::Won,
        DealStatus::Lost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DealStatus::Quotation => "Quotation",
            DealStatus::Proposal => "Proposal",
            DealStatus::Negotiation => "Negotiation",
            DealStatus::Won => "Won",
            DealStatus::Lost => "Lost",
        }
    }

    pub fn is_open(self) -> bool {
        !matches!(self, DealStatus::Won | DealStatus::Lost)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub name: String,
    pub client: String,
    pub amount: f64,
    pub status: DealStatus,
    pub rep: String,
    /// Win probability in percent, 0..=100.
    pub probability: u8,
    pub close_date: String,
}

impl Deal {
    /// Amount weighted by win probability, for the forecast column.
    pub fn weighted_amount(&self) -> f64 {
        self.amount * f64::from(self.probability) / 100.0
    }
}

impl Record for Deal {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.id.as_str()),
            "name" => FieldValue::text(self.name.as_str()),
            "client" => FieldValue::text(self.client.as_str()),
            "amount" => FieldValue::Number(self.amount),
            "status" => FieldValue::text(self.status.as_str()),
            "rep" => FieldValue::text(self.rep.as_str()),
            "probability" => FieldValue::Number(f64::from(self.probability)),
            "closeDate" => FieldValue::text(self.close_date.as_str()),
            _ => FieldValue::Missing,
        }
    }
}

impl Staged for Deal {
    type Stage = DealStatus;

    const PIPELINE: &'static [DealStatus] = &DealStatus::PIPELINE;

    fn stage(&self) -> DealStatus {
        self.status
    }

    fn set_stage(&mut self, stage: DealStatus) {
        self.status = stage;
    }
}
