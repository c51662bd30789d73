use serde::{Deserialize, Serialize};

use crate::view::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStatus {
    Active,
    Revoked,
}

impl TokenStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenStatus::Active => "Active",
            TokenStatus::Revoked => "Revoked",
        }
    }
}

/// An API token as listed on the tokens screen.
///
/// The secret itself is never stored: only its display prefix and SHA-256 hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiToken {
    pub id: String,
    pub name: String,
    pub prefix: String,
    #[serde(skip_serializing, default)]
    pub secret_hash: String,
    pub scopes: Vec<String>,
    pub status: TokenStatus,
    pub created_at: String,
    pub last_used: Option<String>,
    pub expires_at: Option<String>,
}

impl Record for ApiToken {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.id.as_str()),
            "name" => FieldValue::text(self.name.as_str()),
            "prefix" => FieldValue::text(self.prefix.as_str()),
            "scopes" => FieldValue::text(self.scopes.join(", ")),
            "status" => FieldValue::text(self.status.as_str()),
            "createdAt" => FieldValue::text(self.created_at.as_str()),
            "lastUsed" => FieldValue::opt_text(self.last_used.as_deref()),
            "expiresAt" => FieldValue::opt_text(self.expires_at.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}
