//! Catalog products and branch offices of a client tenant.

use serde::{Deserialize, Serialize};

use crate::view::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    Active,
    Draft,
    Archived,
}

impl ProductStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Active => "Active",
            ProductStatus::Draft => "Draft",
            ProductStatus::Archived => "Archived",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    pub status: ProductStatus,
    pub updated_at: String,
}

impl Record for Product {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.id.as_str()),
            "name" => FieldValue::text(self.name.as_str()),
            "sku" => FieldValue::text(self.sku.as_str()),
            "category" => FieldValue::text(self.category.as_str()),
            "price" => FieldValue::Number(self.price),
            "stock" => FieldValue::from(self.stock),
            "status" => FieldValue::text(self.status.as_str()),
            "updatedAt" => FieldValue::text(self.updated_at.as_str()),
            _ => FieldValue::Missing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchStatus {
    Active,
    Inactive,
}

impl BranchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BranchStatus::Active => "Active",
            BranchStatus::Inactive => "Inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub city: String,
    pub manager: String,
    pub members: u32,
    pub status: BranchStatus,
    pub opened_at: String,
}

impl Record for Branch {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.id.as_str()),
            "name" => FieldValue::text(self.name.as_str()),
            "city" => FieldValue::text(self.city.as_str()),
            "manager" => FieldValue::text(self.manager.as_str()),
            "members" => FieldValue::from(self.members),
            "status" => FieldValue::text(self.status.as_str()),
            "openedAt" => FieldValue::text(self.opened_at.as_str()),
            _ => FieldValue::Missing,
        }
    }
}
