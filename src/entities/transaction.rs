use serde::{Deserialize, Serialize};

use crate::view::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Paid,
    Pending,
    Failed,
    Refunded,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 4] = [
        TransactionStatus::Paid,
        TransactionStatus::Pending,
        TransactionStatus::Failed,
        TransactionStatus::Refunded,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Paid => "Paid",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Refunded => "Refunded",
        }
    }
}

/// A billing transaction, keyed by invoice number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub invoice: String,
    pub company: String,
    pub company_id: String,
    /// Non-negative, in the account currency.
    pub amount: f64,
    pub status: TransactionStatus,
    pub date: String,
    pub next_billing_date: String,
    pub payment_method: String,
    pub plan: String,
}

impl Transaction {
    /// Only settled payments can be refunded.
    pub fn is_refundable(&self) -> bool {
        self.status == TransactionStatus::Paid
    }
}

impl Record for Transaction {
    fn record_id(&self) -> &str {
        &self.invoice
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "invoice" => FieldValue::text(self.invoice.as_str()),
            "company" => FieldValue::text(self.company.as_str()),
            "companyId" => FieldValue::text(self.company_id.as_str()),
            "amount" => FieldValue::Number(self.amount),
            "status" => FieldValue::text(self.status.as_str()),
            "date" => FieldValue::text(self.date.as_str()),
            "nextBillingDate" => FieldValue::text(self.next_billing_date.as_str()),
            "paymentMethod" => FieldValue::text(self.payment_method.as_str()),
            "plan" => FieldValue::text(self.plan.as_str()),
            _ => FieldValue::Missing,
        }
    }
}
