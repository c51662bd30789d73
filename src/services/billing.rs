// Billing service
// Refunds. Only settled invoices can be refunded; anything else is rejected
// before the backend is called.

use crate::backend::MockBackend;
use crate::entities::{Transaction, TransactionStatus};
use crate::error::ConsoleError;

pub async fn refund_transaction(
    backend: &MockBackend,
    invoice: &str,
) -> Result<Transaction, ConsoleError> {
    let mut transaction: Transaction = backend.get(invoice).await?;
    if !transaction.is_refundable() {
        return Err(ConsoleError::OperationFailed(format!(
            "Cannot refund {} invoice {}",
            transaction.status.as_str().to_lowercase(),
            invoice
        )));
    }
    transaction.status = TransactionStatus::Refunded;
    let refunded = backend.update(transaction).await?;
    log::info!("Refunded invoice {} ({})", invoice, refunded.amount);
    Ok(refunded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Simulation;
    use crate::store::MockStore;

    fn backend() -> MockBackend {
        MockBackend::new(MockStore::seeded(), Simulation::instant())
    }

    #[tokio::test]
    async fn test_refund_paid_invoice() {
        let backend = backend();
        let refunded = refund_transaction(&backend, "INV-1001").await.unwrap();
        assert_eq!(refunded.status, TransactionStatus::Refunded);
        let stored = backend.snapshot().transactions.get("INV-1001").cloned().unwrap();
        assert_eq!(stored.status, TransactionStatus::Refunded);
    }

    #[tokio::test]
    async fn test_refund_rejects_unsettled_invoice() {
        let backend = backend();
        let err = refund_transaction(&backend, "INV-1003").await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot refund pending invoice INV-1003");
        let stored = backend.snapshot().transactions.get("INV-1003").cloned().unwrap();
        assert_eq!(stored.status, TransactionStatus::Pending);

        // Refunding twice is rejected the second time.
        refund_transaction(&backend, "INV-1002").await.unwrap();
        assert!(refund_transaction(&backend, "INV-1002").await.is_err());
    }
}
