use chrono::Local;
use tracing::debug;
use uuid::Uuid;

use crate::filters::Filter;
use crate::models::{PipelineError, Receipt, Transaction, TransactionStatus};
use crate::storage::{Storage, StoredTransaction};

/// Stage 5: persists the fully enriched record and stamps the receipt.
///
/// Generates a fresh UUID per run, so identical inputs never share an
/// identifier. A failed insert surfaces as a storage error and leaves the
/// record without a receipt.
pub struct StorageFilter<S: Storage> {
    store: S
}

impl<S: Storage> StorageFilter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: Storage> Filter for StorageFilter<S> {
    fn name(&self) -> &'static str {
        "StorageFilter"
    }

    fn process(&self, mut transaction: Transaction) -> Result<Transaction, PipelineError> {
        let transaction_id = Uuid::new_v4();
        let stored_at = Local::now();
        let status = TransactionStatus::Completed;

        let row = {
            let validated = transaction.validated()?;
            let profile = transaction.profile()?;
            let pricing = transaction.pricing()?;
            let fees = transaction.fees()?;

            StoredTransaction {
                transaction_id: transaction_id.to_string(),
                user_id: validated.user_id.clone(),
                user_name: profile.name.clone(),
                user_email: profile.email.clone(),
                btc_amount: validated.btc_amount,
                currency: validated.currency.to_string(),
                btc_price: pricing.btc_price,
                subtotal: fees.subtotal,
                fee: fees.fee,
                total_with_fee: fees.total_with_fee,
                price_source: pricing.source.clone(),
                status: status.to_string(),
                timestamp: stored_at.to_rfc3339()
            }
        };

        self.store.insert(&row)?;

        debug!("Storage complete | transaction id: {transaction_id} | timestamp: {}", row.timestamp);

        transaction.receipt = Some(Receipt {
            transaction_id,
            stored_at,
            status
        });

        Ok(transaction)
    }
}
