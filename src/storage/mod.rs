mod sqlite_store;
#[cfg(test)]
mod tests;

use rust_decimal::Decimal;

use crate::models::PipelineError;

pub use sqlite_store::SqliteStore;

/// A fully processed transaction in its persisted form.
///
/// Fixed 13-field shape matching the `transactions` table. Written once per
/// successful pipeline run, never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTransaction {
    pub transaction_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub btc_amount: Decimal,
    pub currency: String,
    pub btc_price: Decimal,
    pub subtotal: Decimal,
    pub fee: Decimal,
    pub total_with_fee: Decimal,
    pub price_source: String,
    pub status: String,
    pub timestamp: String
}

/// Persistence seam for the storage stage; lets tests swap the SQLite
/// store for an in-memory double.
pub trait Storage {
    fn insert(&self, row: &StoredTransaction) -> Result<(), PipelineError>;
}

impl<S: Storage> Storage for &S {
    fn insert(&self, row: &StoredTransaction) -> Result<(), PipelineError> {
        (*self).insert(row)
    }
}

impl<S: Storage> Storage for std::sync::Arc<S> {
    fn insert(&self, row: &StoredTransaction) -> Result<(), PipelineError> {
        self.as_ref().insert(row)
    }
}
