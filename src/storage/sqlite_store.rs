use std::fs;
use std::path::Path;

use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::models::PipelineError;
use crate::storage::{Storage, StoredTransaction};

/// SQLite-backed transaction store.
///
/// The `transactions` table is created on open if absent. Monetary columns
/// are stored as their exact decimal text rather than floats.
pub struct SqliteStore {
    conn: Connection
}

impl SqliteStore {
    /// Opens (creating if needed) the database file and ensures the schema
    /// exists. The parent directory is created if missing.
    pub fn open(path: &Path) -> Result<Self, PipelineError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self { conn: Connection::open(path)? };
        store.init_schema()?;

        info!("Transaction store ready at '{}'", path.display());

        Ok(store)
    }

    /// Opens an in-memory database; used by tests.
    #[cfg(test)]
    pub fn in_memory() -> Result<Self, PipelineError> {
        let store = Self { conn: Connection::open_in_memory()? };
        store.init_schema()?;

        Ok(store)
    }

    fn init_schema(&self) -> Result<(), PipelineError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS transactions (
                transaction_id   TEXT PRIMARY KEY,
                user_id          TEXT NOT NULL,
                user_name        TEXT NOT NULL,
                user_email       TEXT NOT NULL,
                btc_amount       TEXT NOT NULL,
                currency         TEXT NOT NULL,
                btc_price        TEXT NOT NULL,
                subtotal         TEXT NOT NULL,
                fee              TEXT NOT NULL,
                total_with_fee   TEXT NOT NULL,
                price_source     TEXT,
                status           TEXT NOT NULL,
                timestamp        TEXT NOT NULL
            )"
        )?;

        Ok(())
    }

    /// Number of persisted transactions.
    pub fn count(&self) -> Result<i64, PipelineError> {
        let count = self.conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;

        Ok(count)
    }

    /// Looks up a persisted transaction by its identifier; used by tests.
    #[cfg(test)]
    pub fn fetch(&self, transaction_id: &str) -> Result<Option<StoredTransaction>, PipelineError> {
        use rusqlite::OptionalExtension;

        let row = self.conn
            .query_row(
                "SELECT transaction_id, user_id, user_name, user_email,
                        btc_amount, currency, btc_price,
                        subtotal, fee, total_with_fee,
                        price_source, status, timestamp
                 FROM transactions WHERE transaction_id = ?1",
                params![transaction_id],
                row_to_stored_transaction
            )
            .optional()?;

        Ok(row)
    }
}

impl Storage for SqliteStore {
    fn insert(&self, row: &StoredTransaction) -> Result<(), PipelineError> {
        self.conn.execute(
            "INSERT INTO transactions (
                transaction_id, user_id, user_name, user_email,
                btc_amount, currency, btc_price,
                subtotal, fee, total_with_fee,
                price_source, status, timestamp
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                row.transaction_id,
                row.user_id,
                row.user_name,
                row.user_email,
                row.btc_amount.to_string(),
                row.currency,
                row.btc_price.to_string(),
                row.subtotal.to_string(),
                row.fee.to_string(),
                row.total_with_fee.to_string(),
                row.price_source,
                row.status,
                row.timestamp
            ]
        )?;

        debug!("Transaction [{}] inserted", row.transaction_id);

        Ok(())
    }
}

#[cfg(test)]
fn row_to_stored_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredTransaction> {
    Ok(StoredTransaction {
        transaction_id: row.get(0)?,
        user_id: row.get(1)?,
        user_name: row.get(2)?,
        user_email: row.get(3)?,
        btc_amount: decimal_column(row, 4)?,
        currency: row.get(5)?,
        btc_price: decimal_column(row, 6)?,
        subtotal: decimal_column(row, 7)?,
        fee: decimal_column(row, 8)?,
        total_with_fee: decimal_column(row, 9)?,
        price_source: row.get(10)?,
        status: row.get(11)?,
        timestamp: row.get(12)?
    })
}

#[cfg(test)]
fn decimal_column(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<rust_decimal::Decimal> {
    use std::str::FromStr;

    let text: String = row.get(index)?;

    rust_decimal::Decimal::from_str(&text).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(error))
    })
}
