use super::{SqliteStore, Storage, StoredTransaction};

use std::str::FromStr;

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn sample_row(transaction_id: &str) -> Result<StoredTransaction> {
    Ok(StoredTransaction {
        transaction_id: transaction_id.to_string(),
        user_id: "USR001".to_string(),
        user_name: "Alice Johnson".to_string(),
        user_email: "alice@example.com".to_string(),
        btc_amount: Decimal::from_str("0.1")?,
        currency: "USD".to_string(),
        btc_price: Decimal::from_str("65000")?,
        subtotal: Decimal::from_str("6500.00")?,
        fee: Decimal::from_str("5.00")?,
        total_with_fee: Decimal::from_str("6505.00")?,
        price_source: "MockBTCPriceAPI v1.0".to_string(),
        status: "completed".to_string(),
        timestamp: "2026-01-15T12:00:00+00:00".to_string()
    })
}

#[test]
fn test_insert_then_fetch_round_trips_a_row() -> Result<()> {
    let store = SqliteStore::in_memory()?;
    let row = sample_row("tx-1")?;

    store.insert(&row)?;

    let fetched = store.fetch("tx-1")?.ok_or_else(|| anyhow!("Row missing after insert"))?;

    assert_eq!(fetched, row);
    assert_eq!(store.count()?, 1);

    Ok(())
}

#[test]
fn test_fetch_returns_none_for_unknown_id() -> Result<()> {
    let store = SqliteStore::in_memory()?;

    assert!(store.fetch("missing")?.is_none());
    assert_eq!(store.count()?, 0);

    Ok(())
}

#[test]
fn test_duplicate_transaction_id_is_rejected_by_the_schema() -> Result<()> {
    let store = SqliteStore::in_memory()?;
    let row = sample_row("tx-1")?;

    store.insert(&row)?;

    assert!(store.insert(&row).is_err());
    assert_eq!(store.count()?, 1);

    Ok(())
}

#[test]
fn test_open_creates_the_database_file_and_parent_directory() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("nested").join("transactions.db");

    let store = SqliteStore::open(&path)?;
    store.insert(&sample_row("tx-1")?)?;

    assert!(path.exists());

    // A second open against the same file sees the persisted row.
    drop(store);
    let reopened = SqliteStore::open(&path)?;

    assert_eq!(reopened.count()?, 1);

    Ok(())
}

#[test]
fn test_monetary_columns_survive_exactly() -> Result<()> {
    let store = SqliteStore::in_memory()?;
    let mut row = sample_row("tx-precise")?;
    row.btc_amount = Decimal::from_str("0.12345678")?;
    row.total_with_fee = Decimal::from_str("8026.12")?;

    store.insert(&row)?;

    let fetched = store.fetch("tx-precise")?.ok_or_else(|| anyhow!("Row missing after insert"))?;

    assert_eq!(fetched.btc_amount, Decimal::from_str("0.12345678")?);
    assert_eq!(fetched.total_with_fee, Decimal::from_str("8026.12")?);

    Ok(())
}
