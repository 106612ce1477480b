use super::Pipeline;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::{FeeSchedule, PriceTable, UserDirectory};
use crate::filters::{
    AuthenticationFilter, FeeFilter, StorageFilter, TransformationFilter, ValidationFilter
};
use crate::models::{PipelineError, Transaction, TransactionStatus, User};
use crate::storage::SqliteStore;
use crate::types::Currency;

fn create_user(user_id: &str, name: &str, email: &str, active: bool) -> User {
    User {
        user_id: user_id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role: "trader".to_string(),
        active
    }
}

fn create_directory() -> UserDirectory {
    UserDirectory::from_users(vec![
        create_user("USR001", "Alice Johnson", "alice@example.com", true),
        create_user("USR002", "Bob Smith", "bob@example.com", true),
        create_user("USR004", "David Brown", "david@example.com", false),
    ])
}

fn create_pipeline(store: Arc<SqliteStore>) -> Pipeline {
    Pipeline::new()
        .add_filter(ValidationFilter)
        .add_filter(AuthenticationFilter::new(create_directory()))
        .add_filter(TransformationFilter::new(PriceTable::default()))
        .add_filter(FeeFilter::new(FeeSchedule::default()))
        .add_filter(StorageFilter::new(store))
}

#[test]
fn test_empty_pipeline_refuses_to_execute() {
    let result = Pipeline::new().execute(Transaction::new("USR001"));

    assert!(matches!(result, Err(PipelineError::EmptyPipeline)));
}

#[test]
fn test_full_run_matches_the_worked_example() -> Result<()> {
    // 0.1 BTC at 65,000 USD/BTC with a flat 5.00 USD fee.
    let store = Arc::new(SqliteStore::in_memory()?);
    let pipeline = create_pipeline(store.clone());

    let request = Transaction::new("USR001")
        .with_amount(Decimal::from_str("0.1")?)
        .with_currency("usd");

    let result = pipeline.execute(request)?;

    assert_eq!(result.validated()?.currency, Currency::Usd);
    assert_eq!(result.pricing()?.total_value, Decimal::from_str("6500.00")?);
    assert_eq!(result.fees()?.fee, Decimal::from_str("5.00")?);
    assert_eq!(result.fees()?.total_with_fee, Decimal::from_str("6505.00")?);

    let receipt = result.receipt()?;
    assert_eq!(receipt.status, TransactionStatus::Completed);
    assert_ne!(receipt.transaction_id, Uuid::nil());

    let row = store
        .fetch(&receipt.transaction_id.to_string())?
        .ok_or_else(|| anyhow!("Persisted row missing"))?;

    assert_eq!(row.user_name, "Alice Johnson");
    assert_eq!(row.total_with_fee, Decimal::from_str("6505.00")?);
    assert_eq!(store.count()?, 1);

    Ok(())
}

#[test]
fn test_run_preserves_and_enriches_the_record_monotonically() -> Result<()> {
    let store = Arc::new(SqliteStore::in_memory()?);
    let pipeline = create_pipeline(store);

    let request = Transaction::new("USR002")
        .with_amount(Decimal::from_str("1.2")?)
        .with_currency("EUR");

    let result = pipeline.execute(request)?;

    // Raw input survives untouched and every stage section is filled.
    assert_eq!(result.user_id, "USR002");
    assert_eq!(result.currency.as_deref(), Some("EUR"));
    assert!(result.validated.is_some());
    assert!(result.profile.is_some());
    assert!(result.pricing.is_some());
    assert!(result.fees.is_some());
    assert!(result.receipt.is_some());

    Ok(())
}

#[test]
fn test_inactive_user_aborts_before_anything_is_persisted() -> Result<()> {
    let store = Arc::new(SqliteStore::in_memory()?);
    let pipeline = create_pipeline(store.clone());

    let request = Transaction::new("USR004")
        .with_amount(Decimal::from_str("0.1")?)
        .with_currency("USD");

    let result = pipeline.execute(request);

    assert!(matches!(result, Err(PipelineError::InactiveUser { .. })));
    assert_eq!(store.count()?, 0);

    Ok(())
}

#[test]
fn test_missing_currency_fails_at_validation() -> Result<()> {
    let store = Arc::new(SqliteStore::in_memory()?);
    let pipeline = create_pipeline(store.clone());

    let request = Transaction::new("USR001").with_amount(Decimal::from_str("0.3")?);
    let result = pipeline.execute(request);

    assert!(matches!(result, Err(PipelineError::MissingField { field: "currency" })));
    assert_eq!(store.count()?, 0);

    Ok(())
}

#[test]
fn test_identical_runs_persist_distinct_rows() -> Result<()> {
    let store = Arc::new(SqliteStore::in_memory()?);
    let pipeline = create_pipeline(store.clone());

    let mut transaction_ids = Vec::new();

    for _ in 0..2 {
        let request = Transaction::new("USR001")
            .with_amount(Decimal::from_str("0.1")?)
            .with_currency("USD");
        let result = pipeline.execute(request)?;

        transaction_ids.push(result.receipt()?.transaction_id);
    }

    assert_eq!(store.count()?, 2);
    assert_ne!(transaction_ids[0], transaction_ids[1]);

    Ok(())
}
