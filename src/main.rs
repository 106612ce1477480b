mod config;
mod filters;
mod models;
mod pipeline;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use rust_decimal::Decimal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::{FeeSchedule, PriceTable, UserDirectory};
use crate::filters::{
    AuthenticationFilter, FeeFilter, StorageFilter, TransformationFilter, ValidationFilter
};
use crate::models::Transaction;
use crate::pipeline::Pipeline;
use crate::storage::SqliteStore;

fn main() -> Result<()> {
    //NOTE: If I was making a much more sophisticated CLI application, I would have used the clap crate
    //      to handle the CLI parsing and execution.
    let args: Vec<String> = std::env::args().collect();

    let data_dir = args.get(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("data"));
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let (pipeline, store) = build_pipeline(&data_dir)?;

    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "BTC purchase pipeline demo")?;

    let demo_cases = vec![
        (
            "Case 1 | valid transaction | USD | Alice Johnson | 0.5 BTC",
            Transaction::new("USR001").with_amount(Decimal::new(5, 1)).with_currency("USD")
        ),
        (
            "Case 2 | valid transaction | EUR | Bob Smith | 1.2 BTC",
            Transaction::new("USR002").with_amount(Decimal::new(12, 1)).with_currency("EUR")
        ),
        (
            "Case 3 | valid transaction | GBP | Carol White | 0.25 BTC",
            Transaction::new("USR003").with_amount(Decimal::new(25, 2)).with_currency("GBP")
        ),
        (
            "Case 4 | expected failure | inactive user David Brown (USR004)",
            Transaction::new("USR004").with_amount(Decimal::new(1, 1)).with_currency("USD")
        ),
        (
            "Case 5 | expected failure | missing 'currency' field",
            Transaction::new("USR001").with_amount(Decimal::new(3, 1))
        ),
    ];

    for (label, request) in demo_cases {
        run_case(&mut output, &pipeline, label, request)?;
    }

    writeln!(output)?;
    writeln!(
        output,
        "All cases executed. {} records stored in '{}'",
        store.count()?,
        data_dir.join("transactions.db").display()
    )?;

    output.flush()?;

    Ok(())
}

fn build_pipeline(data_dir: &Path) -> Result<(Pipeline, Arc<SqliteStore>)> {
    let directory = UserDirectory::load(&data_dir.join("users.json"))?;
    let store = Arc::new(SqliteStore::open(&data_dir.join("transactions.db"))?);

    let pipeline = Pipeline::new()
        .add_filter(ValidationFilter)
        .add_filter(AuthenticationFilter::new(directory))
        .add_filter(TransformationFilter::new(PriceTable::default()))
        .add_filter(FeeFilter::new(FeeSchedule::default()))
        .add_filter(StorageFilter::new(store.clone()));

    Ok((pipeline, store))
}

fn run_case(output: &mut impl Write, pipeline: &Pipeline, label: &str, request: Transaction) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "=== {label} ===")?;

    match pipeline.execute(request) {
        Ok(result) => write_summary(output, &result)?,
        Err(error) => {
            writeln!(output, "  rejected | {} error | {error}", error.category())?;
        }
    }

    Ok(())
}

fn write_summary(output: &mut impl Write, result: &Transaction) -> Result<()> {
    let validated = result.validated()?;
    let profile = result.profile()?;
    let pricing = result.pricing()?;
    let fees = result.fees()?;
    let receipt = result.receipt()?;
    let currency = validated.currency;

    writeln!(output, "  transaction id : {}", receipt.transaction_id)?;
    writeln!(output, "  user           : {} ({})", profile.name, validated.user_id)?;
    writeln!(output, "  email          : {}", profile.email)?;
    writeln!(output, "  role           : {}", profile.role)?;
    writeln!(output, "  btc amount     : {}", validated.btc_amount)?;
    writeln!(output, "  btc price      : {} {currency}", pricing.btc_price)?;
    writeln!(output, "  subtotal       : {} {currency}", fees.subtotal)?;
    writeln!(output, "  commission     : {} {currency} (base {} USD)", fees.fee, fees.fee_usd_base)?;
    writeln!(output, "  total payable  : {} {currency}", fees.total_with_fee)?;
    writeln!(output, "  status         : {}", receipt.status)?;
    writeln!(output, "  timestamp      : {}", receipt.stored_at.to_rfc3339())?;
    writeln!(output, "  price source   : {} (captured {})", pricing.source, pricing.captured_at.to_rfc3339())?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The demo summaries go to stdout, so logging is routed to stderr to keep them separable
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
