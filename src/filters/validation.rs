use tracing::debug;

use crate::filters::Filter;
use crate::models::{PipelineError, Transaction, ValidatedInput};
use crate::types::Currency;

/// Stage 1: shape-checks the raw input and normalizes it into typed form.
///
/// No side effects; the only change to the record is the `validated`
/// section (trimmed user id, positive amount, uppercased currency).
pub struct ValidationFilter;

impl Filter for ValidationFilter {
    fn name(&self) -> &'static str {
        "ValidationFilter"
    }

    fn process(&self, mut transaction: Transaction) -> Result<Transaction, PipelineError> {
        let user_id = transaction.user_id.trim();

        if user_id.is_empty() {
            return Err(PipelineError::empty_field("user_id"));
        }

        let btc_amount = transaction.btc_amount
            .ok_or_else(|| PipelineError::missing_field("btc_amount"))?;

        if btc_amount.is_sign_negative() || btc_amount.is_zero() {
            return Err(PipelineError::NonPositiveAmount { amount: btc_amount });
        }

        let raw_currency = transaction.currency.as_deref()
            .ok_or_else(|| PipelineError::missing_field("currency"))?;

        if raw_currency.trim().is_empty() {
            return Err(PipelineError::empty_field("currency"));
        }

        let currency: Currency = raw_currency.parse().map_err(|_| {
            PipelineError::UnsupportedCurrency { given: raw_currency.to_string() }
        })?;

        debug!("Validation passed | user_id='{user_id}' | btc_amount={btc_amount} | currency={currency}");

        transaction.validated = Some(ValidatedInput {
            user_id: user_id.to_string(),
            btc_amount,
            currency
        });

        Ok(transaction)
    }
}
