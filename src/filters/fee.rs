use tracing::debug;

use crate::config::FeeSchedule;
use crate::filters::Filter;
use crate::models::{FeeBreakdown, PipelineError, Transaction};

/// Stage 4: applies the fixed commission on top of the priced subtotal.
pub struct FeeFilter {
    schedule: FeeSchedule
}

impl FeeFilter {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self { schedule }
    }
}

impl Filter for FeeFilter {
    fn name(&self) -> &'static str {
        "FeeFilter"
    }

    fn process(&self, mut transaction: Transaction) -> Result<Transaction, PipelineError> {
        let currency = transaction.validated()?.currency;
        let subtotal = transaction.pricing()?.total_value;

        let fee = self.schedule.fee_for(currency)
            .ok_or(PipelineError::FeeUnavailable { currency })?;

        let total_with_fee = (subtotal + fee).round_dp(2);

        debug!("Fee applied | subtotal: {subtotal} {currency} + fee: {fee} {currency} = total: {total_with_fee} {currency}");

        transaction.fees = Some(FeeBreakdown {
            fee,
            fee_usd_base: self.schedule.base_fee_usd(),
            subtotal,
            total_with_fee
        });

        Ok(transaction)
    }
}
