use chrono::Local;
use tracing::debug;

use crate::config::PriceTable;
use crate::filters::Filter;
use crate::models::{PipelineError, Pricing, Transaction};

/// Stage 3: prices the purchase in the record's settlement currency.
///
/// Quotes come from the injected price table, which stands in for a live
/// price feed; the quote's source label and capture time are recorded on
/// the record. Deterministic given amount and currency.
pub struct TransformationFilter {
    prices: PriceTable
}

impl TransformationFilter {
    pub fn new(prices: PriceTable) -> Self {
        Self { prices }
    }
}

impl Filter for TransformationFilter {
    fn name(&self) -> &'static str {
        "TransformationFilter"
    }

    fn process(&self, mut transaction: Transaction) -> Result<Transaction, PipelineError> {
        let validated = transaction.validated()?;
        let currency = validated.currency;

        let btc_price = self.prices.price(currency)
            .ok_or(PipelineError::PriceUnavailable { currency })?;

        let total_value = (validated.btc_amount * btc_price).round_dp(2);

        debug!(
            "Transformation complete | {} BTC x {btc_price} = {total_value} {currency} (source: {})",
            validated.btc_amount,
            self.prices.source()
        );

        transaction.pricing = Some(Pricing {
            btc_price,
            total_value,
            source: self.prices.source().to_string(),
            captured_at: Local::now()
        });

        Ok(transaction)
    }
}
