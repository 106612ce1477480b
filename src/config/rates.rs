use crate::types::Currency;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Fixed BTC quotes per currency, standing in for a live price feed.
///
/// Injected into the transformation stage at construction so tests can
/// supply their own rates instead of patching constants.
#[derive(Debug, Clone)]
pub struct PriceTable {
    rates: HashMap<Currency, Decimal>,
    source: String
}

impl PriceTable {
    pub fn new(rates: HashMap<Currency, Decimal>, source: impl Into<String>) -> Self {
        Self {
            rates,
            source: source.into()
        }
    }

    /// Price of 1 BTC in the given currency, if the table carries one.
    pub fn price(&self, currency: Currency) -> Option<Decimal> {
        self.rates.get(&currency).copied()
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        let rates = HashMap::from([
            (Currency::Usd, Decimal::from(65_000)),
            (Currency::Eur, Decimal::from(60_500)),
            (Currency::Gbp, Decimal::from(51_800))
        ]);

        Self::new(rates, "MockBTCPriceAPI v1.0")
    }
}

/// Commission policy: a base fee in USD plus the conversion rate into each
/// supported settlement currency.
#[derive(Debug, Clone)]
pub struct FeeSchedule {
    base_fee_usd: Decimal,
    conversion_rates: HashMap<Currency, Decimal>
}

impl FeeSchedule {
    pub fn new(base_fee_usd: Decimal, conversion_rates: HashMap<Currency, Decimal>) -> Self {
        Self {
            base_fee_usd,
            conversion_rates
        }
    }

    pub fn base_fee_usd(&self) -> Decimal {
        self.base_fee_usd
    }

    /// Commission converted into the given currency, rounded to 2 decimal
    /// places, or `None` if the schedule has no rate for it.
    pub fn fee_for(&self, currency: Currency) -> Option<Decimal> {
        self.conversion_rates
            .get(&currency)
            .map(|rate| (self.base_fee_usd * rate).round_dp(2))
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        let conversion_rates = HashMap::from([
            (Currency::Usd, Decimal::ONE),
            (Currency::Eur, Decimal::new(9_240, 4)),
            (Currency::Gbp, Decimal::new(7_920, 4))
        ]);

        Self::new(Decimal::new(500, 2), conversion_rates)
    }
}
