use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{PipelineError, TransactionStatus, User};
use crate::types::{Currency, UserId};

/// The record threaded through the filter chain.
///
/// The raw input fields mirror what a caller submits; everything a stage
/// produces lives in its own optional section. Sections are only ever set,
/// never cleared, so the record is monotonically enriched as it moves
/// through the pipeline. A fresh record is built per run.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Raw user identifier as submitted.
    pub user_id: UserId,
    /// Raw purchase amount in BTC, absent if the caller omitted it.
    pub btc_amount: Option<Decimal>,
    /// Raw currency code as submitted, absent if the caller omitted it.
    pub currency: Option<String>,
    /// Set by the validation stage.
    pub validated: Option<ValidatedInput>,
    /// Set by the authentication stage.
    pub profile: Option<UserProfile>,
    /// Set by the transformation stage.
    pub pricing: Option<Pricing>,
    /// Set by the fee stage.
    pub fees: Option<FeeBreakdown>,
    /// Set by the storage stage.
    pub receipt: Option<Receipt>
}

/// Normalized input produced by the validation stage.
#[derive(Debug, Clone)]
pub struct ValidatedInput {
    pub user_id: UserId,
    pub btc_amount: Decimal,
    pub currency: Currency
}

/// Profile data merged in by the authentication stage.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub role: String
}

/// Quote data produced by the transformation stage.
#[derive(Debug, Clone)]
pub struct Pricing {
    /// Price of 1 BTC in the record's currency.
    pub btc_price: Decimal,
    /// `btc_amount` times `btc_price`, rounded to 2 decimal places.
    pub total_value: Decimal,
    /// Label of the price feed that produced the quote.
    pub source: String,
    pub captured_at: DateTime<Local>
}

/// Commission breakdown produced by the fee stage.
#[derive(Debug, Clone)]
pub struct FeeBreakdown {
    /// Commission in the record's currency.
    pub fee: Decimal,
    /// The commission before conversion, always in USD.
    pub fee_usd_base: Decimal,
    /// Value before commission, copied from the pricing total.
    pub subtotal: Decimal,
    /// Final payable amount: subtotal + fee.
    pub total_with_fee: Decimal
}

/// Persistence proof produced by the storage stage.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub transaction_id: Uuid,
    pub stored_at: DateTime<Local>,
    pub status: TransactionStatus
}

impl Transaction {
    /// Starts a record with only a user identifier; amount and currency
    /// are attached with the `with_*` builders so tests and the demo can
    /// express partially complete input.
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            btc_amount: None,
            currency: None,
            validated: None,
            profile: None,
            pricing: None,
            fees: None,
            receipt: None
        }
    }

    pub fn with_amount(mut self, btc_amount: Decimal) -> Self {
        self.btc_amount = Some(btc_amount);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Normalized input, available after the validation stage.
    pub fn validated(&self) -> Result<&ValidatedInput, PipelineError> {
        self.validated.as_ref().ok_or_else(|| PipelineError::missing_stage("validation"))
    }

    /// User profile, available after the authentication stage.
    pub fn profile(&self) -> Result<&UserProfile, PipelineError> {
        self.profile.as_ref().ok_or_else(|| PipelineError::missing_stage("authentication"))
    }

    /// Quote data, available after the transformation stage.
    pub fn pricing(&self) -> Result<&Pricing, PipelineError> {
        self.pricing.as_ref().ok_or_else(|| PipelineError::missing_stage("transformation"))
    }

    /// Fee breakdown, available after the fee stage.
    pub fn fees(&self) -> Result<&FeeBreakdown, PipelineError> {
        self.fees.as_ref().ok_or_else(|| PipelineError::missing_stage("fee"))
    }

    /// Receipt, available after the storage stage.
    pub fn receipt(&self) -> Result<&Receipt, PipelineError> {
        self.receipt.as_ref().ok_or_else(|| PipelineError::missing_stage("storage"))
    }
}

impl UserProfile {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone()
        }
    }
}
