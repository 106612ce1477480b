use crate::types::{Currency, UserId};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Required field '{field}' is missing")]
    MissingField {
        field: &'static str
    },
    #[error("Field '{field}' cannot be empty")]
    EmptyField {
        field: &'static str
    },
    #[error("Field 'btc_amount' must be greater than 0, got {amount}")]
    NonPositiveAmount {
        amount: Decimal
    },
    #[error("Invalid currency '{given}', accepted values: USD, EUR, GBP")]
    UnsupportedCurrency {
        given: String
    },
    #[error("Authentication failed: user '{user_id}' does not exist in the database")]
    UnknownUser {
        user_id: UserId
    },
    #[error("Authentication failed: account for user '{user_id}' ({name}) is inactive")]
    InactiveUser {
        user_id: UserId,
        name: String
    },
    #[error("No BTC price available for currency {currency}")]
    PriceUnavailable {
        currency: Currency
    },
    #[error("No fee conversion rate defined for currency {currency}")]
    FeeUnavailable {
        currency: Currency
    },
    #[error("Record is missing data from the {stage} stage")]
    MissingStage {
        stage: &'static str
    },
    #[error("Pipeline has no filters configured")]
    EmptyPipeline,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Users database contains invalid JSON: {0}")]
    UserDbFormat(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error)
}

impl PipelineError {
    //NOTE: Factory helpers keep call sites terse where the same variants are
    //      raised from more than one place.

    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn empty_field(field: &'static str) -> Self {
        Self::EmptyField { field }
    }

    pub fn missing_stage(stage: &'static str) -> Self {
        Self::MissingStage { stage }
    }

    pub fn unknown_user(user_id: &str) -> Self {
        Self::UnknownUser { user_id: user_id.to_string() }
    }

    pub fn inactive_user(user_id: &str, name: &str) -> Self {
        Self::InactiveUser {
            user_id: user_id.to_string(),
            name: name.to_string()
        }
    }

    /// Coarse grouping used by the demo output and diagnostics; maps each
    /// variant to the stage family that raises it.
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingField { .. }
            | Self::EmptyField { .. }
            | Self::NonPositiveAmount { .. }
            | Self::UnsupportedCurrency { .. } => "validation",
            Self::UnknownUser { .. } | Self::InactiveUser { .. } => "authentication",
            Self::PriceUnavailable { .. } => "pricing",
            Self::FeeUnavailable { .. } => "fee",
            Self::Storage(_) => "storage",
            Self::Io(_) | Self::UserDbFormat(_) => "configuration",
            Self::MissingStage { .. } | Self::EmptyPipeline => "pipeline"
        }
    }
}
