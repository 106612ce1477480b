use crate::types::errors::CurrencyError;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The set of base currencies a purchase can settle in.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Currency {
    Usd,
    Eur,
    Gbp
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP"
        }
    }
}

impl Display for Currency {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(CurrencyError::Unsupported(other.to_string()))
        }
    }
}
