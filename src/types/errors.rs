use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurrencyError {
    #[error("Currency error: '{0}' is not one of USD, EUR, GBP")]
    Unsupported(String)
}
