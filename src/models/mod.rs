mod errors;
mod transaction;
mod user;

use std::fmt;
use std::fmt::{Display, Formatter};

pub use errors::PipelineError;
pub use transaction::{FeeBreakdown, Pricing, Receipt, Transaction, UserProfile, ValidatedInput};
pub use user::User;

/// Terminal state a record reaches after the final pipeline stage.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TransactionStatus {
    Completed
}

impl Display for TransactionStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Completed => formatter.write_str("completed")
        }
    }
}
