mod authentication;
mod fee;
mod storage;
mod transformation;
mod validation;

use crate::models::{PipelineError, Transaction};

pub use authentication::AuthenticationFilter;
pub use fee::FeeFilter;
pub use storage::StorageFilter;
pub use transformation::TransformationFilter;
pub use validation::ValidationFilter;

/// A single stage of the pipe-and-filter chain.
///
/// Each filter consumes the record by value and returns it enriched with
/// its own stage section, or fails with the first problem it detects.
pub trait Filter {
    /// Stage name used in logs and failure reports.
    fn name(&self) -> &'static str;

    fn process(&self, transaction: Transaction) -> Result<Transaction, PipelineError>;
}
