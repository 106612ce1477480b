#[cfg(test)]
mod tests;

use tracing::{debug, error, info};

use crate::filters::Filter;
use crate::models::{PipelineError, Transaction};

/// Pipe-and-filter orchestrator.
///
/// Holds an ordered chain of filters and threads one record through them,
/// front to back. The first failing filter aborts the run; there are no
/// retries and no partial-commit recovery.
pub struct Pipeline {
    filters: Vec<Box<dyn Filter>>
}

impl Pipeline {
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Appends a filter to the end of the chain, returning `self` so
    /// construction reads as one expression.
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Runs the record through every filter in order.
    ///
    /// # Errors
    /// Returns `EmptyPipeline` if no filters are configured, otherwise the
    /// first error any filter raises; the failing stage is logged with its
    /// position in the chain.
    pub fn execute(&self, transaction: Transaction) -> Result<Transaction, PipelineError> {
        if self.filters.is_empty() {
            return Err(PipelineError::EmptyPipeline);
        }

        let total = self.filters.len();
        let mut current = transaction;

        for (index, filter) in self.filters.iter().enumerate() {
            let step = index + 1;

            debug!("[{step}/{total}] {} started", filter.name());

            current = filter.process(current).inspect_err(|failure| {
                error!("[{step}/{total}] {} failed: {failure}", filter.name());
            })?;

            info!("[{step}/{total}] {} completed", filter.name());
        }

        Ok(current)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
