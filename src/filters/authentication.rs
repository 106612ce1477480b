use tracing::debug;

use crate::config::UserDirectory;
use crate::filters::Filter;
use crate::models::{PipelineError, Transaction, UserProfile};

/// Stage 2: verifies the user against the mock user database.
///
/// Fails if the user is unknown or the account is inactive; on success
/// merges the profile (name, email, role) into the record. The directory
/// itself is never mutated.
pub struct AuthenticationFilter {
    directory: UserDirectory
}

impl AuthenticationFilter {
    pub fn new(directory: UserDirectory) -> Self {
        Self { directory }
    }
}

impl Filter for AuthenticationFilter {
    fn name(&self) -> &'static str {
        "AuthenticationFilter"
    }

    fn process(&self, mut transaction: Transaction) -> Result<Transaction, PipelineError> {
        let validated = transaction.validated()?;

        let user = self.directory.find(&validated.user_id)
            .ok_or_else(|| PipelineError::unknown_user(&validated.user_id))?;

        if !user.active {
            return Err(PipelineError::inactive_user(&user.user_id, &user.name));
        }

        debug!("Authentication passed | user: {} ({}) | role: {}", user.name, user.user_id, user.role);

        transaction.profile = Some(UserProfile::from_user(user));

        Ok(transaction)
    }
}
