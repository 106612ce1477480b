use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::models::{PipelineError, User};
use crate::types::UserId;

#[derive(Debug, Deserialize)]
struct UserFile {
    users: Vec<User>
}

/// In-memory index over the mock user database.
///
/// Built once from `users.json` and read-only afterwards.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: HashMap<UserId, User>
}

impl UserDirectory {
    /// Loads and indexes the user database from a JSON file of the shape
    /// `{"users": [...]}`.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let contents = fs::read_to_string(path)?;
        let file: UserFile = serde_json::from_str(&contents)?;
        let directory = Self::from_users(file.users);

        if directory.is_empty() {
            warn!("User database at {} holds no users, every run will fail authentication", path.display());
        }

        info!("User database loaded from {}: {} users registered", path.display(), directory.len());

        Ok(directory)
    }

    /// Builds a directory directly from user records.
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|user| (user.user_id.clone(), user)).collect()
        }
    }

    pub fn find(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
