use crate::types::UserId;
use serde::Deserialize;

/// A single entry from the mock user database.
///
/// Loaded from `users.json` at pipeline construction and never mutated
/// afterwards. `active` defaults to `false` so a user missing the flag
/// cannot transact.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default = "unknown_role")]
    pub role: String,
    #[serde(default)]
    pub active: bool
}

fn unknown_role() -> String {
    "unknown".to_string()
}
