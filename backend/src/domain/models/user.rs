//! Domain model for a storefront user.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl User {
    /// Canonical form of a user ID, applied on every write and lookup
    pub fn normalize_id(id: &str) -> &str {
        id.trim()
    }
}
