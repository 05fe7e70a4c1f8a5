//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::StorageEntity;
use crate::domain::validation::string_id;

string_id!(
    /// User identifier - alphanumeric + hyphens, max 50 characters
    UserId,
    "User"
);

/// An authenticated registry user
///
/// Users are resolved once per request and never change while a decision is
/// being made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Display name
    username: String,
    /// Registry administrators bypass every comment check
    #[serde(default)]
    admin: bool,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a regular (non-admin) user
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            admin: false,
            created_at: Utc::now(),
        }
    }

    /// Create a registry administrator
    pub fn admin(id: UserId, username: impl Into<String>) -> Self {
        Self::new(id, username).with_admin(true)
    }

    /// Set the admin flag (builder pattern)
    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for User {
    type Key = UserId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
