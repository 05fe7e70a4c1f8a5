//! Comment entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::repository::RepositoryId;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Comment identifier (UUID v4, hyphenated lowercase)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentId(String);

impl CommentId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse an identifier received from a client
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let uuid = Uuid::parse_str(value).map_err(|e| {
            DomainError::invalid_id(format!("Invalid comment ID '{}': {}", value, e))
        })?;

        Ok(Self(uuid.hyphenated().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommentId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CommentId> for String {
    fn from(id: CommentId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for CommentId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A comment attached to a repository
///
/// Comments are only ever created or destroyed; the body is never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    repository_id: RepositoryId,
    /// `None` for comments left anonymously on public repositories
    author: Option<UserId>,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        repository_id: RepositoryId,
        author: Option<UserId>,
        body: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: CommentId::generate(),
            repository_id,
            author,
            body: body.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &CommentId {
        &self.id
    }

    pub fn repository_id(&self) -> &RepositoryId {
        &self.repository_id
    }

    pub fn author(&self) -> Option<&UserId> {
        self.author.as_ref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check whether the given user wrote this comment
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        self.author.as_ref() == Some(user_id)
    }
}

impl StorageEntity for Comment {
    type Key = CommentId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
