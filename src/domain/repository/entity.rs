//! Repository entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::namespace::NamespaceId;
use crate::domain::storage::StorageEntity;
use crate::domain::validation::string_id;

string_id!(
    /// Repository identifier - alphanumeric + hyphens, max 50 characters
    RepositoryId,
    "Repository"
);

/// An image repository inside a namespace
///
/// Holds no access rules of its own; everything is derived from the
/// namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    id: RepositoryId,
    name: String,
    namespace_id: NamespaceId,
    created_at: DateTime<Utc>,
}

impl Repository {
    pub fn new(id: RepositoryId, name: impl Into<String>, namespace_id: NamespaceId) -> Self {
        Self {
            id,
            name: name.into(),
            namespace_id,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &RepositoryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace_id(&self) -> &NamespaceId {
        &self.namespace_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for Repository {
    type Key = RepositoryId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_creation() {
        let repo = Repository::new(
            RepositoryId::new("busybox").unwrap(),
            "busybox",
            NamespaceId::new("library").unwrap(),
        );

        assert_eq!(repo.id().as_str(), "busybox");
        assert_eq!(repo.name(), "busybox");
        assert_eq!(repo.namespace_id().as_str(), "library");
    }

    #[test]
    fn test_repository_id_rejects_slashes() {
        assert!(RepositoryId::new("library/busybox").is_err());
    }
}
