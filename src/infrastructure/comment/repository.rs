//! Storage-backed comment repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::comment::{Comment, CommentId, CommentRepository};
use crate::domain::repository::RepositoryId;
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of CommentRepository
#[derive(Debug)]
pub struct StorageCommentRepository {
    storage: Arc<dyn Storage<Comment>>,
}

impl StorageCommentRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Comment>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl CommentRepository for StorageCommentRepository {
    async fn get(&self, id: &CommentId) -> Result<Option<Comment>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, comment: Comment) -> Result<Comment, DomainError> {
        if self.storage.exists(comment.id()).await? {
            return Err(DomainError::conflict(format!(
                "Comment '{}' already exists",
                comment.id()
            )));
        }

        self.storage.create(comment).await
    }

    async fn delete(&self, id: &CommentId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn list_for_repository(
        &self,
        repository_id: &RepositoryId,
    ) -> Result<Vec<Comment>, DomainError> {
        let mut comments: Vec<Comment> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|c| c.repository_id() == repository_id)
            .collect();

        comments.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().as_str().cmp(b.id().as_str()))
        });

        Ok(comments)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}
