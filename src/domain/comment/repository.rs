//! Comment repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Comment, CommentId};
use crate::domain::repository::RepositoryId;
use crate::domain::DomainError;

/// Repository trait for comment storage
#[async_trait]
pub trait CommentRepository: Send + Sync + Debug {
    /// Get a comment by its ID
    async fn get(&self, id: &CommentId) -> Result<Option<Comment>, DomainError>;

    /// Persist a new comment
    async fn create(&self, comment: Comment) -> Result<Comment, DomainError>;

    /// Delete a comment, returns false if it was already gone
    async fn delete(&self, id: &CommentId) -> Result<bool, DomainError>;

    /// List the comments of a repository, oldest first
    async fn list_for_repository(
        &self,
        repository_id: &RepositoryId,
    ) -> Result<Vec<Comment>, DomainError>;

    /// Count all comments
    async fn count(&self) -> Result<usize, DomainError>;

    /// Count the comments of a repository
    async fn count_for_repository(&self, repository_id: &RepositoryId) -> Result<usize, DomainError> {
        Ok(self.list_for_repository(repository_id).await?.len())
    }
}
