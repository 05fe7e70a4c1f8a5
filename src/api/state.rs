//! Application state for shared services

use std::sync::Arc;

use crate::domain::comment::{CommentAttributes, CommentRepository};
use crate::domain::storage::Storage;
use crate::domain::user::User;
use crate::domain::{Actor, Comment, CommentOutcome, DomainError};
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::comment::CommentService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub comment_service: Arc<dyn CommentServiceTrait>,
    /// Used to resolve bearer token subjects into actors
    pub user_storage: Arc<dyn Storage<User>>,
    pub jwt_service: Arc<dyn JwtGenerator>,
}

/// Trait for comment service operations
#[async_trait::async_trait]
pub trait CommentServiceTrait: Send + Sync {
    async fn create(
        &self,
        actor: &Actor,
        repository_id: &str,
        attributes: CommentAttributes,
    ) -> Result<CommentOutcome<Comment>, DomainError>;

    async fn delete(
        &self,
        actor: &Actor,
        repository_id: &str,
        comment_id: &str,
    ) -> Result<CommentOutcome<Comment>, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}

#[async_trait::async_trait]
impl<R: CommentRepository + 'static> CommentServiceTrait for CommentService<R> {
    async fn create(
        &self,
        actor: &Actor,
        repository_id: &str,
        attributes: CommentAttributes,
    ) -> Result<CommentOutcome<Comment>, DomainError> {
        CommentService::create(self, actor, repository_id, attributes).await
    }

    async fn delete(
        &self,
        actor: &Actor,
        repository_id: &str,
        comment_id: &str,
    ) -> Result<CommentOutcome<Comment>, DomainError> {
        CommentService::delete(self, actor, repository_id, comment_id).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        CommentService::count(self).await
    }
}

impl AppState {
    pub fn new(
        comment_service: Arc<dyn CommentServiceTrait>,
        user_storage: Arc<dyn Storage<User>>,
        jwt_service: Arc<dyn JwtGenerator>,
    ) -> Self {
        Self {
            comment_service,
            user_storage,
            jwt_service,
        }
    }
}
