//! Comment service - applies the authorization policy around comment writes

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::authorization::{
    authorize, Actor, CommentAction, CommentOutcome, Decision, RepositoryAccess,
};
use crate::domain::comment::{validate_comment, Comment, CommentAttributes, CommentId, CommentRepository};
use crate::domain::repository::{Repository, RepositoryId};
use crate::domain::DomainError;
use crate::infrastructure::catalog::RegistryCatalog;

/// Comment service for creating and deleting comments
///
/// Lookups that fail (unknown repository or comment) are errors and never
/// reach the policy. Denials and invalid payloads are outcomes.
#[derive(Debug)]
pub struct CommentService<R: CommentRepository> {
    comments: Arc<R>,
    catalog: RegistryCatalog,
    /// Serializes deletes so the decision and the write see the same comment
    write_lock: Mutex<()>,
}

impl<R: CommentRepository> CommentService<R> {
    /// Create a new comment service
    pub fn new(comments: Arc<R>, catalog: RegistryCatalog) -> Self {
        Self {
            comments,
            catalog,
            write_lock: Mutex::new(()),
        }
    }

    /// Create a comment on a repository on behalf of `actor`
    pub async fn create(
        &self,
        actor: &Actor,
        repository_id: &str,
        attributes: CommentAttributes,
    ) -> Result<CommentOutcome<Comment>, DomainError> {
        let repository = self.find_repository(repository_id).await?;

        let namespace = self
            .catalog
            .namespaces
            .get(repository.namespace_id())
            .await?
            .ok_or_else(|| {
                DomainError::internal(format!(
                    "Repository '{}' references missing namespace '{}'",
                    repository.id(),
                    repository.namespace_id()
                ))
            })?;

        let team = self
            .catalog
            .teams
            .get(namespace.team_id())
            .await?
            .ok_or_else(|| {
                DomainError::internal(format!(
                    "Namespace '{}' references missing team '{}'",
                    namespace.id(),
                    namespace.team_id()
                ))
            })?;

        let action = CommentAction::Create(RepositoryAccess::resolve(&repository, &namespace, &team));
        let decision = authorize(actor, &action);
        log_decision(actor, &action, repository.id(), decision);

        if let Decision::Deny(reason) = decision {
            return Ok(CommentOutcome::Denied(reason));
        }

        let body = match validate_comment(&attributes) {
            Ok(body) => body,
            Err(errors) => {
                debug!(
                    actor = %actor.identifier(),
                    repository = %repository.id(),
                    errors = errors.len(),
                    "Rejected invalid comment attributes"
                );
                return Ok(CommentOutcome::Invalid(errors));
            }
        };

        let comment = Comment::new(repository.id().clone(), actor.id().cloned(), body);
        let created = self.comments.create(comment).await?;

        info!(
            actor = %actor.identifier(),
            repository = %repository.id(),
            comment = %created.id(),
            "Comment created"
        );

        Ok(CommentOutcome::Authorized(created))
    }

    /// Delete a comment of a repository on behalf of `actor`
    pub async fn delete(
        &self,
        actor: &Actor,
        repository_id: &str,
        comment_id: &str,
    ) -> Result<CommentOutcome<Comment>, DomainError> {
        let repository = self.find_repository(repository_id).await?;
        let comment_id = CommentId::parse(comment_id)?;

        let _guard = self.write_lock.lock().await;

        // Re-read under the lock: the decision must see the comment that is
        // about to be deleted.
        let comment = self
            .comments
            .get(&comment_id)
            .await?
            .filter(|c| c.repository_id() == repository.id())
            .ok_or_else(|| comment_not_found(&comment_id, repository.id()))?;

        let action = CommentAction::Delete(&comment);
        let decision = authorize(actor, &action);
        log_decision(actor, &action, repository.id(), decision);

        if let Decision::Deny(reason) = decision {
            return Ok(CommentOutcome::Denied(reason));
        }

        if !self.comments.delete(comment.id()).await? {
            return Err(comment_not_found(&comment_id, repository.id()));
        }

        info!(
            actor = %actor.identifier(),
            repository = %repository.id(),
            comment = %comment.id(),
            "Comment deleted"
        );

        Ok(CommentOutcome::Authorized(comment))
    }

    /// List the comments of a repository, oldest first
    pub async fn list(&self, repository_id: &str) -> Result<Vec<Comment>, DomainError> {
        let repository = self.find_repository(repository_id).await?;
        self.comments.list_for_repository(repository.id()).await
    }

    /// Count the comments of a repository
    pub async fn count_for_repository(&self, repository_id: &str) -> Result<usize, DomainError> {
        let repository = self.find_repository(repository_id).await?;
        self.comments.count_for_repository(repository.id()).await
    }

    /// Count all comments
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.comments.count().await
    }

    async fn find_repository(&self, id: &str) -> Result<Repository, DomainError> {
        let repository_id =
            RepositoryId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        self.catalog
            .repositories
            .get(&repository_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Repository '{}' not found", id)))
    }
}

fn comment_not_found(comment_id: &CommentId, repository_id: &RepositoryId) -> DomainError {
    DomainError::not_found(format!(
        "Comment '{}' not found in repository '{}'",
        comment_id, repository_id
    ))
}

fn log_decision(
    actor: &Actor,
    action: &CommentAction<'_>,
    repository_id: &RepositoryId,
    decision: Decision,
) {
    match decision {
        Decision::Allow(grant) => debug!(
            actor = %actor.identifier(),
            action = action.name(),
            repository = %repository_id,
            grant = ?grant,
            "Authorized"
        ),
        Decision::Deny(reason) => info!(
            actor = %actor.identifier(),
            action = action.name(),
            repository = %repository_id,
            reason = ?reason,
            "Denied"
        ),
    }
}
