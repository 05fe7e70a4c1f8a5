//! Repository comment endpoints

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::CurrentActor;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::comment::{Comment, CommentAttributes};
use crate::domain::CommentOutcome;

/// Body of `POST /repositories/{repository_id}/comments`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub comment: CommentAttributes,
}

impl CreateCommentRequest {
    /// Read the raw request body leniently. An empty, unparsable or
    /// wrong-shaped body carries no attributes, so it is reported by
    /// validation once the actor is known to be allowed to comment.
    /// The `Content-Type` header is not consulted.
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }

        serde_json::from_slice(body).unwrap_or_else(|e| {
            debug!(error = %e, "Comment payload is not a comment object");
            Self::default()
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub repository_id: String,
    pub author: Option<String>,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id().as_str().to_string(),
            repository_id: comment.repository_id().as_str().to_string(),
            author: comment.author().map(|a| a.as_str().to_string()),
            body: comment.body().to_string(),
            created_at: comment.created_at().to_rfc3339(),
            updated_at: comment.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCommentResponse {
    pub deleted: bool,
    pub id: String,
}

fn into_result<T>(outcome: CommentOutcome<T>) -> Result<T, ApiError> {
    match outcome {
        CommentOutcome::Authorized(value) => Ok(value),
        CommentOutcome::Denied(reason) => Err(ApiError::from(reason)),
        CommentOutcome::Invalid(errors) => Err(ApiError::unprocessable(errors)),
    }
}

/// POST /repositories/{repository_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(repository_id): Path<String>,
    body: Bytes,
) -> Result<Json<CommentResponse>, ApiError> {
    debug!(actor = %actor.identifier(), repository_id = %repository_id, "Creating comment");

    let request = CreateCommentRequest::from_body(&body);

    let outcome = state
        .comment_service
        .create(&actor, &repository_id, request.comment)
        .await
        .map_err(ApiError::from)?;

    let comment = into_result(outcome)?;

    Ok(Json(CommentResponse::from(&comment)))
}

/// DELETE /repositories/{repository_id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path((repository_id, comment_id)): Path<(String, String)>,
) -> Result<Json<DeleteCommentResponse>, ApiError> {
    debug!(
        actor = %actor.identifier(),
        repository_id = %repository_id,
        comment_id = %comment_id,
        "Deleting comment"
    );

    let outcome = state
        .comment_service
        .delete(&actor, &repository_id, &comment_id)
        .await
        .map_err(ApiError::from)?;

    let comment = into_result(outcome)?;

    Ok(Json(DeleteCommentResponse {
        deleted: true,
        id: comment.id().as_str().to_string(),
    }))
}
