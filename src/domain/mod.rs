//! Domain layer - Core business logic and entities

pub mod authorization;
pub mod comment;
pub mod error;
pub mod namespace;
pub mod repository;
pub mod storage;
pub mod team;
pub mod user;
pub mod validation;

pub use authorization::{
    authorize, resolve_visibility, Actor, CommentAction, CommentOutcome, Decision, DenyReason,
    Grant, RepositoryAccess, StatusKind,
};
pub use comment::{Comment, CommentAttributes, CommentId, CommentRepository, FieldError};
pub use error::DomainError;
pub use namespace::{Namespace, NamespaceId, Visibility};
pub use repository::{Repository, RepositoryId};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use team::{Team, TeamId};
pub use user::{User, UserId};
