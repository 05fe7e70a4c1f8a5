//! Comment domain
//!
//! Comments are attached to repositories. Creating and destroying them is
//! gated by the authorization policy in [`crate::domain::authorization`].

mod entity;
mod repository;
mod validation;

pub use entity::{Comment, CommentId};
pub use repository::CommentRepository;
pub use validation::{validate_comment, CommentAttributes, FieldError, MAX_COMMENT_BODY_LENGTH};
