//! Authorization domain
//!
//! Decides who may create or delete comments. Everything here is pure and
//! synchronous so it can be called from any number of requests at once.

mod actor;
mod outcome;
mod policy;
mod visibility;

pub use actor::Actor;
pub use outcome::{CommentOutcome, Decision, DenyReason, Grant, StatusKind};
pub use policy::{authorize, CommentAction};
pub use visibility::{resolve_visibility, RepositoryAccess};
