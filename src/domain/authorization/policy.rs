//! Comment authorization policy
//!
//! Rules, first match wins:
//!
//! 1. Admins may do anything.
//! 2. Creating a comment depends on the repository's visibility tier:
//!    public repositories accept anyone, protected ones any logged-in user,
//!    private ones only owners of the namespace's team.
//! 3. Deleting a comment is reserved to its author.
//!
//! Payload validation is not part of the decision; it runs only after a
//! create has been allowed.

use super::actor::Actor;
use super::outcome::{Decision, DenyReason, Grant};
use super::visibility::RepositoryAccess;
use crate::domain::comment::Comment;
use crate::domain::namespace::Visibility;

/// A comment operation together with its target
#[derive(Debug, Clone, Copy)]
pub enum CommentAction<'a> {
    Create(RepositoryAccess<'a>),
    Delete(&'a Comment),
}

impl CommentAction<'_> {
    /// Stable action name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create(_) => "comment.create",
            Self::Delete(_) => "comment.delete",
        }
    }
}

/// Decide whether `actor` may perform `action`
///
/// Pure: the same inputs always yield the same decision.
pub fn authorize(actor: &Actor, action: &CommentAction<'_>) -> Decision {
    if actor.is_admin() {
        return Decision::Allow(Grant::Admin);
    }

    match action {
        CommentAction::Create(access) => authorize_create(actor, access),
        CommentAction::Delete(comment) => authorize_delete(actor, comment),
    }
}

fn authorize_create(actor: &Actor, access: &RepositoryAccess<'_>) -> Decision {
    match access.visibility() {
        Visibility::Public => Decision::Allow(Grant::PublicRepository),
        Visibility::Protected => {
            if actor.is_authenticated() {
                Decision::Allow(Grant::LoggedIn)
            } else {
                Decision::Deny(DenyReason::NotLoggedIn)
            }
        }
        Visibility::Private => {
            if actor.is_owner_of(access.team()) {
                Decision::Allow(Grant::TeamOwner)
            } else {
                Decision::Deny(DenyReason::NotTeamOwner)
            }
        }
    }
}

fn authorize_delete(actor: &Actor, comment: &Comment) -> Decision {
    if actor.is_author_of(comment) {
        Decision::Allow(Grant::Author)
    } else {
        Decision::Deny(DenyReason::NotAuthor)
    }
}
