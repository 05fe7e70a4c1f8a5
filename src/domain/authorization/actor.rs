//! The actor a decision is made for

use crate::domain::comment::Comment;
use crate::domain::team::Team;
use crate::domain::user::{User, UserId};

/// Who is asking
///
/// Passed explicitly into every decision; nothing is read from ambient
/// session state.
#[derive(Debug, Clone)]
pub enum Actor {
    /// No credentials were presented
    Anonymous,
    /// A logged-in user (possibly an admin)
    User(User),
}

impl Actor {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user),
        }
    }

    pub fn id(&self) -> Option<&UserId> {
        self.user().map(User::id)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::is_admin)
    }

    /// Capability check: does this actor own the given team?
    pub fn is_owner_of(&self, team: &Team) -> bool {
        self.id().is_some_and(|id| team.is_owner(id))
    }

    /// Capability check: did this actor write the given comment?
    ///
    /// Anonymous actors never author anything, even anonymous comments.
    pub fn is_author_of(&self, comment: &Comment) -> bool {
        self.id().is_some_and(|id| comment.is_authored_by(id))
    }

    /// Identifier used in logs
    pub fn identifier(&self) -> String {
        match self {
            Self::Anonymous => "anonymous".to_string(),
            Self::User(user) => format!("user:{}", user.id()),
        }
    }
}

impl From<User> for Actor {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}
