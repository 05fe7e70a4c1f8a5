//! Decisions and request outcomes

use serde::Serialize;

use crate::domain::comment::FieldError;

/// Status class reported to the HTTP boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Allowed and applied (200)
    Ok,
    /// Denied; "not logged in" and "not permitted" share this signal (401)
    Unauthorized,
    /// Allowed, but the payload failed validation (422)
    Unprocessable,
}

/// Why a request was allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grant {
    Admin,
    PublicRepository,
    LoggedIn,
    TeamOwner,
    Author,
}

/// Why a request was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// Protected repositories need a logged-in user
    NotLoggedIn,
    /// Private repositories need an owner of the namespace's team
    NotTeamOwner,
    /// Only the author (or an admin) may delete a comment
    NotAuthor,
}

impl DenyReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotLoggedIn => "You must be logged in to comment on this repository",
            Self::NotTeamOwner => "You are not authorized to comment on this repository",
            Self::NotAuthor => "You are not authorized to delete this comment",
        }
    }
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Verdict of the authorization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow(Grant),
    Deny(DenyReason),
}

impl Decision {
    pub fn allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    pub fn status(&self) -> StatusKind {
        match self {
            Self::Allow(_) => StatusKind::Ok,
            Self::Deny(_) => StatusKind::Unauthorized,
        }
    }
}

/// Result of a comment request once authorization and validation have run
///
/// None of these are errors: callers must handle every variant.
#[derive(Debug, Clone, PartialEq)]
pub enum CommentOutcome<T> {
    Authorized(T),
    Denied(DenyReason),
    Invalid(Vec<FieldError>),
}

impl<T> CommentOutcome<T> {
    pub fn status(&self) -> StatusKind {
        match self {
            Self::Authorized(_) => StatusKind::Ok,
            Self::Denied(_) => StatusKind::Unauthorized,
            Self::Invalid(_) => StatusKind::Unprocessable,
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized(_))
    }

    /// The applied value, if the request went through
    pub fn authorized(self) -> Option<T> {
        match self {
            Self::Authorized(value) => Some(value),
            _ => None,
        }
    }
}
