//! Team domain module
//!
//! Teams own namespaces. Team ownership is the capability that opens private
//! namespaces to non-admin users.

mod entity;

pub use entity::{validate_team_name, Team, TeamId, TeamValidationError};
