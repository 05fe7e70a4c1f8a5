//! Team entity and related types

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::storage::StorageEntity;
use crate::domain::user::UserId;
use crate::domain::validation::string_id;

string_id!(
    /// Team identifier - alphanumeric + hyphens, max 50 characters
    TeamId,
    "Team"
);

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),
}

const MAX_TEAM_NAME_LENGTH: usize = 100;

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.len() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

/// Team entity
///
/// A team owns namespaces. Its owners are the only non-admin users allowed
/// to comment on repositories in the team's private namespaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Display name
    name: String,
    /// Users owning the team
    #[serde(default)]
    owners: BTreeSet<UserId>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team without owners
    pub fn new(id: TeamId, name: impl Into<String>) -> Result<Self, TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id,
            name,
            owners: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Set the owners (builder pattern)
    pub fn with_owners(mut self, owners: impl IntoIterator<Item = UserId>) -> Self {
        self.owners = owners.into_iter().collect();
        self
    }

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owners(&self) -> impl Iterator<Item = &UserId> {
        self.owners.iter()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check whether the given user owns this team
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        self.owners.contains(user_id)
    }

    /// Add an owner, returns false if the user already owned the team
    pub fn add_owner(&mut self, user_id: UserId) -> bool {
        let added = self.owners.insert(user_id);

        if added {
            self.touch();
        }

        added
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Team {
    type Key = TeamId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
