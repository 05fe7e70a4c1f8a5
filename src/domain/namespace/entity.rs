//! Namespace entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::visibility::Visibility;
use crate::domain::storage::StorageEntity;
use crate::domain::team::TeamId;
use crate::domain::validation::string_id;

string_id!(
    /// Namespace identifier - alphanumeric + hyphens, max 50 characters
    NamespaceId,
    "Namespace"
);

/// A namespace groups repositories under one team and one visibility tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Namespace {
    id: NamespaceId,
    name: String,
    team_id: TeamId,
    visibility: Visibility,
    created_at: DateTime<Utc>,
}

impl Namespace {
    pub fn new(
        id: NamespaceId,
        name: impl Into<String>,
        team_id: TeamId,
        visibility: Visibility,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            team_id,
            visibility,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &NamespaceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for Namespace {
    type Key = NamespaceId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
