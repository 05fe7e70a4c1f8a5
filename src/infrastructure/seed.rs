//! Seed file loading
//!
//! Users, teams, namespaces and repositories are owned by the wider registry;
//! this service reads them from a TOML file at startup.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::comment::{validate_comment, Comment, CommentAttributes, CommentRepository};
use crate::domain::namespace::{Namespace, NamespaceId, Visibility};
use crate::domain::repository::{Repository, RepositoryId};
use crate::domain::team::{Team, TeamId};
use crate::domain::user::{User, UserId};
use crate::domain::DomainError;
use crate::infrastructure::catalog::RegistryCatalog;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedFile {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub teams: Vec<SeedTeam>,
    #[serde(default)]
    pub namespaces: Vec<SeedNamespace>,
    #[serde(default)]
    pub repositories: Vec<SeedRepository>,
    #[serde(default)]
    pub comments: Vec<SeedComment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedTeam {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub owners: Vec<UserId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedNamespace {
    pub id: NamespaceId,
    /// Defaults to the id
    pub name: Option<String>,
    pub team: TeamId,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedRepository {
    pub id: RepositoryId,
    /// Defaults to the id
    pub name: Option<String>,
    pub namespace: NamespaceId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedComment {
    pub repository: RepositoryId,
    /// Omit for an anonymous comment
    pub author: Option<UserId>,
    pub body: String,
}

/// Number of entities written by [`SeedFile::apply`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub teams: usize,
    pub namespaces: usize,
    pub repositories: usize,
    pub comments: usize,
}

impl SeedFile {
    pub fn from_toml(content: &str) -> Result<Self, DomainError> {
        toml::from_str(content)
            .map_err(|e| DomainError::configuration(format!("Invalid seed file: {}", e)))
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read seed file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), "Loaded seed file");
        Self::from_toml(&content)
    }

    /// Check that every reference points at a declared entity
    pub fn validate(&self) -> Result<(), DomainError> {
        let users = unique("user", self.users.iter().map(|u| u.id.as_str()))?;
        let teams = unique("team", self.teams.iter().map(|t| t.id.as_str()))?;
        let namespaces = unique("namespace", self.namespaces.iter().map(|n| n.id.as_str()))?;
        unique("repository", self.repositories.iter().map(|r| r.id.as_str()))?;

        for team in &self.teams {
            if let Some(owner) = team.owners.iter().find(|o| !users.contains(o.as_str())) {
                return Err(DomainError::configuration(format!(
                    "Team '{}' lists unknown owner '{}'",
                    team.id, owner
                )));
            }
        }

        for namespace in &self.namespaces {
            if !teams.contains(namespace.team.as_str()) {
                return Err(DomainError::configuration(format!(
                    "Namespace '{}' references unknown team '{}'",
                    namespace.id, namespace.team
                )));
            }
        }

        let repositories: HashSet<&str> = self.repositories.iter().map(|r| r.id.as_str()).collect();
        for repository in &self.repositories {
            if !namespaces.contains(repository.namespace.as_str()) {
                return Err(DomainError::configuration(format!(
                    "Repository '{}' references unknown namespace '{}'",
                    repository.id, repository.namespace
                )));
            }
        }

        for comment in &self.comments {
            if !repositories.contains(comment.repository.as_str()) {
                return Err(DomainError::configuration(format!(
                    "Comment references unknown repository '{}'",
                    comment.repository
                )));
            }

            if let Some(author) = comment.author.as_ref().filter(|a| !users.contains(a.as_str())) {
                return Err(DomainError::configuration(format!(
                    "Comment on '{}' references unknown author '{}'",
                    comment.repository, author
                )));
            }
        }

        Ok(())
    }

    /// Validate, then write every entity into the catalog and comment store
    pub async fn apply(
        self,
        catalog: &RegistryCatalog,
        comments: &dyn CommentRepository,
    ) -> Result<SeedSummary, DomainError> {
        self.validate()?;

        let mut summary = SeedSummary::default();

        for seed in self.users {
            catalog
                .users
                .create(User::new(seed.id, seed.username).with_admin(seed.admin))
                .await?;
            summary.users += 1;
        }

        for seed in self.teams {
            let team = Team::new(seed.id.clone(), seed.name)
                .map_err(|e| {
                    DomainError::configuration(format!("Invalid team '{}': {}", seed.id, e))
                })?
                .with_owners(seed.owners);
            catalog.teams.create(team).await?;
            summary.teams += 1;
        }

        for seed in self.namespaces {
            let name = seed.name.unwrap_or_else(|| seed.id.to_string());
            catalog
                .namespaces
                .create(Namespace::new(seed.id, name, seed.team, seed.visibility))
                .await?;
            summary.namespaces += 1;
        }

        for seed in self.repositories {
            let name = seed.name.unwrap_or_else(|| seed.id.to_string());
            catalog
                .repositories
                .create(Repository::new(seed.id, name, seed.namespace))
                .await?;
            summary.repositories += 1;
        }

        for seed in self.comments {
            let body = validate_comment(&CommentAttributes::with_body(seed.body)).map_err(|errors| {
                let reasons: Vec<String> =
                    errors.iter().map(|e| format!("{} {}", e.field, e.message)).collect();
                DomainError::configuration(format!(
                    "Invalid comment on '{}': {}",
                    seed.repository,
                    reasons.join(", ")
                ))
            })?;
            comments
                .create(Comment::new(seed.repository, seed.author, body))
                .await?;
            summary.comments += 1;
        }

        info!(
            users = summary.users,
            teams = summary.teams,
            namespaces = summary.namespaces,
            repositories = summary.repositories,
            comments = summary.comments,
            "Seed data applied"
        );

        Ok(summary)
    }
}

fn unique<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, DomainError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DomainError::configuration(format!(
                "Duplicate {} '{}' in seed file",
                kind, id
            )));
        }
    }
    Ok(seen)
}
