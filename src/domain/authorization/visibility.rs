//! Visibility resolution for repositories

use crate::domain::namespace::{Namespace, Visibility};
use crate::domain::repository::Repository;
use crate::domain::team::Team;

/// Resolve the effective visibility of a repository through its namespace
///
/// Total and side-effect free. Passing a namespace the repository does not
/// live in is a caller bug.
pub fn resolve_visibility(repository: &Repository, namespace: &Namespace) -> Visibility {
    debug_assert_eq!(
        repository.namespace_id(),
        namespace.id(),
        "repository resolved against a foreign namespace"
    );

    namespace.visibility()
}

/// Snapshot of everything the policy needs to decide about a repository
#[derive(Debug, Clone, Copy)]
pub struct RepositoryAccess<'a> {
    repository: &'a Repository,
    visibility: Visibility,
    team: &'a Team,
}

impl<'a> RepositoryAccess<'a> {
    /// Build the access snapshot from the repository's ownership chain
    pub fn resolve(repository: &'a Repository, namespace: &'a Namespace, team: &'a Team) -> Self {
        debug_assert_eq!(
            namespace.team_id(),
            team.id(),
            "namespace resolved against a foreign team"
        );

        Self {
            repository,
            visibility: resolve_visibility(repository, namespace),
            team,
        }
    }

    pub fn repository(&self) -> &'a Repository {
        self.repository
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn team(&self) -> &'a Team {
        self.team
    }
}
