//! Registry catalog - the read-side lookups comment decisions depend on

use std::sync::Arc;

use crate::domain::namespace::Namespace;
use crate::domain::repository::Repository;
use crate::domain::storage::Storage;
use crate::domain::team::Team;
use crate::domain::user::User;
use crate::infrastructure::storage::InMemoryStorage;

/// Handles to the user, team, namespace and repository stores
#[derive(Debug, Clone)]
pub struct RegistryCatalog {
    pub users: Arc<dyn Storage<User>>,
    pub teams: Arc<dyn Storage<Team>>,
    pub namespaces: Arc<dyn Storage<Namespace>>,
    pub repositories: Arc<dyn Storage<Repository>>,
}

impl RegistryCatalog {
    /// Create an empty catalog backed by in-memory storage
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryStorage::<User>::new()),
            teams: Arc::new(InMemoryStorage::<Team>::new()),
            namespaces: Arc::new(InMemoryStorage::<Namespace>::new()),
            repositories: Arc::new(InMemoryStorage::<Repository>::new()),
        }
    }
}

impl Default for RegistryCatalog {
    fn default() -> Self {
        Self::in_memory()
    }
}
