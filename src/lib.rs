//! Registry Comments
//!
//! Comment service for a container image registry. Users create and delete
//! comments on repositories; who may do so depends on the visibility of the
//! repository's namespace, team ownership and authorship.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::Comment;
use infrastructure::{
    auth::{JwtConfig, JwtService},
    catalog::RegistryCatalog,
    comment::{CommentService, StorageCommentRepository},
    seed::SeedFile,
    storage::InMemoryStorage,
};
use rand::Rng;
use tracing::{info, warn};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state, loading registry data from the seed file
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let seed = match &config.seed.path {
        Some(path) => {
            info!(path = %path, "Loading seed file");
            SeedFile::load(path).await?
        }
        None => {
            warn!("No seed file configured; the registry starts empty");
            SeedFile::default()
        }
    };

    create_app_state_from_seed(seed, jwt_config(config)).await
}

/// Create the application state from already parsed seed data
pub async fn create_app_state_from_seed(
    seed: SeedFile,
    jwt: JwtConfig,
) -> anyhow::Result<AppState> {
    let catalog = RegistryCatalog::in_memory();
    let comments = Arc::new(StorageCommentRepository::new(Arc::new(
        InMemoryStorage::<Comment>::new(),
    )));

    seed.apply(&catalog, comments.as_ref()).await?;

    let user_storage = catalog.users.clone();
    let comment_service = Arc::new(CommentService::new(comments, catalog));

    Ok(AppState::new(
        comment_service,
        user_storage,
        Arc::new(JwtService::new(jwt)),
    ))
}

/// JWT configuration from config, falling back to `JWT_SECRET` and then a
/// random secret
pub fn jwt_config(config: &AppConfig) -> JwtConfig {
    let secret = config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| {
            warn!(
                "No JWT secret configured. Generating a random one; \
                tokens will NOT survive a restart. Set APP__AUTH__JWT_SECRET."
            );
            generate_random_secret()
        });

    JwtConfig::new(secret, config.auth.expiration_hours).with_issuer(config.auth.issuer.clone())
}

fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_state_is_empty() {
        let state = create_app_state().await.unwrap();

        assert_eq!(state.comment_service.count().await.unwrap(), 0);
        assert_eq!(state.user_storage.count().await.unwrap(), 0);
    }

    #[test]
    fn test_configured_secret_is_used() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some("configured".to_string());
        config.auth.expiration_hours = 2;
        config.auth.issuer = "registry.example.com".to_string();

        let jwt = jwt_config(&config);
        assert_eq!(jwt.secret, "configured");
        assert_eq!(jwt.expiration_hours, 2);
        assert_eq!(jwt.issuer, "registry.example.com");
    }

    #[test]
    fn test_random_secret() {
        let secret = generate_random_secret();
        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_broken_seed_fails_startup() {
        let seed = SeedFile::from_toml(
            r#"
            [[repositories]]
            id = "busybox"
            namespace = "nowhere"
            "#,
        )
        .unwrap();

        assert!(create_app_state_from_seed(seed, JwtConfig::default()).await.is_err());
    }
}
