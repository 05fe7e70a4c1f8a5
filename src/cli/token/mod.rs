//! Token command - issues a bearer token for a seeded user

use anyhow::Context;
use clap::Args;

use crate::config::AppConfig;
use crate::domain::user::UserId;

#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Id of the user the token is issued for
    #[arg(long)]
    pub user: String,
}

pub async fn run(args: TokenArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    if config.auth.jwt_secret.is_none() && std::env::var("JWT_SECRET").is_err() {
        anyhow::bail!("A JWT secret must be configured to issue tokens a server will accept");
    }

    let state = crate::create_app_state_with_config(&config).await?;
    let token = issue_token(&state, &args.user).await?;

    println!("{}", token);
    Ok(())
}

async fn issue_token(state: &crate::api::AppState, user: &str) -> anyhow::Result<String> {
    let user_id = UserId::new(user)?;
    let user = state
        .user_storage
        .get(&user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User '{}' not found in seed data", user_id))?;

    Ok(state.jwt_service.generate(&user)?)
}
