//! Fetch and normalize a Tropipay profile
//!
//! This example demonstrates:
//! 1. Building the provider from `TROPIPAY_*` environment variables (or a `.env` file)
//! 2. Printing the authorization URL the host would redirect to
//! 3. Fetching the profile with an access token and printing the normalized user

use anyhow::{Context, Result};
use ras_identity_tropipay::{OAuthProvider, UserinfoContext, tropipay};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let provider = tropipay(None).context("Failed to configure Tropipay provider")?;
    let config = provider.config();

    info!("Provider {} ({})", config.name, config.id);
    println!("Authorize at: {}", config.authorization.to_url()?);
    println!("Token endpoint: {}", config.token.url);

    let access_token = std::env::var("TROPIPAY_ACCESS_TOKEN")
        .context("TROPIPAY_ACCESS_TOKEN environment variable is required to fetch a profile")?;

    let user = provider
        .fetch_user(&UserinfoContext::from_access_token(access_token))
        .await?;

    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}
