use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use diabp_core::CoreConfig;
use diabp_core::config::{analytics_days_from_env_value, analytics_seed_from_env_value};

/// Main entry point for the DiaBP service
///
/// Resolves configuration once from the environment (and an optional `.env` file), then
/// serves the REST API until the process is stopped.
///
/// # Environment Variables
/// - `DIABP_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `DIABP_ANALYTICS_DAYS`: default analytics window in days (default: 28)
/// - `DIABP_ANALYTICS_SEED`: fixed analytics seed (default: unset, values vary per request)
/// - `DIABP_API_KEY`: when set, required in the `x-api-key` header of every route but `/health`
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("diabp_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("DIABP_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let analytics_days = analytics_days_from_env_value(std::env::var("DIABP_ANALYTICS_DAYS").ok())?;
    let analytics_seed = analytics_seed_from_env_value(std::env::var("DIABP_ANALYTICS_SEED").ok())?;
    let cfg = Arc::new(CoreConfig::new(analytics_days, analytics_seed)?);
    let api_key = std::env::var("DIABP_API_KEY").ok();

    if api_key.as_deref().is_some_and(|k| !k.trim().is_empty()) {
        tracing::info!("API key required on protected routes");
    } else {
        tracing::warn!("DIABP_API_KEY not set; all routes are open");
    }

    tracing::info!("++ Starting DiaBP REST on {}", rest_addr);
    api_rest::serve(&rest_addr, AppState::new(cfg, api_key)).await
}
