use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cms_admin_api::{app, config::AppConfig, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, MOCK_AUTH_ENABLED, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = AppConfig::from_env();
    info!("Starting CMS admin API in {:?} mode", config.environment);

    if config.auth.mock_auth_enabled {
        warn!(
            mock_user_id = %config.auth.mock_user_id,
            "Mock auth enabled: every caller is treated as the mock user"
        );
    } else if config.auth.signature_policy.is_verified() {
        info!("Bearer tokens are verified with HS256");
    } else {
        warn!("Bearer tokens are decoded without signature verification; set JWT_SECRET to verify them");
    }

    let pool = database::connect_lazy(&config.database)?;
    let bind_addr = config.bind_addr();
    let state = AppState::new(config, pool);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("CMS admin API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
