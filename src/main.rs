use std::net::SocketAddr;
use std::time::Duration;

use mimalloc::MiMalloc;
use supportbot::config::AppConfig;
use supportbot::services::{catalog, session_store::SessionStore};
use supportbot::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "supportbot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env();

    let catalog = catalog::load(&config.responses_path)?;

    let sessions = match &config.redis_url {
        Some(url) => SessionStore::redis(url, config.session_ttl_secs).await?,
        None => SessionStore::memory(Duration::from_secs(config.session_ttl_secs)),
    };
    tracing::info!(backend = sessions.backend(), "Session store ready");

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = AppState::build(config, catalog, sessions, None)?;

    let bot = state.bot.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = bot.sessions().purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "Expired sessions purged");
            }
        }
    });
    let app = supportbot::routes::router(state);

    tracing::info!(host = %addr, "Starting SupportBot server, open http://localhost:{} in a browser", addr.port());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
