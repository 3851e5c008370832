use std::net::SocketAddr;

use anyhow::Context;
use learnboard::config::AppConfig;
use learnboard::services::auth::KeyRing;
use learnboard::{db, routes, AppState};
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let keys = KeyRing::load(config.jwt_secrets.clone(), config.jwt_leeway_secs)
        .context("Failed to load JWT secrets")?;
    tracing::info!(fingerprints = ?keys.fingerprints(), "Loaded JWT signing secrets");
    spawn_key_reloader(keys.clone());

    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to connect to database")?;
    db::migrate(&pool).await.context("Failed to run migrations")?;

    let host: std::net::IpAddr = config.host.parse().context("Invalid BACKEND_HOST")?;
    let addr = SocketAddr::from((host, config.port));

    let state = AppState {
        db: pool,
        config,
        keys,
    };
    let app = routes::router(state);

    tracing::info!(host = %addr, "Starting learnboard API server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Re-read signing secrets whenever the process receives SIGHUP.
#[cfg(unix)]
fn spawn_key_reloader(keys: KeyRing) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut hangups = match signal(SignalKind::hangup()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(error = %e, "SIGHUP handler unavailable; key reload disabled");
                return;
            }
        };
        while hangups.recv().await.is_some() {
            match keys.reload() {
                Ok(count) => tracing::info!(
                    count,
                    fingerprints = ?keys.fingerprints(),
                    "Reloaded JWT signing secrets"
                ),
                Err(e) => tracing::error!(error = %e, "JWT secret reload failed; keeping current secrets"),
            }
        }
    });
}

#[cfg(not(unix))]
fn spawn_key_reloader(_keys: KeyRing) {}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
