//! Terminal analytics dashboard.
//!
//! Usage: `cargo run --bin dashboard`
//!
//! Reads `DASHBOARD_API_URL`, `DASHBOARD_TOKEN` and `DASHBOARD_TIMEOUT_SECS`
//! (reads .env). The report goes to stdout; diagnostics go to stderr.

use anyhow::Context;
use learnboard::config::DashboardConfig;
use learnboard::view::{self, AnalyticsView, HttpSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "learnboard=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = DashboardConfig::from_env().context("Failed to load dashboard configuration")?;
    if config.token.is_none() {
        tracing::warn!("DASHBOARD_TOKEN is not set; gated endpoints will answer 401");
    }

    let source = HttpSource::new(&config).context("Failed to build HTTP client")?;
    let mut dashboard = AnalyticsView::new(source);

    eprint!("{}", view::render(&dashboard));
    dashboard.activate().await;
    print!("{}", view::render(&dashboard));

    Ok(())
}
