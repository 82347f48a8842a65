mod config;
mod errors;
mod geo;
mod keywords;
mod matching;
mod models;
mod normalize;
mod routes;
mod source;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::geo::{fetch_state_table, StateGeoTable};
use crate::matching::similarity::TfIdfScorer;
use crate::normalize::normalize_dataset;
use crate::routes::build_router;
use crate::source::load_dataset;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch v{}", env!("CARGO_PKG_VERSION"));

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    // Load and normalize the listings once; requests only read them.
    let mut dataset = load_dataset(&http, &config.dataset_url)
        .await
        .with_context(|| format!("Failed to load dataset from {}", config.dataset_url))?;
    normalize_dataset(&mut dataset);
    if dataset.is_empty() {
        warn!("Dataset at {} has no listings", config.dataset_url);
    }

    let geo = match &config.state_geo_url {
        Some(url) => fetch_state_table(&http, url)
            .await
            .with_context(|| format!("Failed to load state boundaries from {url}"))?,
        None => {
            info!("STATE_GEO_URL is empty; using built-in state table");
            StateGeoTable::builtin().clone()
        }
    };

    // Similarity backend (TfIdfScorer by default)
    let scorer = Arc::new(TfIdfScorer);

    let state = AppState::new(dataset, geo, &config.default_title, scorer);
    info!(
        "Dashboard ready: {} listings, {} titles, default title {:?}",
        state.dataset.len(),
        state.dimensions.titles.len(),
        state.dimensions.default_title
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
