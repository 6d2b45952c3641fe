mod config;
mod errors;
mod extract;
mod llm_client;
mod pipeline;
mod render;
mod rewriter;
mod routes;
mod scoring;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extract::{HttpPageFetcher, PdfResumeExtractor};
use crate::llm_client::LlmClient;
use crate::pipeline::TailorPipeline;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::ArtifactStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_api_url.clone(),
        config.openai_model.clone(),
        config.llm_timeout,
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm.model(),
        config.llm_timeout
    );

    let fetcher = HttpPageFetcher::new(config.fetch_timeout)?;

    let store = Arc::new(ArtifactStore::new(
        config.artifact_ttl,
        config.artifact_max_entries,
    ));
    info!(
        "Artifact store: ttl={:?}, max_entries={}",
        config.artifact_ttl, config.artifact_max_entries
    );
    spawn_store_sweeper(Arc::clone(&store), config.artifact_ttl);

    let pipeline = TailorPipeline {
        fetcher: Arc::new(fetcher),
        extractor: Arc::new(PdfResumeExtractor),
        writer: Arc::new(llm),
        store,
    };

    let app = build_router(AppState::new(pipeline))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drops expired bundles so memory is released even when no new
/// submissions arrive to trigger cleanup on insert.
fn spawn_store_sweeper(store: Arc<ArtifactStore>, ttl: Duration) {
    let period = ttl.clamp(Duration::from_secs(1), Duration::from_secs(60));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let purged = store.purge_expired();
            if purged > 0 {
                debug!("Purged {purged} expired artifact bundles");
            }
        }
    });
}
