mod archive;
mod config;
mod cover_letter;
mod db;
mod errors;
mod extraction;
mod interview;
mod job;
mod llm_client;
mod models;
mod profile;
mod resume;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::archive::{DocumentArchive, S3Archive};
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgStore;

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

    info!("Starting prepcoach API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(pool));

    // Initialize LLM client
    let llm = LlmClient::gemini(config.gemini_api_key.clone(), config.gemini_model.clone())?;
    info!("LLM client initialized (model: {})", config.gemini_model);

    // Initialize S3 / MinIO archive, if configured
    let archive: Option<Arc<dyn DocumentArchive>> = match &config.archive {
        Some(archive_config) => {
            let archive = S3Archive::from_config(archive_config).await;
            info!("Upload archive enabled (bucket: {})", archive_config.bucket);
            Some(Arc::new(archive))
        }
        None => {
            info!("S3_BUCKET not set, uploads will not be archived");
            None
        }
    };

    let state = AppState {
        store,
        llm,
        archive,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
