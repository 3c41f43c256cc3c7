use std::sync::Arc;

use crate::archive::DocumentArchive;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SessionStore>,
    pub llm: LlmClient,
    /// `None` when S3_BUCKET is unset; uploads are then analyzed but not archived.
    pub archive: Option<Arc<dyn DocumentArchive>>,
    pub config: Config,
}
