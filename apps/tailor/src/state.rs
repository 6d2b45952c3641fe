use std::sync::Arc;

use crate::pipeline::TailorPipeline;
use crate::store::ArtifactStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: TailorPipeline,
    /// Same store the pipeline writes to; download routes only read from it.
    pub store: Arc<ArtifactStore>,
}

impl AppState {
    pub fn new(pipeline: TailorPipeline) -> Self {
        let store = Arc::clone(&pipeline.store);
        Self { pipeline, store }
    }
}
