//! yomu-cr library interface
//!
//! Exposes the resolution pipeline and HTTP surface for the binary and
//! for integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::services::{CatalogSource, ResolutionCache, ResolutionCoordinator};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolution pipeline over the configured catalog
    pub coordinator: Arc<ResolutionCoordinator>,
    /// Process-lifetime cache of merged canonical records
    pub cache: Arc<ResolutionCache>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Wire up the pipeline around the given catalog source.
    ///
    /// The cache is created here and lives for the rest of the process.
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        let cache = Arc::new(ResolutionCache::new());
        let coordinator = Arc::new(ResolutionCoordinator::new(catalog, Arc::clone(&cache)));

        Self {
            coordinator,
            cache,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::resolve_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
