//! catalog-api library interface
//!
//! Artist catalog service: list, read and create artist records and store
//! uploaded audio previews. Exposes the router for the server binary and for
//! integration tests.

pub mod api;
pub mod db;
pub mod error;
pub mod seed;
pub mod services;
pub mod validation;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::db::ArtistStore;
use crate::services::{CatalogService, UploadService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Artist list/read/create operations
    pub catalog: CatalogService,
    /// Upload persistence into the static directory
    pub uploads: UploadService,
    /// Apply the allow-everything CORS policy
    pub cors_permissive: bool,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog: CatalogService::new(ArtistStore::new(db)),
            uploads: UploadService::new(static_dir),
            cors_permissive: false,
            startup_time: Utc::now(),
        }
    }

    pub fn with_permissive_cors(mut self, enabled: bool) -> Self {
        self.cors_permissive = enabled;
        self
    }
}

/// Build application router
///
/// Uploaded files are served read-only under `/static`.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(state.uploads.static_dir());
    let cors_permissive = state.cors_permissive;

    let router = Router::new()
        .route("/artists", get(api::list_artists).post(api::create_artist))
        .route("/artists/:artist_id", get(api::get_artist))
        .route(
            "/upload-audio/",
            post(api::upload_audio).layer(DefaultBodyLimit::disable()),
        )
        .merge(api::health_routes())
        .nest_service("/static", static_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
