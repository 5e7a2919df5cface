//! Wedding site form-submission server.
//!
//! Serves the built frontend, takes contact and RSVP form posts, persists
//! them to the flat-file store, and fans out best-effort email/spreadsheet
//! notifications that never block the HTTP response.

pub mod config;
pub mod handlers;
pub mod mailer;
pub mod notify;
pub mod sheets;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use vivaah_common::store::SubmissionStore;

use crate::mailer::Mailer;
use crate::sheets::SheetsClient;

/// Shared state handed to every request handler. Constructed once at
/// startup; the notification clients are absent when unconfigured.
pub struct AppState {
    pub store: SubmissionStore,
    pub mailer: Option<Arc<Mailer>>,
    pub sheets: Option<Arc<SheetsClient>>,
    pub started: Instant,
}

/// Assemble the full router: API routes, permissive CORS, request tracing,
/// and the static frontend with an `index.html` fallback for client-side
/// routing.
pub fn app(state: Arc<AppState>, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let frontend = ServeDir::new(static_dir)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/contact", post(handlers::submit_contact))
        .route("/api/rsvp", post(handlers::submit_rsvp))
        .route("/api/submissions", get(handlers::list_submissions))
        .route("/api/rsvps", get(handlers::list_rsvps))
        .route("/api/rsvp-stats", get(handlers::rsvp_stats))
        .route("/api/health", get(handlers::health))
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
