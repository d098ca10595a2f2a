//! Route handlers for the web interface.

pub mod clients;
pub mod dashboard;
pub mod health;
pub mod preferences;
pub mod reports;
pub mod work_days;
pub mod workers;

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // HTML pages
        .route("/", get(dashboard::dashboard_page))
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/api/stats", get(dashboard::stats_api))
        .route("/api/clients", get(clients::list_api).post(clients::create_api))
        .route(
            "/api/clients/:id",
            put(clients::update_api).delete(clients::delete_api),
        )
        .route("/api/workers", get(workers::list_api).post(workers::create_api))
        .route("/api/workers/dedupe", post(workers::dedupe_api))
        .route("/api/workers/:id", axum::routing::delete(workers::delete_api))
        .route("/api/reports", get(reports::list_api).post(reports::create_api))
        .route("/api/reports/:id", axum::routing::delete(reports::delete_api))
        .route("/api/work-days/:id", axum::routing::delete(work_days::delete_api))
        .route("/api/work-days/:id/status", patch(work_days::status_api))
        .route("/api/work-days/:id/note", patch(work_days::note_api))
        .route("/api/work-days/:id/date", patch(work_days::date_api))
        .route(
            "/api/preferences",
            get(preferences::get_api).put(preferences::put_api),
        )
}
