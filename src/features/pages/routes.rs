use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::pages::handlers;
use crate::features::pages::services::PageService;

/// Public pages
pub fn routes(page_service: Arc<PageService>) -> Router {
    Router::new()
        .route("/", get(handlers::index_page))
        .route("/peta", get(handlers::peta_page))
        .route(
            "/laporan",
            get(handlers::laporan_page).post(handlers::submit_laporan),
        )
        .route(
            "/review",
            get(handlers::review_page).post(handlers::submit_review),
        )
        .with_state(page_service)
}

/// Admin dashboard pages, kept apart so they can sit behind basic auth
pub fn admin_routes(page_service: Arc<PageService>) -> Router {
    Router::new()
        .route("/admin", get(handlers::admin_page))
        .route(
            "/admin/laporan/{id}/status",
            post(handlers::change_report_status),
        )
        .with_state(page_service)
}
