use std::sync::Arc;

use axum::{
    routing::{delete, get, patch},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create admin API routes, mounted under `/api/admin`
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/reports", get(handlers::list_reports))
        .route("/reports/{id}", delete(handlers::delete_report))
        .route(
            "/reports/{id}/status",
            patch(handlers::update_report_status),
        )
        .route("/ratings", get(handlers::get_ratings))
        .with_state(admin_service)
}
