use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::rth::handlers;
use crate::features::rth::services::RthService;

/// Create routes for the RTH reference data
pub fn routes(rth_service: Arc<RthService>) -> Router {
    Router::new()
        .route("/api/rth", get(handlers::list_rth))
        .route("/api/rth/{id}", get(handlers::get_rth))
        .route("/api/rth/{id}/reports", get(handlers::list_rth_reports))
        .route("/api/rth/{id}/reviews", get(handlers::list_rth_reviews))
        .with_state(rth_service)
}
