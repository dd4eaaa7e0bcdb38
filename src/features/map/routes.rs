use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::map::handlers;
use crate::features::map::services::MapService;

/// Create routes for the map feature
pub fn routes(map_service: Arc<MapService>) -> Router {
    Router::new()
        .route("/api/map/layer", get(handlers::get_layer))
        .route("/api/map/summary", get(handlers::get_summary))
        .route("/api/map/export", get(handlers::export_csv))
        .with_state(map_service)
}
