use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::reviews::handlers;
use crate::features::reviews::services::ReviewService;

/// Create routes for the reviews feature
pub fn routes(review_service: Arc<ReviewService>) -> Router {
    Router::new()
        .route(
            "/api/reviews",
            get(handlers::list_reviews).post(handlers::create_review),
        )
        .route("/api/reviews/ratings", get(handlers::list_ratings))
        .with_state(review_service)
}
