use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::reviews::dtos::{CreateReviewDto, RatingRecapDto, ReviewResponseDto};
use crate::features::reviews::services::ReviewService;
use crate::shared::types::{ApiResponse, Meta};

/// Submit a review
#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review stored", body = ApiResponse<ReviewResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Review could not be stored")
    ),
    tag = "reviews"
)]
pub async fn create_review(
    State(service): State<Arc<ReviewService>>,
    AppJson(dto): AppJson<CreateReviewDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewResponseDto>>)> {
    let review = service.submit(&dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(service.to_response(review)),
            Some("Review berhasil dikirim! Terima kasih atas ulasan Anda.".to_string()),
            None,
        )),
    ))
}

/// List all reviews, newest first
#[utoipa::path(
    get,
    path = "/api/reviews",
    responses(
        (status = 200, description = "All reviews", body = ApiResponse<Vec<ReviewResponseDto>>)
    ),
    tag = "reviews"
)]
pub async fn list_reviews(
    State(service): State<Arc<ReviewService>>,
) -> Json<ApiResponse<Vec<ReviewResponseDto>>> {
    let reviews = service.list().await;
    let meta = Meta {
        total: reviews.len() as i64,
    };
    Json(ApiResponse::success(Some(reviews), None, Some(meta)))
}

/// Average rating per location, best first
#[utoipa::path(
    get,
    path = "/api/reviews/ratings",
    responses(
        (status = 200, description = "Rating recap", body = ApiResponse<Vec<RatingRecapDto>>)
    ),
    tag = "reviews"
)]
pub async fn list_ratings(
    State(service): State<Arc<ReviewService>>,
) -> Json<ApiResponse<Vec<RatingRecapDto>>> {
    Json(ApiResponse::success(Some(service.recap().await), None, None))
}
