use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reviews::dtos::ReviewResponseDto;
use crate::features::rth::dtos::RthDetailDto;
use crate::features::rth::models::RthFeature;
use crate::features::rth::services::RthService;
use crate::shared::types::{ApiResponse, Meta};

/// List RTH locations sorted by name
#[utoipa::path(
    get,
    path = "/api/rth",
    responses(
        (status = 200, description = "All RTH locations", body = ApiResponse<Vec<RthFeature>>)
    ),
    tag = "rth"
)]
pub async fn list_rth(State(service): State<Arc<RthService>>) -> Json<ApiResponse<Vec<RthFeature>>> {
    let features = service.list();
    let meta = Meta {
        total: features.len() as i64,
    };
    Json(ApiResponse::success(Some(features), None, Some(meta)))
}

/// Detail panel data for one location
#[utoipa::path(
    get,
    path = "/api/rth/{id}",
    params(
        ("id" = i32, Path, description = "RTH OBJECTID")
    ),
    responses(
        (status = 200, description = "RTH found", body = ApiResponse<RthDetailDto>),
        (status = 404, description = "RTH not found")
    ),
    tag = "rth"
)]
pub async fn get_rth(
    State(service): State<Arc<RthService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RthDetailDto>>> {
    let detail = service.get(id)?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}

/// Reports filed against one location, newest first
#[utoipa::path(
    get,
    path = "/api/rth/{id}/reports",
    params(
        ("id" = i32, Path, description = "RTH OBJECTID")
    ),
    responses(
        (status = 200, description = "Reports for the location", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 404, description = "RTH not found")
    ),
    tag = "rth"
)]
pub async fn list_rth_reports(
    State(service): State<Arc<RthService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.reports(id).await?;
    Ok(Json(ApiResponse::success(Some(reports), None, None)))
}

/// Reviews of one location, newest first
#[utoipa::path(
    get,
    path = "/api/rth/{id}/reviews",
    params(
        ("id" = i32, Path, description = "RTH OBJECTID")
    ),
    responses(
        (status = 200, description = "Reviews for the location", body = ApiResponse<Vec<ReviewResponseDto>>),
        (status = 404, description = "RTH not found")
    ),
    tag = "rth"
)]
pub async fn list_rth_reviews(
    State(service): State<Arc<RthService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<ReviewResponseDto>>>> {
    let reviews = service.reviews(id).await?;
    Ok(Json(ApiResponse::success(Some(reviews), None, None)))
}
