use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::map::dtos::{MapLayerDto, MapSummaryDto};
use crate::features::map::filter::{FilterCriteria, FilterQuery};
use crate::features::map::services::{MapService, DEFAULT_ZOOM};
use crate::shared::types::ApiResponse;

fn criteria_from(query: FilterQuery) -> Result<FilterCriteria> {
    query.into_criteria().map_err(AppError::Validation)
}

/// Filtered, styled and clustered RTH markers
#[utoipa::path(
    get,
    path = "/api/map/layer",
    params(FilterQuery),
    responses(
        (status = 200, description = "Clusters and markers for the zoom level", body = ApiResponse<MapLayerDto>),
        (status = 400, description = "Unknown facility filter")
    ),
    tag = "map"
)]
pub async fn get_layer(
    State(service): State<Arc<MapService>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<ApiResponse<MapLayerDto>>> {
    let zoom = query.zoom.unwrap_or(DEFAULT_ZOOM);
    let criteria = criteria_from(query)?;
    let layer = service.layer(&criteria, zoom);
    Ok(Json(ApiResponse::success(Some(layer), None, None)))
}

/// Statistics for the features passing the filter
#[utoipa::path(
    get,
    path = "/api/map/summary",
    params(FilterQuery),
    responses(
        (status = 200, description = "Visible count, total area and per-category counts", body = ApiResponse<MapSummaryDto>),
        (status = 400, description = "Unknown facility filter")
    ),
    tag = "map"
)]
pub async fn get_summary(
    State(service): State<Arc<MapService>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<ApiResponse<MapSummaryDto>>> {
    let criteria = criteria_from(query)?;
    Ok(Json(ApiResponse::success(
        Some(service.summary(&criteria)),
        None,
        None,
    )))
}

/// Download the features passing the filter as CSV
#[utoipa::path(
    get,
    path = "/api/map/export",
    params(FilterQuery),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv"),
        (status = 400, description = "Nothing to export")
    ),
    tag = "map"
)]
pub async fn export_csv(
    State(service): State<Arc<MapService>>,
    Query(query): Query<FilterQuery>,
) -> Result<Response> {
    let criteria = criteria_from(query)?;
    let export = service.export_csv(&criteria, chrono::Utc::now())?;

    tracing::info!("Exported {} bytes as {}", export.content.len(), export.filename);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.content,
    )
        .into_response())
}
