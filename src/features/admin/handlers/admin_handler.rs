use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::admin::dtos::*;
use crate::features::admin::services::AdminService;
use crate::features::reports::dtos::{ReportResponseDto, UpdateReportStatusDto};
use crate::shared::types::{ApiResponse, Meta};

/// Statistics cards for the dashboard
#[utoipa::path(
    get,
    path = "/api/admin/summary",
    responses(
        (status = 200, description = "Report and review totals", body = ApiResponse<AdminSummaryDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn get_summary(
    State(service): State<Arc<AdminService>>,
) -> Json<ApiResponse<AdminSummaryDto>> {
    Json(ApiResponse::success(Some(service.summary().await), None, None))
}

/// Report table, optionally filtered by status
#[utoipa::path(
    get,
    path = "/api/admin/reports",
    params(AdminReportQuery),
    responses(
        (status = 200, description = "Filtered reports", body = ApiResponse<AdminReportListDto>),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn list_reports(
    State(service): State<Arc<AdminService>>,
    Query(query): Query<AdminReportQuery>,
) -> Result<Json<ApiResponse<AdminReportListDto>>> {
    let status = query.status_filter().map_err(AppError::BadRequest)?;
    let list = service.reports(status).await;
    let meta = Meta {
        total: list.total as i64,
    };

    Ok(Json(ApiResponse::success(Some(list), None, Some(meta))))
}

/// Move a report to another status
#[utoipa::path(
    patch,
    path = "/api/admin/reports/{id}/status",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    request_body = UpdateReportStatusDto,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn update_report_status(
    State(service): State<Arc<AdminService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateReportStatusDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.set_status(&id, dto.status).await?;
    let message = format!("Status berhasil diubah ke \"{}\"", dto.status);

    Ok(Json(ApiResponse::success(Some(report), Some(message), None)))
}

/// Delete a report
#[utoipa::path(
    delete,
    path = "/api/admin/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn delete_report(
    State(service): State<Arc<AdminService>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    service.delete_report(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Ratings leaderboard with its summary header
#[utoipa::path(
    get,
    path = "/api/admin/ratings",
    responses(
        (status = 200, description = "Ratings per location", body = ApiResponse<AdminRatingsDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn get_ratings(
    State(service): State<Arc<AdminService>>,
) -> Json<ApiResponse<AdminRatingsDto>> {
    Json(ApiResponse::success(Some(service.ratings().await), None, None))
}
