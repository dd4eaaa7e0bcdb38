use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::features::reports::dtos::{ReportResponseDto, ReportSubmission, ReportUploadForm};
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Meta};

/// Submit a citizen report
///
/// Accepts multipart/form-data with `nama_pelapor`, `rth_id`, `kategori`,
/// `deskripsi` and an optional `foto` image.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body(
        content = ReportUploadForm,
        content_type = "multipart/form-data",
        description = "Report form with an optional photo",
    ),
    responses(
        (status = 201, description = "Report stored", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Report could not be stored")
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    let submission = ReportSubmission::from_multipart(multipart).await?;
    let report = service
        .submit(&submission.form.to_dto(), submission.photo)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(service.to_response(report)),
            Some("Laporan berhasil dikirim! Terima kasih atas partisipasi Anda.".to_string()),
            None,
        )),
    ))
}

/// List all reports, newest first
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "All reports", body = ApiResponse<Vec<ReportResponseDto>>)
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
) -> Json<ApiResponse<Vec<ReportResponseDto>>> {
    let reports = service.list().await;
    let meta = Meta {
        total: reports.len() as i64,
    };
    Json(ApiResponse::success(Some(reports), None, Some(meta)))
}
