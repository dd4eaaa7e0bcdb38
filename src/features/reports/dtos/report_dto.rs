use axum::extract::Multipart;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::reports::models::{Report, ReportPhoto, ReportStatus};
use crate::features::rth::reference::ReferenceIndex;
use crate::features::statistics::resolve_feature_name;
use crate::shared::constants::MAX_PHOTO_SIZE;
use crate::shared::format::format_date_long;

/// Validated report submission
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    #[validate(length(min = 1, max = 100, message = "Nama pelapor wajib diisi"))]
    pub nama_pelapor: String,
    #[validate(range(min = 1, message = "Silakan pilih lokasi RTH"))]
    pub rth_id: i32,
    #[validate(length(min = 1, message = "Kategori laporan wajib dipilih"))]
    pub kategori: String,
    #[validate(length(min = 1, max = 2000, message = "Deskripsi masalah wajib diisi"))]
    pub deskripsi: String,
}

/// Raw report form fields, kept as typed so the form can be re-rendered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportForm {
    #[serde(default)]
    pub nama_pelapor: String,
    #[serde(default)]
    pub rth_id: String,
    #[serde(default)]
    pub kategori: String,
    #[serde(default)]
    pub deskripsi: String,
}

impl ReportForm {
    pub fn to_dto(&self) -> CreateReportDto {
        CreateReportDto {
            nama_pelapor: self.nama_pelapor.trim().to_string(),
            rth_id: self.rth_id.trim().parse().unwrap_or(0),
            kategori: self.kategori.trim().to_string(),
            deskripsi: self.deskripsi.trim().to_string(),
        }
    }
}

/// A parsed multipart report submission
#[derive(Debug, Default)]
pub struct ReportSubmission {
    pub form: ReportForm,
    pub photo: Option<ReportPhoto>,
}

impl ReportSubmission {
    /// Read the report form fields and the optional `foto` part.
    ///
    /// A file part without content (no file chosen) counts as no photo.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut submission = ReportSubmission::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::debug!("Failed to read multipart field: {}", e);
            AppError::BadRequest(format!("Gagal membaca data formulir: {}", e))
        })? {
            let field_name = field.name().unwrap_or("").to_string();

            if field_name == "foto" {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Gagal membaca foto: {}", e))
                })?;

                if !data.is_empty() {
                    submission.photo = Some(ReportPhoto {
                        file_name,
                        content_type,
                        data: data.to_vec(),
                    });
                }
                continue;
            }

            let text = field.text().await.map_err(|e| {
                AppError::BadRequest(format!("Gagal membaca field {}: {}", field_name, e))
            })?;

            match field_name.as_str() {
                "nama_pelapor" => submission.form.nama_pelapor = text,
                "rth_id" => submission.form.rth_id = text,
                "kategori" => submission.form.kategori = text,
                "deskripsi" => submission.form.deskripsi = text,
                other => tracing::debug!("Ignoring unknown field: {}", other),
            }
        }

        Ok(submission)
    }
}

/// Check an attached photo: images only, at most 5MB
pub fn validate_photo(photo: &ReportPhoto) -> Result<(), AppError> {
    if !photo.content_type.starts_with("image/") {
        return Err(AppError::Validation(
            "Foto harus berupa file gambar".to_string(),
        ));
    }
    if photo.data.len() > MAX_PHOTO_SIZE {
        return Err(AppError::Validation(format!(
            "Ukuran foto maksimal {} MB",
            MAX_PHOTO_SIZE / 1024 / 1024
        )));
    }
    Ok(())
}

/// Multipart body of `POST /api/reports`
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ReportUploadForm {
    pub nama_pelapor: String,
    pub rth_id: i32,
    pub kategori: String,
    pub deskripsi: String,
    /// Optional image, at most 5MB
    #[schema(value_type = Option<String>, format = Binary)]
    pub foto: Option<Vec<u8>>,
}

/// Request DTO for moving a report to another status
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateReportStatusDto {
    pub status: ReportStatus,
}

/// Response DTO for report, with the location name resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: String,
    pub nama_pelapor: String,
    pub rth_id: i32,
    pub nama_rth: String,
    pub kategori: String,
    pub deskripsi: String,
    pub foto_url: Option<String>,
    pub status: ReportStatus,
    pub status_label: String,
    /// Status buttons offered on the admin table
    pub transitions: Vec<ReportStatus>,
    pub created_at: DateTime<Utc>,
    pub created_at_display: String,
}

impl ReportResponseDto {
    pub fn from_report(report: Report, reference: &ReferenceIndex) -> Self {
        Self {
            nama_rth: resolve_feature_name(None, report.rth_id, reference),
            status_label: report.status.label().to_string(),
            transitions: report.status.transitions(),
            created_at_display: format_date_long(&report.created_at),
            id: report.id,
            nama_pelapor: report.nama_pelapor,
            rth_id: report.rth_id,
            kategori: report.kategori,
            deskripsi: report.deskripsi,
            foto_url: report.foto_url,
            status: report.status,
            created_at: report.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{report_with_status, sample_reference};
    use crate::shared::validation::validate_dto;

    #[test]
    fn test_form_to_dto_trims_and_parses() {
        let form = ReportForm {
            nama_pelapor: "  Rina ".to_string(),
            rth_id: " 3 ".to_string(),
            kategori: "Kebersihan".to_string(),
            deskripsi: " Sampah berserakan ".to_string(),
        };
        let dto = form.to_dto();
        assert_eq!(dto.nama_pelapor, "Rina");
        assert_eq!(dto.rth_id, 3);
        assert_eq!(dto.deskripsi, "Sampah berserakan");
        assert!(validate_dto(&dto).is_ok());
    }

    #[test]
    fn test_missing_location_fails_validation() {
        let form = ReportForm {
            nama_pelapor: "Rina".to_string(),
            rth_id: "".to_string(),
            kategori: "Kebersihan".to_string(),
            deskripsi: "Sampah".to_string(),
        };
        match validate_dto(&form.to_dto()) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Silakan pilih lokasi RTH"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_photo() {
        let photo = |ct: &str, len: usize| ReportPhoto {
            file_name: "foto".to_string(),
            content_type: ct.to_string(),
            data: vec![0; len],
        };

        assert!(validate_photo(&photo("image/png", 1024)).is_ok());
        assert!(validate_photo(&photo("application/pdf", 1024)).is_err());
        assert!(validate_photo(&photo("image/jpeg", MAX_PHOTO_SIZE + 1)).is_err());
    }

    #[test]
    fn test_response_resolves_name() {
        let reference = sample_reference();
        let mut report = report_with_status(ReportStatus::Baru);
        report.rth_id = 2;

        let dto = ReportResponseDto::from_report(report.clone(), &reference);
        assert_eq!(dto.nama_rth, "Jalur Hijau Sudirman");
        assert_eq!(dto.status_label, "Baru");
        assert_eq!(
            dto.transitions,
            vec![ReportStatus::Diproses, ReportStatus::Selesai]
        );

        report.rth_id = 999;
        let dto = ReportResponseDto::from_report(report, &reference);
        assert_eq!(dto.nama_rth, "Unknown");
    }
}
