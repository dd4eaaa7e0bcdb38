use std::sync::Arc;

use crate::core::error::Result;
use crate::features::reports::dtos::{validate_photo, CreateReportDto, ReportResponseDto};
use crate::features::reports::models::{NewReport, Report, ReportPhoto, ReportStatus};
use crate::features::rth::reference::ReferenceIndex;
use crate::features::statistics::ReportCounts;
use crate::modules::gateway::DataGateway;
use crate::shared::validation::validate_dto;

pub struct ReportService {
    gateway: Arc<dyn DataGateway>,
    reference: Arc<ReferenceIndex>,
}

impl ReportService {
    pub fn new(gateway: Arc<dyn DataGateway>, reference: Arc<ReferenceIndex>) -> Self {
        Self { gateway, reference }
    }

    /// Validate and store a citizen report.
    ///
    /// Nothing touches the gateway until validation passes. The photo upload
    /// finishes before the insert starts; a failed upload stores the report
    /// without a photo.
    pub async fn submit(
        &self,
        dto: &CreateReportDto,
        photo: Option<ReportPhoto>,
    ) -> Result<Report> {
        validate_dto(dto)?;
        if let Some(photo) = &photo {
            validate_photo(photo)?;
        }

        let foto_url = match &photo {
            Some(photo) => self.gateway.upload_photo(photo).await,
            None => None,
        };

        let report = self
            .gateway
            .insert_report(NewReport {
                nama_pelapor: dto.nama_pelapor.clone(),
                rth_id: dto.rth_id,
                kategori: dto.kategori.clone(),
                deskripsi: dto.deskripsi.clone(),
                foto_url,
            })
            .await?;

        tracing::info!(
            "Report {} submitted for RTH {} (photo: {})",
            report.id,
            report.rth_id,
            report.foto_url.is_some()
        );
        Ok(report)
    }

    pub fn to_response(&self, report: Report) -> ReportResponseDto {
        ReportResponseDto::from_report(report, &self.reference)
    }

    /// All reports, newest first, with location names resolved
    pub async fn list(&self) -> Vec<ReportResponseDto> {
        self.gateway
            .fetch_all_reports()
            .await
            .into_iter()
            .map(|r| self.to_response(r))
            .collect()
    }

    pub async fn list_for_feature(&self, rth_id: i32) -> Vec<ReportResponseDto> {
        self.gateway
            .fetch_reports_for_feature(rth_id)
            .await
            .into_iter()
            .map(|r| self.to_response(r))
            .collect()
    }

    pub async fn set_status(&self, id: &str, status: ReportStatus) -> Result<ReportResponseDto> {
        let report = self.gateway.set_report_status(id, status).await?;
        Ok(self.to_response(report))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.gateway.delete_report(id).await
    }

    pub async fn counts(&self) -> ReportCounts {
        self.gateway.compute_report_stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::{recording_gateway, sample_reference, RecordingGateway};

    fn dto() -> CreateReportDto {
        CreateReportDto {
            nama_pelapor: "Rina".to_string(),
            rth_id: 1,
            kategori: "Kebersihan".to_string(),
            deskripsi: "Tong sampah penuh".to_string(),
        }
    }

    fn photo() -> ReportPhoto {
        ReportPhoto {
            file_name: "tong.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![0xFF, 0xD8, 0xFF],
        }
    }

    #[tokio::test]
    async fn test_upload_completes_before_insert() {
        let gateway = recording_gateway();
        let service = ReportService::new(gateway.clone(), Arc::new(sample_reference()));

        let report = service.submit(&dto(), Some(photo())).await.unwrap();

        assert_eq!(gateway.calls(), vec!["upload", "insert"]);
        assert_eq!(report.foto_url, gateway.photo_url);
        assert_eq!(report.status, ReportStatus::Baru);
    }

    #[tokio::test]
    async fn test_failed_upload_still_inserts() {
        let gateway = Arc::new(RecordingGateway::without_photo_storage());
        let service = ReportService::new(gateway.clone(), Arc::new(sample_reference()));

        let report = service.submit(&dto(), Some(photo())).await.unwrap();
        assert_eq!(report.foto_url, None);
        assert_eq!(gateway.calls(), vec!["upload", "insert"]);
    }

    #[tokio::test]
    async fn test_invalid_submission_never_reaches_gateway() {
        let gateway = recording_gateway();
        let service = ReportService::new(gateway.clone(), Arc::new(sample_reference()));

        let mut invalid = dto();
        invalid.deskripsi = String::new();
        let result = service.submit(&invalid, Some(photo())).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let not_an_image = ReportPhoto {
            content_type: "text/plain".to_string(),
            ..photo()
        };
        let result = service.submit(&dto(), Some(not_an_image)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let gateway = Arc::new(RecordingGateway::failing());
        let service = ReportService::new(gateway.clone(), Arc::new(sample_reference()));

        assert!(service.submit(&dto(), None).await.is_err());
        assert_eq!(gateway.calls(), vec!["insert"]);
    }

    #[tokio::test]
    async fn test_status_transition_updates_counts() {
        let gateway = recording_gateway();
        let service = ReportService::new(gateway, Arc::new(sample_reference()));

        let first = service.submit(&dto(), None).await.unwrap();
        service.submit(&dto(), None).await.unwrap();

        let updated = service
            .set_status(&first.id, ReportStatus::Diproses)
            .await
            .unwrap();
        assert_eq!(updated.status_label, "Diproses");
        assert_eq!(updated.nama_rth, "Taman Kaca Mayang");

        let counts = service.counts().await;
        assert_eq!((counts.total, counts.baru, counts.diproses), (2, 1, 1));
    }
}
