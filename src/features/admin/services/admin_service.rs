use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{AdminRatingsDto, AdminReportListDto, AdminSummaryDto};
use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::ReportStatus;
use crate::features::reports::ReportService;
use crate::features::reviews::ReviewService;

/// Service behind the admin dashboard
pub struct AdminService {
    report_service: Arc<ReportService>,
    review_service: Arc<ReviewService>,
}

impl AdminService {
    pub fn new(report_service: Arc<ReportService>, review_service: Arc<ReviewService>) -> Self {
        Self {
            report_service,
            review_service,
        }
    }

    pub async fn summary(&self) -> AdminSummaryDto {
        let (reports, reviews) =
            tokio::join!(self.report_service.counts(), self.review_service.stats());
        AdminSummaryDto::new(reports, reviews)
    }

    pub async fn reports(&self, status: Option<ReportStatus>) -> AdminReportListDto {
        AdminReportListDto::filtered(self.report_service.list().await, status)
    }

    /// Move a report to a new status
    pub async fn set_status(&self, id: &str, status: ReportStatus) -> Result<ReportResponseDto> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::BadRequest("ID laporan wajib diisi".to_string()));
        }

        let report = self.report_service.set_status(id, status).await?;
        tracing::info!("Admin moved report {} to {}", id, status);
        Ok(report)
    }

    pub async fn delete_report(&self, id: &str) -> Result<()> {
        self.report_service.delete(id).await?;
        tracing::info!("Admin deleted report {}", id);
        Ok(())
    }

    pub async fn ratings(&self) -> AdminRatingsDto {
        let (stats, leaderboard) =
            tokio::join!(self.review_service.stats(), self.review_service.recap());
        AdminRatingsDto::new(stats, leaderboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::dtos::CreateReportDto;
    use crate::features::reviews::dtos::CreateReviewDto;
    use crate::modules::gateway::DataGateway;
    use crate::shared::test_helpers::{local_gateway, sample_reference};

    fn services() -> (Arc<ReportService>, Arc<ReviewService>, AdminService) {
        let gateway: Arc<dyn DataGateway> = Arc::new(local_gateway());
        let reference = Arc::new(sample_reference());
        let reports = Arc::new(ReportService::new(gateway.clone(), reference.clone()));
        let reviews = Arc::new(ReviewService::new(gateway, reference));
        let admin = AdminService::new(reports.clone(), reviews.clone());
        (reports, reviews, admin)
    }

    fn report(rth_id: i32) -> CreateReportDto {
        CreateReportDto {
            nama_pelapor: "Andi".to_string(),
            rth_id,
            kategori: "Keamanan".to_string(),
            deskripsi: "Pagar rusak".to_string(),
        }
    }

    #[tokio::test]
    async fn test_transition_is_reflected_in_summary_and_table() {
        let (reports, _, admin) = services();
        let first = reports.submit(&report(1), None).await.unwrap();
        reports.submit(&report(2), None).await.unwrap();

        let before = admin.summary().await;
        assert_eq!(before.reports.baru, 2);

        admin.set_status(&first.id, ReportStatus::Selesai).await.unwrap();

        let after = admin.summary().await;
        assert_eq!((after.reports.baru, after.reports.selesai), (1, 1));

        let done = admin.reports(Some(ReportStatus::Selesai)).await;
        assert_eq!(done.info, "Menampilkan 1 dari 2 laporan");
        assert_eq!(done.reports[0].id, first.id);
    }

    #[tokio::test]
    async fn test_unknown_report_is_not_found() {
        let (_, _, admin) = services();
        let result = admin.set_status("123", ReportStatus::Diproses).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(matches!(
            admin.set_status("  ", ReportStatus::Diproses).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_ratings_summary() {
        let (_, reviews, admin) = services();
        for (rth_id, rating) in [(1, 5), (1, 4), (3, 2)] {
            reviews
                .submit(&CreateReviewDto {
                    nama: "Sari".to_string(),
                    rth_id,
                    rating: Some(rating),
                    komentar: None,
                })
                .await
                .unwrap();
        }

        let ratings = admin.ratings().await;
        assert_eq!(ratings.total_reviews, 3);
        assert_eq!(ratings.average, Some(3.7));
        assert_eq!(ratings.rated_locations, 2);
        assert_eq!(ratings.leaderboard[0].rth_id, 1);
        assert_eq!(ratings.leaderboard[0].medal_color.as_deref(), Some("#f1c40f"));
    }

    #[tokio::test]
    async fn test_delete_report() {
        let (reports, _, admin) = services();
        let created = reports.submit(&report(1), None).await.unwrap();

        admin.delete_report(&created.id).await.unwrap();
        assert_eq!(admin.summary().await.reports.total, 0);
    }
}
