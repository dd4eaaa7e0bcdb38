use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

use super::{DataGateway, GatewayMode};
use crate::core::error::{AppError, Result};
use crate::features::reports::models::{NewReport, Report, ReportPhoto, ReportStatus};
use crate::features::reviews::models::{NewReview, Review};
use crate::features::rth::models::RthFeature;
use crate::modules::local_store::{LocalStore, LocalStoreError};
use crate::shared::constants::{LOCAL_REPORTS_KEY, LOCAL_REVIEWS_KEY};

impl From<LocalStoreError> for AppError {
    fn from(e: LocalStoreError) -> Self {
        AppError::Internal(e.to_string())
    }
}

/// Demo-mode gateway persisting records as JSON files
pub struct LocalGateway {
    store: LocalStore,
    features: Vec<RthFeature>,
    last_id: AtomicI64,
}

impl LocalGateway {
    pub fn new(store: LocalStore, features: Vec<RthFeature>) -> Self {
        Self {
            store,
            features,
            last_id: AtomicI64::new(0),
        }
    }

    /// Millisecond timestamp id, bumped past the last one issued
    fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        now.max(previous + 1).to_string()
    }
}

#[async_trait]
impl DataGateway for LocalGateway {
    fn mode(&self) -> GatewayMode {
        GatewayMode::Demo
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn fetch_all_features(&self) -> Vec<RthFeature> {
        self.features.clone()
    }

    async fn fetch_all_reports(&self) -> Vec<Report> {
        self.store.load_list(LOCAL_REPORTS_KEY).await
    }

    async fn fetch_reports_for_feature(&self, rth_id: i32) -> Vec<Report> {
        let mut reports = self.fetch_all_reports().await;
        reports.retain(|r| r.rth_id == rth_id);
        reports
    }

    async fn insert_report(&self, report: NewReport) -> Result<Report> {
        let created = Report {
            id: self.next_id(),
            nama_pelapor: report.nama_pelapor,
            rth_id: report.rth_id,
            kategori: report.kategori,
            deskripsi: report.deskripsi,
            foto_url: report.foto_url,
            status: ReportStatus::Baru,
            created_at: Utc::now(),
        };

        let stored = created.clone();
        self.store
            .update_list(LOCAL_REPORTS_KEY, move |reports: &mut Vec<Report>| {
                reports.insert(0, stored)
            })
            .await
            .map_err(|e| {
                tracing::error!("Failed to save report locally: {}", e);
                AppError::from(e)
            })?;

        tracing::info!("Report {} stored locally for RTH {}", created.id, created.rth_id);
        Ok(created)
    }

    async fn set_report_status(&self, id: &str, status: ReportStatus) -> Result<Report> {
        let updated = self
            .store
            .update_list(LOCAL_REPORTS_KEY, |reports: &mut Vec<Report>| {
                reports.iter_mut().find(|r| r.id == id).map(|r| {
                    r.status = status;
                    r.clone()
                })
            })
            .await?;

        updated.ok_or_else(|| AppError::NotFound(format!("Laporan {} tidak ditemukan", id)))
    }

    async fn delete_report(&self, id: &str) -> Result<()> {
        let removed = self
            .store
            .update_list(LOCAL_REPORTS_KEY, |reports: &mut Vec<Report>| {
                let before = reports.len();
                reports.retain(|r| r.id != id);
                before - reports.len()
            })
            .await?;

        if removed == 0 {
            return Err(AppError::NotFound(format!("Laporan {} tidak ditemukan", id)));
        }
        Ok(())
    }

    async fn fetch_all_reviews(&self) -> Vec<Review> {
        self.store.load_list(LOCAL_REVIEWS_KEY).await
    }

    async fn fetch_reviews_for_feature(&self, rth_id: i32) -> Vec<Review> {
        let mut reviews = self.fetch_all_reviews().await;
        reviews.retain(|r| r.rth_id == rth_id);
        reviews
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review> {
        let created = Review {
            id: self.next_id(),
            nama: review.nama,
            rth_id: review.rth_id,
            rth_name: review.rth_name,
            rating: review.rating,
            komentar: review.komentar,
            created_at: Utc::now(),
        };

        let stored = created.clone();
        self.store
            .update_list(LOCAL_REVIEWS_KEY, move |reviews: &mut Vec<Review>| {
                reviews.insert(0, stored)
            })
            .await
            .map_err(|e| {
                tracing::error!("Failed to save review locally: {}", e);
                AppError::from(e)
            })?;

        Ok(created)
    }

    async fn upload_photo(&self, photo: &ReportPhoto) -> Option<String> {
        tracing::debug!(
            "Photo '{}' not stored: no object storage in demo mode",
            photo.file_name
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        local_gateway, new_report, new_review, sample_features, temp_dir,
    };

    #[tokio::test]
    async fn test_reports_are_prepended() {
        let gateway = local_gateway();
        let first = gateway.insert_report(new_report(1)).await.unwrap();
        let second = gateway.insert_report(new_report(2)).await.unwrap();

        let reports = gateway.fetch_all_reports().await;
        let ids: Vec<&str> = reports.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
        assert_eq!(reports[0].status, ReportStatus::Baru);
    }

    #[tokio::test]
    async fn test_insert_fails_on_corrupt_store() {
        let dir = temp_dir();
        let path = dir.join(format!("{}.json", LOCAL_REPORTS_KEY));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(&path, b"[{\"id\": ").await.unwrap();

        let gateway = LocalGateway::new(LocalStore::new(dir), sample_features());
        let result = gateway.insert_report(new_report(1)).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"[{\"id\": ");
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_increasing() {
        let gateway = local_gateway();
        let a: i64 = gateway.next_id().parse().unwrap();
        let b: i64 = gateway.next_id().parse().unwrap();
        let c: i64 = gateway.next_id().parse().unwrap();
        assert!(a < b && b < c);
    }

    #[tokio::test]
    async fn test_set_status_and_unknown_id() {
        let gateway = local_gateway();
        let report = gateway.insert_report(new_report(1)).await.unwrap();

        let updated = gateway
            .set_report_status(&report.id, ReportStatus::Selesai)
            .await
            .unwrap();
        assert_eq!(updated.status, ReportStatus::Selesai);
        assert_eq!(
            gateway.fetch_all_reports().await[0].status,
            ReportStatus::Selesai
        );

        let missing = gateway
            .set_report_status("does-not-exist", ReportStatus::Diproses)
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_report() {
        let gateway = local_gateway();
        let report = gateway.insert_report(new_report(1)).await.unwrap();

        gateway.delete_report(&report.id).await.unwrap();
        assert!(gateway.fetch_all_reports().await.is_empty());
        assert!(matches!(
            gateway.delete_report(&report.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_per_feature_filtering_and_stats() {
        let gateway = local_gateway();
        gateway.insert_review(new_review(1, 5)).await.unwrap();
        gateway.insert_review(new_review(2, 2)).await.unwrap();
        gateway.insert_review(new_review(1, 4)).await.unwrap();

        let for_one = gateway.fetch_reviews_for_feature(1).await;
        assert_eq!(for_one.len(), 2);
        assert!(for_one.iter().all(|r| r.rth_id == 1));

        let stats = gateway.compute_review_stats().await;
        assert_eq!(stats.total, 3);
        assert_eq!(stats.average, Some(3.7));
    }

    #[tokio::test]
    async fn test_upload_photo_is_unavailable() {
        let gateway = local_gateway();
        let photo = ReportPhoto {
            file_name: "x.jpg".into(),
            content_type: "image/jpeg".into(),
            data: vec![1, 2, 3],
        };
        assert_eq!(gateway.upload_photo(&photo).await, None);
        assert!(gateway.is_available().await);
        assert!(gateway.mode().is_demo());
    }
}
