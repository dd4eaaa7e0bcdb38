use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::{DataGateway, GatewayMode};
use crate::core::error::{AppError, Result};
use crate::features::reports::models::{NewReport, Report, ReportPhoto, ReportRow, ReportStatus};
use crate::features::reviews::models::{NewReview, Review};
use crate::features::rth::models::RthFeature;
use crate::features::statistics::{review_stats_from_totals, ReportCounts, ReviewStats};
use crate::modules::storage::{object_key, random_suffix, PhotoStore};

const FEATURE_COLUMNS: &str = "objectid, nama_rth, jenis_rth, luas_m2, kls_luas, vegetasi, \
     tmp_duduk, tmp_sampah, penerangan, pengunjung, kls_pngnjg, latitude, longitude";

const REPORT_COLUMNS: &str =
    "id::text AS id, nama_pelapor, rth_id, kategori, deskripsi, foto_url, status, created_at";

const REVIEW_COLUMNS: &str = "id::text AS id, nama, rth_id, rth_name, rating, komentar, created_at";

/// Gateway backed by Postgres and the photo bucket
pub struct RemoteGateway {
    pool: PgPool,
    photos: Option<Arc<dyn PhotoStore>>,
}

impl RemoteGateway {
    pub fn new(pool: PgPool, photos: Option<Arc<dyn PhotoStore>>) -> Self {
        Self { pool, photos }
    }

    /// Fill an empty `rth` table from the reference file
    pub async fn seed_features(&self, features: &[RthFeature]) -> Result<u64> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rth")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count RTH features: {:?}", e);
                AppError::Database(e)
            })?;

        if existing > 0 || features.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for f in features {
            sqlx::query(&format!(
                "INSERT INTO rth ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
                 ON CONFLICT (objectid) DO NOTHING",
                FEATURE_COLUMNS
            ))
            .bind(f.objectid)
            .bind(&f.nama_rth)
            .bind(&f.jenis_rth)
            .bind(f.luas_m2)
            .bind(&f.kls_luas)
            .bind(&f.vegetasi)
            .bind(&f.tmp_duduk)
            .bind(&f.tmp_sampah)
            .bind(&f.penerangan)
            .bind(f.pengunjung)
            .bind(&f.kls_pngnjg)
            .bind(f.latitude)
            .bind(f.longitude)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to seed RTH {}: {:?}", f.objectid, e);
                AppError::Database(e)
            })?;
        }
        tx.commit().await?;

        tracing::info!("Seeded {} RTH features", features.len());
        Ok(features.len() as u64)
    }

    async fn fetch_reports(&self, rth_id: Option<i32>) -> Vec<Report> {
        let rows = match rth_id {
            Some(id) => {
                sqlx::query_as::<_, ReportRow>(&format!(
                    "SELECT {} FROM laporan WHERE rth_id = $1 ORDER BY created_at DESC",
                    REPORT_COLUMNS
                ))
                .bind(id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ReportRow>(&format!(
                    "SELECT {} FROM laporan ORDER BY created_at DESC",
                    REPORT_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await
            }
        };

        match rows {
            Ok(rows) => rows.into_iter().filter_map(row_to_report).collect(),
            Err(e) => {
                tracing::error!("Failed to fetch reports: {:?}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_reviews(&self, rth_id: Option<i32>) -> Vec<Review> {
        let rows = match rth_id {
            Some(id) => {
                sqlx::query_as::<_, Review>(&format!(
                    "SELECT {} FROM review WHERE rth_id = $1 ORDER BY created_at DESC",
                    REVIEW_COLUMNS
                ))
                .bind(id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Review>(&format!(
                    "SELECT {} FROM review ORDER BY created_at DESC",
                    REVIEW_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await
            }
        };

        rows.unwrap_or_else(|e| {
            tracing::error!("Failed to fetch reviews: {:?}", e);
            Vec::new()
        })
    }
}

fn row_to_report(row: ReportRow) -> Option<Report> {
    let id = row.id.clone();
    Report::try_from(row)
        .map_err(|e| tracing::warn!("Skipping report {}: {}", id, e))
        .ok()
}

fn into_report(row: ReportRow) -> Result<Report> {
    Report::try_from(row).map_err(AppError::Internal)
}

#[async_trait]
impl DataGateway for RemoteGateway {
    fn mode(&self) -> GatewayMode {
        GatewayMode::Remote
    }

    async fn is_available(&self) -> bool {
        match sqlx::query("SELECT objectid FROM rth LIMIT 1")
            .fetch_optional(&self.pool)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Database probe failed: {}", e);
                false
            }
        }
    }

    async fn fetch_all_features(&self) -> Vec<RthFeature> {
        sqlx::query_as::<_, RthFeature>(&format!(
            "SELECT {} FROM rth ORDER BY objectid",
            FEATURE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to fetch RTH features: {:?}", e);
            Vec::new()
        })
    }

    async fn fetch_all_reports(&self) -> Vec<Report> {
        self.fetch_reports(None).await
    }

    async fn fetch_reports_for_feature(&self, rth_id: i32) -> Vec<Report> {
        self.fetch_reports(Some(rth_id)).await
    }

    async fn insert_report(&self, report: NewReport) -> Result<Report> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "INSERT INTO laporan (nama_pelapor, rth_id, kategori, deskripsi, foto_url, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            REPORT_COLUMNS
        ))
        .bind(&report.nama_pelapor)
        .bind(report.rth_id)
        .bind(&report.kategori)
        .bind(&report.deskripsi)
        .bind(&report.foto_url)
        .bind(ReportStatus::Baru.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Report {} created for RTH {}", row.id, row.rth_id);
        into_report(row)
    }

    async fn set_report_status(&self, id: &str, status: ReportStatus) -> Result<Report> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "UPDATE laporan SET status = $2 WHERE id::text = $1 RETURNING {}",
            REPORT_COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update report status: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Laporan {} tidak ditemukan", id)))?;

        tracing::info!("Report {} moved to {}", id, status);
        into_report(row)
    }

    async fn delete_report(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM laporan WHERE id::text = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete report: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Laporan {} tidak ditemukan", id)));
        }

        tracing::info!("Report {} deleted", id);
        Ok(())
    }

    async fn fetch_all_reviews(&self) -> Vec<Review> {
        self.fetch_reviews(None).await
    }

    async fn fetch_reviews_for_feature(&self, rth_id: i32) -> Vec<Review> {
        self.fetch_reviews(Some(rth_id)).await
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review> {
        let created = sqlx::query_as::<_, Review>(&format!(
            "INSERT INTO review (nama, rth_id, rth_name, rating, komentar) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            REVIEW_COLUMNS
        ))
        .bind(&review.nama)
        .bind(review.rth_id)
        .bind(&review.rth_name)
        .bind(review.rating)
        .bind(&review.komentar)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert review: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Review {} created for RTH {}", created.id, created.rth_id);
        Ok(created)
    }

    async fn upload_photo(&self, photo: &ReportPhoto) -> Option<String> {
        let Some(photos) = &self.photos else {
            tracing::warn!("Photo storage not configured, report saved without photo");
            return None;
        };

        let key = object_key(
            chrono::Utc::now().timestamp_millis(),
            &random_suffix(),
            &photo.extension(),
        );

        match photos.upload(&key, &photo.data, &photo.content_type).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("Photo upload failed, continuing without photo: {}", e);
                None
            }
        }
    }

    async fn compute_report_stats(&self) -> ReportCounts {
        let counts = sqlx::query_as::<_, (i64, i64, i64, i64)>(
            "SELECT COUNT(*), \
                    COUNT(*) FILTER (WHERE status = 'baru'), \
                    COUNT(*) FILTER (WHERE status = 'diproses'), \
                    COUNT(*) FILTER (WHERE status = 'selesai') \
             FROM laporan",
        )
        .fetch_one(&self.pool)
        .await;

        match counts {
            Ok((total, baru, diproses, selesai)) => ReportCounts {
                total,
                baru,
                diproses,
                selesai,
            },
            Err(e) => {
                tracing::error!("Failed to compute report stats: {:?}", e);
                ReportCounts::default()
            }
        }
    }

    async fn compute_review_stats(&self) -> ReviewStats {
        let totals = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COALESCE(SUM(rating), 0)::BIGINT FROM review",
        )
        .fetch_one(&self.pool)
        .await;

        match totals {
            Ok((total, sum)) => review_stats_from_totals(total, sum),
            Err(e) => {
                tracing::error!("Failed to compute review stats: {:?}", e);
                ReviewStats::default()
            }
        }
    }
}
