//! Data access for RTH features, reports and reviews.
//!
//! One [`DataGateway`] is chosen at startup: [`RemoteGateway`] when the
//! database answers, [`LocalGateway`] (demo mode) otherwise. Reads never
//! fail; they log and come back empty. Writes return an error.

mod local;
mod remote;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::core::error::Result;
use crate::features::reports::models::{NewReport, Report, ReportPhoto, ReportStatus};
use crate::features::reviews::models::{NewReview, Review};
use crate::features::rth::models::RthFeature;
use crate::features::rth::reference::ReferenceIndex;
use crate::features::statistics::{
    aggregate_rating_per_feature, aggregate_report_counts, aggregate_review_stats, FeatureRating,
    ReportCounts, ReviewStats,
};

pub use local::LocalGateway;
pub use remote::RemoteGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    Remote,
    Demo,
}

impl GatewayMode {
    pub fn is_demo(&self) -> bool {
        matches!(self, GatewayMode::Demo)
    }
}

#[async_trait]
pub trait DataGateway: Send + Sync {
    fn mode(&self) -> GatewayMode;

    /// Whether the backing store answers right now
    async fn is_available(&self) -> bool;

    async fn fetch_all_features(&self) -> Vec<RthFeature>;

    /// All reports, newest first
    async fn fetch_all_reports(&self) -> Vec<Report>;

    async fn fetch_reports_for_feature(&self, rth_id: i32) -> Vec<Report>;

    async fn insert_report(&self, report: NewReport) -> Result<Report>;

    /// Move a report to `status`; unknown ids are `NotFound`
    async fn set_report_status(&self, id: &str, status: ReportStatus) -> Result<Report>;

    async fn delete_report(&self, id: &str) -> Result<()>;

    /// All reviews, newest first
    async fn fetch_all_reviews(&self) -> Vec<Review>;

    async fn fetch_reviews_for_feature(&self, rth_id: i32) -> Vec<Review>;

    async fn insert_review(&self, review: NewReview) -> Result<Review>;

    /// Store a photo and return its public URL. Failures yield `None`.
    async fn upload_photo(&self, photo: &ReportPhoto) -> Option<String>;

    async fn compute_report_stats(&self) -> ReportCounts {
        aggregate_report_counts(&self.fetch_all_reports().await)
    }

    async fn compute_review_stats(&self) -> ReviewStats {
        aggregate_review_stats(&self.fetch_all_reviews().await)
    }

    async fn compute_rating_per_feature(&self, reference: &ReferenceIndex) -> Vec<FeatureRating> {
        aggregate_rating_per_feature(&self.fetch_all_reviews().await, reference)
    }
}
