use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::ReportStatus;
use crate::features::reviews::dtos::RatingRecapDto;
use crate::features::statistics::{ReportCounts, ReviewStats};
use crate::shared::format::star_flags;

// =============================================================================
// SUMMARY
// =============================================================================

/// Dashboard statistics cards
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminSummaryDto {
    pub reports: ReportCounts,
    pub reviews: ReviewStats,
    /// Average rating for display, `-` without reviews
    pub average_display: String,
}

impl AdminSummaryDto {
    pub fn new(reports: ReportCounts, reviews: ReviewStats) -> Self {
        Self {
            average_display: reviews.average_display(),
            reports,
            reviews,
        }
    }
}

// =============================================================================
// REPORT TABLE
// =============================================================================

/// Query params for the admin report table
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminReportQuery {
    /// baru, diproses, selesai (English aliases accepted); empty or "all" shows every report
    pub status: Option<String>,
}

impl AdminReportQuery {
    pub fn status_filter(&self) -> Result<Option<ReportStatus>, String> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

/// Filtered report table with its "Showing X of Y" line
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminReportListDto {
    pub status: Option<ReportStatus>,
    pub shown: usize,
    pub total: usize,
    pub info: String,
    pub reports: Vec<ReportResponseDto>,
}

impl AdminReportListDto {
    pub fn filtered(all: Vec<ReportResponseDto>, status: Option<ReportStatus>) -> Self {
        let total = all.len();
        let reports: Vec<ReportResponseDto> = match status {
            Some(status) => all.into_iter().filter(|r| r.status == status).collect(),
            None => all,
        };
        let shown = reports.len();

        Self {
            status,
            shown,
            total,
            info: format!("Menampilkan {} dari {} laporan", shown, total),
            reports,
        }
    }
}

// =============================================================================
// RATINGS
// =============================================================================

/// Ratings tab: leaderboard plus its summary header
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminRatingsDto {
    pub average: Option<f64>,
    pub average_display: String,
    pub average_stars: Vec<bool>,
    pub total_reviews: i64,
    pub rated_locations: usize,
    pub leaderboard: Vec<RatingRecapDto>,
}

impl AdminRatingsDto {
    pub fn new(stats: ReviewStats, leaderboard: Vec<RatingRecapDto>) -> Self {
        Self {
            average: stats.average,
            average_display: stats.average_display(),
            average_stars: stats.average.map(star_flags).unwrap_or_default(),
            total_reviews: stats.total,
            rated_locations: leaderboard.len(),
            leaderboard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{report_with_status, sample_reference};

    #[test]
    fn test_status_filter_parsing() {
        let query = |s: Option<&str>| AdminReportQuery {
            status: s.map(String::from),
        };

        assert_eq!(query(None).status_filter(), Ok(None));
        assert_eq!(query(Some("all")).status_filter(), Ok(None));
        assert_eq!(
            query(Some("in-progress")).status_filter(),
            Ok(Some(ReportStatus::Diproses))
        );
        assert!(query(Some("ditolak")).status_filter().is_err());
    }

    #[test]
    fn test_filtered_info_line() {
        let reference = sample_reference();
        let reports: Vec<ReportResponseDto> = [
            ReportStatus::Baru,
            ReportStatus::Selesai,
            ReportStatus::Baru,
        ]
        .into_iter()
        .map(|s| ReportResponseDto::from_report(report_with_status(s), &reference))
        .collect();

        let list = AdminReportListDto::filtered(reports.clone(), Some(ReportStatus::Baru));
        assert_eq!((list.shown, list.total), (2, 3));
        assert_eq!(list.info, "Menampilkan 2 dari 3 laporan");

        let list = AdminReportListDto::filtered(reports, None);
        assert_eq!(list.shown, 3);
    }

    #[test]
    fn test_ratings_without_reviews() {
        let dto = AdminRatingsDto::new(ReviewStats::default(), Vec::new());
        assert_eq!(dto.average_display, "-");
        assert!(dto.average_stars.is_empty());
        assert_eq!(dto.rated_locations, 0);
    }
}
