use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Report counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportCounts {
    pub total: i64,
    pub baru: i64,
    pub diproses: i64,
    pub selesai: i64,
}

/// Review totals; `average` is `None` when there are no reviews
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewStats {
    pub total: i64,
    pub average: Option<f64>,
}

impl ReviewStats {
    /// Average for display, `-` when nothing has been rated yet
    pub fn average_display(&self) -> String {
        match self.average {
            Some(avg) => format!("{:.1}", avg),
            None => "-".to_string(),
        }
    }
}

/// Average rating of one RTH location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeatureRating {
    pub rth_id: i32,
    pub nama_rth: String,
    pub average: f64,
    pub count: i64,
}
