pub mod aggregator;
pub mod models;

pub use aggregator::{
    aggregate_rating_per_feature, aggregate_report_counts, aggregate_review_stats,
    resolve_feature_name, review_stats_from_totals,
};
pub use models::{FeatureRating, ReportCounts, ReviewStats};
