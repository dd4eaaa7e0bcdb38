//! Pure reductions over reports and reviews.

use std::collections::HashMap;

use crate::features::reports::models::{Report, ReportStatus};
use crate::features::reviews::models::Review;
use crate::features::rth::reference::ReferenceIndex;
use crate::features::statistics::models::{FeatureRating, ReportCounts, ReviewStats};
use crate::shared::constants::UNKNOWN_FEATURE_NAME;

/// Round half away from zero to one decimal place
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn aggregate_report_counts(reports: &[Report]) -> ReportCounts {
    reports
        .iter()
        .fold(ReportCounts::default(), |mut counts, report| {
            counts.total += 1;
            match report.status {
                ReportStatus::Baru => counts.baru += 1,
                ReportStatus::Diproses => counts.diproses += 1,
                ReportStatus::Selesai => counts.selesai += 1,
            }
            counts
        })
}

pub fn aggregate_review_stats(reviews: &[Review]) -> ReviewStats {
    let sum: i64 = reviews.iter().map(|r| r.rating as i64).sum();
    review_stats_from_totals(reviews.len() as i64, sum)
}

/// Build review stats from a count and a rating sum, as returned by SQL
pub fn review_stats_from_totals(total: i64, sum: i64) -> ReviewStats {
    let average = (total > 0).then(|| round_one_decimal(sum as f64 / total as f64));
    ReviewStats { total, average }
}

/// Average rating per location, best first.
///
/// Groups keep the order in which their first review appears and the sort is
/// stable, so locations with equal rounded averages keep that order. The
/// display name comes from the first review of each group.
pub fn aggregate_rating_per_feature(
    reviews: &[Review],
    reference: &ReferenceIndex,
) -> Vec<FeatureRating> {
    struct Group<'a> {
        rth_id: i32,
        first: &'a Review,
        sum: i64,
        count: i64,
    }

    let mut groups: Vec<Group> = Vec::new();
    let mut positions: HashMap<i32, usize> = HashMap::new();

    for review in reviews {
        match positions.get(&review.rth_id) {
            Some(&i) => {
                groups[i].sum += review.rating as i64;
                groups[i].count += 1;
            }
            None => {
                positions.insert(review.rth_id, groups.len());
                groups.push(Group {
                    rth_id: review.rth_id,
                    first: review,
                    sum: review.rating as i64,
                    count: 1,
                });
            }
        }
    }

    let mut ratings: Vec<FeatureRating> = groups
        .into_iter()
        .map(|g| FeatureRating {
            rth_id: g.rth_id,
            nama_rth: resolve_feature_name(g.first.rth_name.as_deref(), g.rth_id, reference),
            average: round_one_decimal(g.sum as f64 / g.count as f64),
            count: g.count,
        })
        .collect();

    ratings.sort_by(|a, b| b.average.total_cmp(&a.average));
    ratings
}

/// Display name for a record that points at an RTH location.
///
/// A non-empty name stored on the record wins, then the reference lookup,
/// then `Unknown`.
pub fn resolve_feature_name(
    denormalized: Option<&str>,
    rth_id: i32,
    reference: &ReferenceIndex,
) -> String {
    denormalized
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .or_else(|| reference.name_of(rth_id))
        .unwrap_or(UNKNOWN_FEATURE_NAME)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{report_with_status, review, sample_reference};

    #[test]
    fn test_report_counts_partition_total() {
        let reports = vec![
            report_with_status(ReportStatus::Baru),
            report_with_status(ReportStatus::Selesai),
            report_with_status(ReportStatus::Baru),
            report_with_status(ReportStatus::Diproses),
        ];

        let counts = aggregate_report_counts(&reports);
        assert_eq!(
            counts,
            ReportCounts {
                total: 4,
                baru: 2,
                diproses: 1,
                selesai: 1
            }
        );
        assert_eq!(counts.baru + counts.diproses + counts.selesai, counts.total);
        assert_eq!(aggregate_report_counts(&[]), ReportCounts::default());
    }

    #[test]
    fn test_review_stats_rounding() {
        let reviews = vec![review(1, 5), review(1, 4), review(2, 4)];
        let stats = aggregate_review_stats(&reviews);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.average, Some(4.3));
        assert_eq!(stats.average_display(), "4.3");

        let empty = aggregate_review_stats(&[]);
        assert_eq!(empty.total, 0);
        assert_eq!(empty.average, None);
        assert_eq!(empty.average_display(), "-");
    }

    #[test]
    fn test_review_stats_from_sql_totals() {
        assert_eq!(review_stats_from_totals(2, 9).average, Some(4.5));
        assert_eq!(review_stats_from_totals(0, 0).average, None);
    }

    #[test]
    fn test_rating_per_feature_sorted_descending() {
        let reference = sample_reference();
        let reviews = vec![
            review(1, 3),
            review(2, 5),
            review(1, 4),
            review(3, 4),
            review(2, 4),
        ];

        let ratings = aggregate_rating_per_feature(&reviews, &reference);
        let order: Vec<(i32, f64, i64)> = ratings
            .iter()
            .map(|r| (r.rth_id, r.average, r.count))
            .collect();
        assert_eq!(order, vec![(2, 4.5, 2), (3, 4.0, 1), (1, 3.5, 2)]);
    }

    #[test]
    fn test_rating_ties_keep_first_appearance_order() {
        let reference = sample_reference();
        // 4.25 and 4.3 both round to 4.3
        let reviews = vec![
            review(3, 4),
            review(3, 5),
            review(3, 4),
            review(3, 4),
            review(1, 4),
            review(1, 5),
            review(1, 4),
            review(2, 5),
        ];

        let ratings = aggregate_rating_per_feature(&reviews, &reference);
        let ids: Vec<i32> = ratings.iter().map(|r| r.rth_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(ratings[1].average, ratings[2].average);
    }

    #[test]
    fn test_rating_name_comes_from_first_review() {
        let reference = sample_reference();
        let mut first = review(1, 5);
        first.rth_name = Some("Nama Lama".to_string());
        let mut second = review(1, 3);
        second.rth_name = Some("Nama Baru".to_string());

        let ratings = aggregate_rating_per_feature(&[first, second], &reference);
        assert_eq!(ratings[0].nama_rth, "Nama Lama");
    }

    #[test]
    fn test_resolve_feature_name_precedence() {
        let reference = sample_reference();
        let indexed = reference.name_of(1).unwrap().to_string();

        assert_eq!(resolve_feature_name(Some("Snapshot"), 1, &reference), "Snapshot");
        assert_eq!(resolve_feature_name(Some("  "), 1, &reference), indexed);
        assert_eq!(resolve_feature_name(None, 1, &reference), indexed);
        assert_eq!(resolve_feature_name(None, 404, &reference), "Unknown");
    }
}
