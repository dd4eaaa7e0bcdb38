use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::reviews::models::Review;
use crate::features::rth::reference::ReferenceIndex;
use crate::features::statistics::{resolve_feature_name, FeatureRating};
use crate::shared::format::{format_date_long, star_flags};

/// Medal colors for the top three locations: gold, silver, bronze
const MEDAL_COLORS: [&str; 3] = ["#f1c40f", "#95a5a6", "#cd7f32"];

/// Request DTO for submitting a review
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReviewDto {
    #[validate(length(min = 1, max = 100, message = "Nama wajib diisi"))]
    pub nama: String,
    #[validate(range(min = 1, message = "Silakan pilih lokasi RTH"))]
    pub rth_id: i32,
    /// Rating from 1 to 5
    #[validate(
        required(message = "Silakan berikan rating"),
        range(min = 1, max = 5, message = "Rating harus antara 1 sampai 5")
    )]
    pub rating: Option<i32>,
    #[validate(length(max = 1000, message = "Komentar maksimal 1000 karakter"))]
    pub komentar: Option<String>,
}

/// Review form as posted by the review page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub rth_id: String,
    /// Absent when no star was picked
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub komentar: String,
}

impl ReviewForm {
    pub fn to_dto(&self) -> CreateReviewDto {
        let komentar = self.komentar.trim();
        CreateReviewDto {
            nama: self.nama.trim().to_string(),
            rth_id: self.rth_id.trim().parse().unwrap_or(0),
            rating: self
                .rating
                .as_deref()
                .and_then(|r| r.trim().parse().ok()),
            komentar: (!komentar.is_empty()).then(|| komentar.to_string()),
        }
    }
}

/// Response DTO for review, with the location name resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponseDto {
    pub id: String,
    pub nama: String,
    pub rth_id: i32,
    pub nama_rth: String,
    pub rating: i32,
    /// One flag per star, filled first
    pub stars: Vec<bool>,
    pub komentar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_at_display: String,
}

impl ReviewResponseDto {
    pub fn from_review(review: Review, reference: &ReferenceIndex) -> Self {
        Self {
            nama_rth: resolve_feature_name(review.rth_name.as_deref(), review.rth_id, reference),
            stars: star_flags(review.rating as f64),
            created_at_display: format_date_long(&review.created_at),
            id: review.id,
            nama: review.nama,
            rth_id: review.rth_id,
            rating: review.rating,
            komentar: review.komentar,
            created_at: review.created_at,
        }
    }
}

/// One entry of the per-location rating recap
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingRecapDto {
    /// 1-based position, best first
    pub rank: usize,
    /// Badge color for the top three
    pub medal_color: Option<String>,
    pub rth_id: i32,
    pub nama_rth: String,
    pub average: f64,
    pub average_display: String,
    pub count: i64,
    pub stars: Vec<bool>,
}

impl RatingRecapDto {
    pub fn ranked(ratings: Vec<FeatureRating>) -> Vec<Self> {
        ratings
            .into_iter()
            .enumerate()
            .map(|(i, r)| Self {
                rank: i + 1,
                medal_color: MEDAL_COLORS.get(i).map(|c| c.to_string()),
                rth_id: r.rth_id,
                nama_rth: r.nama_rth,
                average: r.average,
                average_display: format!("{:.1}", r.average),
                count: r.count,
                stars: star_flags(r.average),
            })
            .collect()
    }
}
