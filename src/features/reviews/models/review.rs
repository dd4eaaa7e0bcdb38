use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored citizen review of an RTH location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: String,
    pub nama: String,
    pub rth_id: i32,
    /// Location name captured when the review was written
    #[serde(default)]
    pub rth_name: Option<String>,
    pub rating: i32,
    #[serde(default)]
    pub komentar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new review
#[derive(Debug, Clone)]
pub struct NewReview {
    pub nama: String,
    pub rth_id: i32,
    pub rth_name: Option<String>,
    pub rating: i32,
    pub komentar: Option<String>,
}
