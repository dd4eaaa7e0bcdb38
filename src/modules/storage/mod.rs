//! Object storage for report photos.

mod photo_bucket;

use async_trait::async_trait;

use crate::core::error::AppError;

pub use photo_bucket::{object_key, random_suffix, PhotoBucket};

/// Destination for uploaded report photos
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store the object under `key` and return its public URL
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> Result<String, AppError>;
}
