use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::reviews::dtos::{CreateReviewDto, RatingRecapDto, ReviewResponseDto};
use crate::features::reviews::models::{NewReview, Review};
use crate::features::rth::reference::ReferenceIndex;
use crate::features::statistics::{FeatureRating, ReviewStats};
use crate::modules::gateway::DataGateway;
use crate::shared::validation::validate_dto;

pub struct ReviewService {
    gateway: Arc<dyn DataGateway>,
    reference: Arc<ReferenceIndex>,
}

impl ReviewService {
    pub fn new(gateway: Arc<dyn DataGateway>, reference: Arc<ReferenceIndex>) -> Self {
        Self { gateway, reference }
    }

    /// Validate and store a review, keeping a snapshot of the location name
    pub async fn submit(&self, dto: &CreateReviewDto) -> Result<Review> {
        validate_dto(dto)?;
        let rating = dto
            .rating
            .ok_or_else(|| AppError::Validation("Silakan berikan rating".to_string()))?;

        let review = self
            .gateway
            .insert_review(NewReview {
                nama: dto.nama.clone(),
                rth_id: dto.rth_id,
                rth_name: self.reference.name_of(dto.rth_id).map(str::to_string),
                rating,
                komentar: dto.komentar.clone(),
            })
            .await?;

        tracing::info!("Review {} submitted for RTH {}", review.id, review.rth_id);
        Ok(review)
    }

    pub fn to_response(&self, review: Review) -> ReviewResponseDto {
        ReviewResponseDto::from_review(review, &self.reference)
    }

    /// All reviews, newest first
    pub async fn list(&self) -> Vec<ReviewResponseDto> {
        self.gateway
            .fetch_all_reviews()
            .await
            .into_iter()
            .map(|r| self.to_response(r))
            .collect()
    }

    pub async fn list_for_feature(&self, rth_id: i32) -> Vec<ReviewResponseDto> {
        self.gateway
            .fetch_reviews_for_feature(rth_id)
            .await
            .into_iter()
            .map(|r| self.to_response(r))
            .collect()
    }

    pub async fn stats(&self) -> ReviewStats {
        self.gateway.compute_review_stats().await
    }

    /// Average rating per location, best first
    pub async fn ratings(&self) -> Vec<FeatureRating> {
        self.gateway.compute_rating_per_feature(&self.reference).await
    }

    pub async fn recap(&self) -> Vec<RatingRecapDto> {
        RatingRecapDto::ranked(self.ratings().await)
    }
}
