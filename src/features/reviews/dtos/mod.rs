mod review_dto;

pub use review_dto::{CreateReviewDto, RatingRecapDto, ReviewForm, ReviewResponseDto};
