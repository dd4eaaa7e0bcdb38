use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::ReportService;
use crate::features::reviews::dtos::ReviewResponseDto;
use crate::features::reviews::ReviewService;
use crate::features::rth::dtos::RthDetailDto;
use crate::features::rth::models::RthFeature;
use crate::features::rth::reference::ReferenceIndex;

/// Read access to the reference features and the records attached to them
pub struct RthService {
    reference: Arc<ReferenceIndex>,
    report_service: Arc<ReportService>,
    review_service: Arc<ReviewService>,
}

impl RthService {
    pub fn new(
        reference: Arc<ReferenceIndex>,
        report_service: Arc<ReportService>,
        review_service: Arc<ReviewService>,
    ) -> Self {
        Self {
            reference,
            report_service,
            review_service,
        }
    }

    /// Features sorted by name, as offered in location dropdowns
    pub fn list(&self) -> Vec<RthFeature> {
        self.reference.sorted_by_name().into_iter().cloned().collect()
    }

    pub fn get(&self, id: i32) -> Result<RthDetailDto> {
        self.reference
            .get(id)
            .cloned()
            .map(RthDetailDto::from)
            .ok_or_else(|| AppError::NotFound(format!("RTH {} tidak ditemukan", id)))
    }

    pub async fn reports(&self, id: i32) -> Result<Vec<ReportResponseDto>> {
        self.get(id)?;
        Ok(self.report_service.list_for_feature(id).await)
    }

    pub async fn reviews(&self, id: i32) -> Result<Vec<ReviewResponseDto>> {
        self.get(id)?;
        Ok(self.review_service.list_for_feature(id).await)
    }
}
