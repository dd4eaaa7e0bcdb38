use serde::Serialize;
use utoipa::ToSchema;

use crate::features::map::marker_style::category_style;
use crate::features::rth::models::{Facility, RthFeature};
use crate::shared::format::format_number;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FacilityBadgeDto {
    pub key: Facility,
    pub label: String,
    pub present: bool,
}

/// Everything the detail panel shows for one location
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RthDetailDto {
    #[serde(flatten)]
    pub feature: RthFeature,
    pub color: String,
    pub icon: String,
    /// Area with id-ID grouping, e.g. `12.000 m²`
    pub luas_display: String,
    /// Visitors per day with id-ID grouping
    pub pengunjung_display: String,
    pub facilities: Vec<FacilityBadgeDto>,
}

impl From<RthFeature> for RthDetailDto {
    fn from(feature: RthFeature) -> Self {
        let style = category_style(&feature.jenis_rth);
        let facilities = Facility::ALL
            .into_iter()
            .map(|f| FacilityBadgeDto {
                key: f,
                label: f.label().to_string(),
                present: feature.has_facility(f),
            })
            .collect();

        Self {
            color: style.color.to_string(),
            icon: style.icon.to_string(),
            luas_display: format!("{} m²", format_number(feature.luas_m2)),
            pengunjung_display: format!("{} orang/hari", format_number(feature.pengunjung as f64)),
            facilities,
            feature,
        }
    }
}
