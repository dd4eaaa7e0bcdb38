use serde::Serialize;
use utoipa::ToSchema;

use crate::features::map::clustering::ClusterSize;
use crate::features::map::marker_style::{category_style, marker_size, size_css_class};
use crate::features::rth::models::RthFeature;

/// A single styled marker
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MarkerDto {
    pub objectid: i32,
    pub nama_rth: String,
    pub jenis_rth: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color: String,
    pub icon: String,
    /// Marker diameter in pixels
    pub size: u32,
    pub css_class: String,
}

impl From<&RthFeature> for MarkerDto {
    fn from(f: &RthFeature) -> Self {
        let style = category_style(&f.jenis_rth);
        Self {
            objectid: f.objectid,
            nama_rth: f.nama_rth.clone(),
            jenis_rth: f.jenis_rth.clone(),
            latitude: f.latitude,
            longitude: f.longitude,
            color: style.color.to_string(),
            icon: style.icon.to_string(),
            size: marker_size(&f.kls_luas),
            css_class: size_css_class(&f.kls_luas),
        }
    }
}

/// Several markers drawn as one bubble
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClusterDto {
    pub latitude: f64,
    pub longitude: f64,
    pub count: usize,
    pub size: ClusterSize,
    pub objectids: Vec<i32>,
}

/// Everything the map draws for the current filter and zoom
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapLayerDto {
    pub zoom: u8,
    pub visible_count: usize,
    pub clusters: Vec<ClusterDto>,
    pub markers: Vec<MarkerDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryCountDto {
    pub category: String,
    pub color: String,
    pub count: usize,
}

/// Statistics panel for the visible features
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapSummaryDto {
    pub visible_count: usize,
    /// Total area in hectares, two decimals
    pub total_area_ha: f64,
    pub total_area_display: String,
    pub categories: Vec<CategoryCountDto>,
}

/// Rendered CSV file
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: Vec<u8>,
}
