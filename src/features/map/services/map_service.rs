use chrono::{DateTime, Utc};
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::map::clustering::{cluster_points, MAX_ZOOM};
use crate::features::map::dtos::{
    CategoryCountDto, ClusterDto, CsvExport, MapLayerDto, MapSummaryDto, MarkerDto,
};
use crate::features::map::filter::{filter_features, FilterCriteria};
use crate::features::map::marker_style::category_style;
use crate::features::rth::models::RthFeature;
use crate::features::rth::reference::ReferenceIndex;
use crate::shared::constants::RTH_CATEGORIES;

/// Initial zoom of the map page
pub const DEFAULT_ZOOM: u8 = 13;

const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Nama RTH")]
    nama: &'a str,
    #[serde(rename = "Jenis RTH")]
    jenis: &'a str,
    #[serde(rename = "Luas (m2)")]
    luas: f64,
    #[serde(rename = "Vegetasi")]
    vegetasi: &'a str,
    #[serde(rename = "Tempat Duduk")]
    tempat_duduk: &'a str,
    #[serde(rename = "Tempat Sampah")]
    tempat_sampah: &'a str,
    #[serde(rename = "Penerangan")]
    penerangan: &'a str,
    #[serde(rename = "Pengunjung/hari")]
    pengunjung: i32,
}

/// Builds map layers, summaries and exports from the reference features
pub struct MapService {
    reference: Arc<ReferenceIndex>,
}

impl MapService {
    pub fn new(reference: Arc<ReferenceIndex>) -> Self {
        Self { reference }
    }

    pub fn visible(&self, criteria: &FilterCriteria) -> Vec<&RthFeature> {
        filter_features(self.reference.features(), criteria)
    }

    /// Filter, style and cluster the features for one zoom level
    pub fn layer(&self, criteria: &FilterCriteria, zoom: u8) -> MapLayerDto {
        let zoom = zoom.min(MAX_ZOOM);
        let visible = self.visible(criteria);
        let points: Vec<(f64, f64)> = visible.iter().map(|f| (f.latitude, f.longitude)).collect();

        let mut clusters = Vec::new();
        let mut markers = Vec::new();
        for cluster in cluster_points(&points, zoom) {
            if let [single] = cluster.members.as_slice() {
                markers.push(MarkerDto::from(visible[*single]));
                continue;
            }
            clusters.push(ClusterDto {
                latitude: cluster.latitude,
                longitude: cluster.longitude,
                count: cluster.members.len(),
                size: cluster.size(),
                objectids: cluster.members.iter().map(|&i| visible[i].objectid).collect(),
            });
        }

        tracing::debug!(
            "Map layer at zoom {}: {} visible, {} clusters, {} markers",
            zoom,
            visible.len(),
            clusters.len(),
            markers.len()
        );

        MapLayerDto {
            zoom,
            visible_count: visible.len(),
            clusters,
            markers,
        }
    }

    pub fn summary(&self, criteria: &FilterCriteria) -> MapSummaryDto {
        let visible = self.visible(criteria);
        summarize(&visible)
    }

    /// CSV of the visible features; an empty selection is rejected
    pub fn export_csv(&self, criteria: &FilterCriteria, now: DateTime<Utc>) -> Result<CsvExport> {
        let visible = self.visible(criteria);
        if visible.is_empty() {
            return Err(AppError::BadRequest(
                "Tidak ada data untuk diekspor".to_string(),
            ));
        }

        let content = render_csv(&visible)?;
        Ok(CsvExport {
            filename: format!("rth_pekanbaru_export_{}.csv", now.format("%Y-%m-%d")),
            content,
        })
    }
}

fn summarize(visible: &[&RthFeature]) -> MapSummaryDto {
    let total_m2: f64 = visible.iter().map(|f| f.luas_m2).sum();
    let total_area_ha = (total_m2 / SQUARE_METERS_PER_HECTARE * 100.0).round() / 100.0;

    let categories = RTH_CATEGORIES
        .iter()
        .map(|&category| CategoryCountDto {
            category: category.to_string(),
            color: category_style(category).color.to_string(),
            count: visible.iter().filter(|f| f.jenis_rth == category).count(),
        })
        .collect();

    MapSummaryDto {
        visible_count: visible.len(),
        total_area_ha,
        total_area_display: format!("{:.2}", total_area_ha),
        categories,
    }
}

fn render_csv(features: &[&RthFeature]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(Vec::new());

    for f in features {
        writer
            .serialize(CsvRow {
                nama: &f.nama_rth,
                jenis: &f.jenis_rth,
                luas: f.luas_m2,
                vegetasi: &f.vegetasi,
                tempat_duduk: &f.tmp_duduk,
                tempat_sampah: &f.tmp_sampah,
                penerangan: &f.penerangan,
                pengunjung: f.pengunjung,
            })
            .map_err(|e| AppError::Internal(format!("Failed to write CSV row: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to finish CSV: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::map::clustering::ClusterSize;
    use crate::shared::test_helpers::sample_reference;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn service() -> MapService {
        MapService::new(Arc::new(sample_reference()))
    }

    #[test]
    fn test_layer_clusters_close_features() {
        let layer = service().layer(&FilterCriteria::default(), 12);
        assert_eq!(layer.visible_count, 4);

        let clustered: usize = layer.clusters.iter().map(|c| c.count).sum();
        assert_eq!(clustered + layer.markers.len(), 4);
        assert!(layer.clusters.iter().all(|c| c.size == ClusterSize::Small));
    }

    #[test]
    fn test_layer_at_max_zoom_is_all_markers() {
        let layer = service().layer(&FilterCriteria::default(), 25);
        assert_eq!(layer.zoom, MAX_ZOOM);
        assert!(layer.clusters.is_empty());
        assert_eq!(layer.markers.len(), 4);
        assert_eq!(layer.markers[0].color, "#27ae60");
        assert_eq!(layer.markers[2].size, 42);
    }

    #[test]
    fn test_summary() {
        let summary = service().summary(&FilterCriteria::default());
        assert_eq!(summary.visible_count, 4);
        // 12000 + 3500 + 45000 + 25000 m2
        assert_eq!(summary.total_area_ha, 8.55);
        assert_eq!(summary.total_area_display, "8.55");

        let counts: Vec<usize> = summary.categories.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 0, 1]);
    }

    #[test]
    fn test_export_csv() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 3, 0, 0).unwrap();
        let criteria = FilterCriteria {
            categories: Some(HashSet::from(["Hutan Kota".to_string()])),
            ..Default::default()
        };

        let export = service().export_csv(&criteria, now).unwrap();
        assert_eq!(export.filename, "rth_pekanbaru_export_2026-10-19.csv");

        let text = String::from_utf8(export.content).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("\"Nama RTH\",\"Jenis RTH\",\"Luas (m2)\",\"Vegetasi\",\"Tempat Duduk\",\"Tempat Sampah\",\"Penerangan\",\"Pengunjung/hari\"")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("\"Hutan Kota Diponegoro\",\"Hutan Kota\",45000"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_empty_selection_is_rejected() {
        let criteria = FilterCriteria {
            categories: Some(HashSet::new()),
            ..Default::default()
        };
        let result = service().export_csv(&criteria, Utc::now());
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
