//! Reference RTH feature set, loaded once at startup.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::features::rth::models::RthFeature;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Failed to read reference file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GeoFeature {
    properties: GeoProperties,
    geometry: Option<GeoPoint>,
}

#[derive(Debug, Deserialize)]
struct GeoPoint {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GeoProperties {
    #[serde(rename = "OBJECTID")]
    objectid: i32,
    #[serde(rename = "Nama_RTH", default, deserialize_with = "null_as_default")]
    nama_rth: String,
    #[serde(rename = "Jenis_RTH", default, deserialize_with = "null_as_default")]
    jenis_rth: String,
    #[serde(rename = "Luas_m2", default, deserialize_with = "null_as_default")]
    luas_m2: f64,
    #[serde(rename = "Kls_Luas", default, deserialize_with = "null_as_default")]
    kls_luas: String,
    #[serde(default, deserialize_with = "null_as_default")]
    vegetasi: String,
    #[serde(rename = "Tmp_Duduk", default, deserialize_with = "null_as_default")]
    tmp_duduk: String,
    #[serde(rename = "Tmp_Sampah", default, deserialize_with = "null_as_default")]
    tmp_sampah: String,
    #[serde(default, deserialize_with = "null_as_default")]
    penerangan: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pengunjung: i32,
    #[serde(rename = "Kls_Pngnjg", default, deserialize_with = "null_as_default")]
    kls_pngnjg: String,
}

/// Attributes may be `null` in exported data
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a GeoJSON FeatureCollection of RTH points.
///
/// Features that fail to parse or lack a usable Point geometry are skipped.
pub fn parse_geojson(raw: &str) -> Result<Vec<RthFeature>, ReferenceError> {
    let collection: FeatureCollection = serde_json::from_str(raw)?;

    let features = collection
        .features
        .into_iter()
        .filter_map(|value| {
            let f: GeoFeature = match serde_json::from_value(value) {
                Ok(f) => f,
                Err(e) => {
                    tracing::warn!("Skipping malformed RTH feature: {}", e);
                    return None;
                }
            };
            let point = f.geometry?;
            if point.kind != "Point" || point.coordinates.len() < 2 {
                tracing::debug!("Skipping RTH {} without point geometry", f.properties.objectid);
                return None;
            }
            let p = f.properties;
            Some(RthFeature {
                objectid: p.objectid,
                nama_rth: p.nama_rth,
                jenis_rth: p.jenis_rth,
                luas_m2: p.luas_m2,
                kls_luas: p.kls_luas,
                vegetasi: p.vegetasi,
                tmp_duduk: p.tmp_duduk,
                tmp_sampah: p.tmp_sampah,
                penerangan: p.penerangan,
                pengunjung: p.pengunjung,
                kls_pngnjg: p.kls_pngnjg,
                // GeoJSON positions are [lon, lat]
                longitude: point.coordinates[0],
                latitude: point.coordinates[1],
            })
        })
        .collect();

    Ok(features)
}

/// Read and parse the reference GeoJSON file
pub async fn load_geojson(path: impl AsRef<Path>) -> Result<Vec<RthFeature>, ReferenceError> {
    let raw = tokio::fs::read_to_string(path.as_ref()).await?;
    parse_geojson(&raw)
}

/// Immutable feature set with id lookup
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    features: Vec<RthFeature>,
    by_id: HashMap<i32, usize>,
}

impl ReferenceIndex {
    pub fn new(features: Vec<RthFeature>) -> Self {
        let by_id = features
            .iter()
            .enumerate()
            .map(|(i, f)| (f.objectid, i))
            .collect();
        Self { features, by_id }
    }

    pub fn features(&self) -> &[RthFeature] {
        &self.features
    }

    pub fn get(&self, id: i32) -> Option<&RthFeature> {
        self.by_id.get(&id).map(|&i| &self.features[i])
    }

    pub fn name_of(&self, id: i32) -> Option<&str> {
        self.get(id).map(|f| f.nama_rth.as_str())
    }

    /// Features ordered by name, case-insensitively, for location dropdowns
    pub fn sorted_by_name(&self) -> Vec<&RthFeature> {
        let mut sorted: Vec<&RthFeature> = self.features.iter().collect();
        sorted.sort_by_cached_key(|f| f.nama_rth.to_lowercase());
        sorted
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "OBJECTID": 7, "Nama_RTH": "Taman Labuai", "Jenis_RTH": "Taman Kota",
                    "Luas_m2": 5400.5, "Kls_Luas": "Sedang", "Vegetasi": "Pohon peneduh",
                    "Tmp_Duduk": "Ada", "Tmp_Sampah": "Ada", "Penerangan": "Tidak Ada",
                    "Pengunjung": 120, "Kls_Pngnjg": "Sedang"
                },
                "geometry": { "type": "Point", "coordinates": [101.45, 0.51] }
            },
            {
                "type": "Feature",
                "properties": { "OBJECTID": 8, "Nama_RTH": "Tanpa Titik" },
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn test_parse_geojson_swaps_coordinates() {
        let features = parse_geojson(SAMPLE).unwrap();
        assert_eq!(features.len(), 1);

        let f = &features[0];
        assert_eq!(f.objectid, 7);
        assert_eq!(f.nama_rth, "Taman Labuai");
        assert_eq!(f.luas_m2, 5400.5);
        assert_eq!(f.pengunjung, 120);
        assert_eq!(f.latitude, 0.51);
        assert_eq!(f.longitude, 101.45);
    }

    #[test]
    fn test_null_attributes_default_and_bad_features_are_skipped() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "properties": { "OBJECTID": 1, "Nama_RTH": "Taman Kaca Mayang", "Vegetasi": "Rindang" },
                    "geometry": { "type": "Point", "coordinates": [101.44, 0.52] }
                },
                {
                    "properties": {
                        "OBJECTID": 2, "Nama_RTH": "Jalur Hijau Sudirman", "Vegetasi": null,
                        "Pengunjung": null, "Luas_m2": null
                    },
                    "geometry": { "type": "Point", "coordinates": [101.45, 0.50] }
                },
                {
                    "properties": { "OBJECTID": "tiga" },
                    "geometry": { "type": "Point", "coordinates": [101.46, 0.49] }
                }
            ]
        }"#;

        let features = parse_geojson(raw).unwrap();
        let ids: Vec<i32> = features.iter().map(|f| f.objectid).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(features[1].vegetasi, "");
        assert_eq!(features[1].pengunjung, 0);
        assert_eq!(features[1].luas_m2, 0.0);
    }

    #[test]
    fn test_parse_geojson_rejects_garbage() {
        assert!(matches!(
            parse_geojson("not json"),
            Err(ReferenceError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_geojson("/definitely/not/here.geojson").await;
        assert!(matches!(result, Err(ReferenceError::Io(_))));
    }

    #[test]
    fn test_index_lookup_and_sorting() {
        let parsed = parse_geojson(SAMPLE).unwrap();
        let mut features = parsed.clone();
        let mut other = parsed[0].clone();
        other.objectid = 3;
        other.nama_rth = "hutan Kota Diponegoro".to_string();
        features.push(other);

        let index = ReferenceIndex::new(features);
        assert_eq!(index.len(), 2);
        assert_eq!(index.name_of(7), Some("Taman Labuai"));
        assert_eq!(index.name_of(99), None);

        let names: Vec<&str> = index
            .sorted_by_name()
            .iter()
            .map(|f| f.nama_rth.as_str())
            .collect();
        assert_eq!(names, vec!["hutan Kota Diponegoro", "Taman Labuai"]);
    }
}
