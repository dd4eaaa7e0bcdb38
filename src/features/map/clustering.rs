//! Greedy proximity clustering of map markers.
//!
//! The radius is fixed in screen pixels and converted to ground meters for
//! the requested zoom, so clusters break apart as the user zooms in.

use serde::Serialize;
use utoipa::ToSchema;

/// Clustering radius in screen pixels
pub const CLUSTER_RADIUS_PX: f64 = 50.0;

/// Earth's radius in meters (for Haversine formula)
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Web-Mercator ground resolution at the equator for zoom 0, meters per pixel
const EQUATOR_METERS_PER_PIXEL: f64 = 156_543.033_92;

pub const MAX_ZOOM: u8 = 20;

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_METERS * c
}

/// Ground distance covered by one screen pixel at `latitude` and `zoom`
pub fn meters_per_pixel(latitude: f64, zoom: u8) -> f64 {
    let zoom = zoom.min(MAX_ZOOM) as i32;
    EQUATOR_METERS_PER_PIXEL * latitude.to_radians().cos() / 2f64.powi(zoom)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClusterSize {
    Small,
    Medium,
    Large,
}

impl ClusterSize {
    pub fn for_count(count: usize) -> Self {
        match count {
            c if c >= 50 => ClusterSize::Large,
            c if c >= 10 => ClusterSize::Medium,
            _ => ClusterSize::Small,
        }
    }
}

/// A group of nearby points, holding indices into the clustered input
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub latitude: f64,
    pub longitude: f64,
    pub members: Vec<usize>,
}

impl Cluster {
    pub fn size(&self) -> ClusterSize {
        ClusterSize::for_count(self.members.len())
    }
}

/// Greedily assign each point to the first cluster whose center lies within
/// the pixel radius, otherwise start a new cluster. Centers move to the
/// running mean of their members.
pub fn cluster_points(points: &[(f64, f64)], zoom: u8) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for (index, &(lat, lon)) in points.iter().enumerate() {
        let radius_meters = CLUSTER_RADIUS_PX * meters_per_pixel(lat, zoom);

        let nearby = clusters.iter_mut().find(|c| {
            haversine_distance(lat, lon, c.latitude, c.longitude) <= radius_meters
        });

        match nearby {
            Some(cluster) => {
                // new_center = (old_center * old_count + new_point) / (old_count + 1)
                let count = cluster.members.len() as f64;
                cluster.latitude = (cluster.latitude * count + lat) / (count + 1.0);
                cluster.longitude = (cluster.longitude * count + lon) / (count + 1.0);
                cluster.members.push(index);
            }
            None => clusters.push(Cluster {
                latitude: lat,
                longitude: lon,
                members: vec![index],
            }),
        }
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // One degree of longitude at the equator
        let d = haversine_distance(0.0, 101.0, 0.0, 102.0);
        assert!((d - 111_194.9).abs() < 1.0, "got {}", d);
        assert_eq!(haversine_distance(0.5, 101.4, 0.5, 101.4), 0.0);
    }

    #[test]
    fn test_meters_per_pixel_halves_per_zoom() {
        let z13 = meters_per_pixel(0.0, 13);
        let z14 = meters_per_pixel(0.0, 14);
        assert!((z13 - 19.109).abs() < 0.01);
        assert!((z13 / z14 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_nearby_points_merge_at_low_zoom() {
        // About 550 m apart
        let points = [(0.5071, 101.4478), (0.5120, 101.4480), (0.6000, 101.6000)];

        let clusters = cluster_points(&points, 13);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members, vec![0, 1]);
        assert!((clusters[0].latitude - 0.50955).abs() < 1e-9);
        assert_eq!(clusters[1].members, vec![2]);

        // At zoom 18 a 50 px radius is about 30 m
        let clusters = cluster_points(&points, 18);
        assert_eq!(clusters.len(), 3);
    }

    #[test]
    fn test_cluster_size_classes() {
        assert_eq!(ClusterSize::for_count(2), ClusterSize::Small);
        assert_eq!(ClusterSize::for_count(9), ClusterSize::Small);
        assert_eq!(ClusterSize::for_count(10), ClusterSize::Medium);
        assert_eq!(ClusterSize::for_count(49), ClusterSize::Medium);
        assert_eq!(ClusterSize::for_count(50), ClusterSize::Large);
    }
}
