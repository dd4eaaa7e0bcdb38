use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::shared::constants::FACILITY_PRESENT;

/// A green-space (RTH) location from the reference data set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RthFeature {
    pub objectid: i32,
    pub nama_rth: String,
    /// Category, e.g. "Taman Kota"
    pub jenis_rth: String,
    pub luas_m2: f64,
    /// Area class, e.g. "Sedang"
    pub kls_luas: String,
    pub vegetasi: String,
    pub tmp_duduk: String,
    pub tmp_sampah: String,
    pub penerangan: String,
    /// Visitors per day
    pub pengunjung: i32,
    /// Visitor class, e.g. "Tinggi"
    pub kls_pngnjg: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl RthFeature {
    /// Raw attribute value for a facility flag
    pub fn facility_value(&self, facility: Facility) -> &str {
        match facility {
            Facility::Seating => &self.tmp_duduk,
            Facility::Trash => &self.tmp_sampah,
            Facility::Lighting => &self.penerangan,
        }
    }

    pub fn has_facility(&self, facility: Facility) -> bool {
        self.facility_value(facility) == FACILITY_PRESENT
    }
}

/// Facility flags a feature can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Facility {
    #[serde(rename = "tempat_duduk")]
    Seating,
    #[serde(rename = "tempat_sampah")]
    Trash,
    #[serde(rename = "penerangan")]
    Lighting,
}

impl Facility {
    pub const ALL: [Facility; 3] = [Facility::Seating, Facility::Trash, Facility::Lighting];

    pub fn as_str(&self) -> &'static str {
        match self {
            Facility::Seating => "tempat_duduk",
            Facility::Trash => "tempat_sampah",
            Facility::Lighting => "penerangan",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Facility::Seating => "Tempat Duduk",
            Facility::Trash => "Tempat Sampah",
            Facility::Lighting => "Penerangan",
        }
    }
}

impl std::fmt::Display for Facility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Facility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "tempat_duduk" | "seating" => Ok(Facility::Seating),
            "tempat_sampah" | "trash" => Ok(Facility::Trash),
            "penerangan" | "lighting" => Ok(Facility::Lighting),
            other => Err(format!("Unknown facility '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::feature;

    #[test]
    fn test_facility_presence() {
        let mut f = feature(1, "Taman Kaca Mayang", "Taman Kota");
        f.tmp_duduk = "Ada".to_string();
        f.tmp_sampah = "Tidak Ada".to_string();
        f.penerangan = "ada".to_string();

        assert!(f.has_facility(Facility::Seating));
        assert!(!f.has_facility(Facility::Trash));
        // Only the exact "Ada" value counts as present
        assert!(!f.has_facility(Facility::Lighting));
    }

    #[test]
    fn test_facility_parse() {
        assert_eq!("tempat_duduk".parse::<Facility>(), Ok(Facility::Seating));
        assert_eq!(" penerangan ".parse::<Facility>(), Ok(Facility::Lighting));
        assert_eq!("trash".parse::<Facility>(), Ok(Facility::Trash));
        assert!("kolam".parse::<Facility>().is_err());
    }
}
