use serde::Serialize;
use utoipa::ToSchema;

/// Color and Font Awesome icon for one RTH category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CategoryStyle {
    pub color: &'static str,
    pub icon: &'static str,
}

const CATEGORY_STYLES: &[(&str, CategoryStyle)] = &[
    (
        "Taman Kota",
        CategoryStyle {
            color: "#27ae60",
            icon: "fa-tree",
        },
    ),
    (
        "Jalur Hijau Di Jalan",
        CategoryStyle {
            color: "#3498db",
            icon: "fa-road",
        },
    ),
    (
        "Taman",
        CategoryStyle {
            color: "#9b59b6",
            icon: "fa-spa",
        },
    ),
    (
        "Kebun Bibit",
        CategoryStyle {
            color: "#e67e22",
            icon: "fa-seedling",
        },
    ),
    (
        "Hutan Kota",
        CategoryStyle {
            color: "#16a085",
            icon: "fa-mountain",
        },
    ),
];

const DEFAULT_STYLE: CategoryStyle = CategoryStyle {
    color: "#95a5a6",
    icon: "fa-map-marker",
};

const AREA_SIZES: &[(&str, u32)] = &[("Kecil", 24), ("Sedang", 30), ("Besar", 36), ("Sangat Besar", 42)];

const DEFAULT_SIZE: u32 = 24;

pub fn category_style(category: &str) -> CategoryStyle {
    CATEGORY_STYLES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, style)| *style)
        .unwrap_or(DEFAULT_STYLE)
}

/// Marker diameter in pixels for an area class
pub fn marker_size(area_class: &str) -> u32 {
    AREA_SIZES
        .iter()
        .find(|(class, _)| *class == area_class)
        .map(|(_, size)| *size)
        .unwrap_or(DEFAULT_SIZE)
}

/// CSS class for an area class, e.g. `marker-sangat-besar`
pub fn size_css_class(area_class: &str) -> String {
    let slug = area_class
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "marker-kecil".to_string()
    } else {
        format!("marker-{}", slug)
    }
}

/// Legend entries in display order
pub fn legend() -> Vec<(&'static str, CategoryStyle)> {
    CATEGORY_STYLES.to_vec()
}
