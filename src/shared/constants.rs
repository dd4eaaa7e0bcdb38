/// RTH categories shown on the map, in legend order
pub const RTH_CATEGORIES: &[&str] = &[
    "Taman Kota",
    "Jalur Hijau Di Jalan",
    "Taman",
    "Kebun Bibit",
    "Hutan Kota",
];

/// Area classes, smallest first
pub const AREA_CLASSES: &[&str] = &["Kecil", "Sedang", "Besar", "Sangat Besar"];

/// Visitor classes, quietest first
pub const VISITOR_CLASSES: &[&str] = &["Rendah", "Sedang", "Tinggi"];

/// Issue categories offered on the report form
pub const REPORT_CATEGORIES: &[&str] = &[
    "Kerusakan Fasilitas",
    "Kebersihan",
    "Penerangan",
    "Keamanan",
    "Vegetasi",
    "Lainnya",
];

/// Facility attribute value meaning "present"
pub const FACILITY_PRESENT: &str = "Ada";

/// Display name for a report or review whose RTH cannot be resolved
pub const UNKNOWN_FEATURE_NAME: &str = "Unknown";

/// Maximum photo size accepted on the report form (5MB)
pub const MAX_PHOTO_SIZE: usize = 5 * 1024 * 1024;

/// Object key prefix for report photos
pub const PHOTO_KEY_PREFIX: &str = "laporan";

/// Local store keys
pub const LOCAL_REPORTS_KEY: &str = "rth_laporan";
pub const LOCAL_REVIEWS_KEY: &str = "rth_review";

/// Notification auto-dismiss delays, in milliseconds
pub const PUBLIC_NOTICE_DISMISS_MS: u32 = 5000;
pub const ADMIN_NOTICE_DISMISS_MS: u32 = 3000;
