use async_trait::async_trait;
use chrono::Utc;
use fake::faker::name::en::Name;
use fake::Fake;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{NewReport, Report, ReportPhoto, ReportStatus};
use crate::features::reviews::models::{NewReview, Review};
use crate::features::rth::models::RthFeature;
use crate::features::rth::reference::ReferenceIndex;
use crate::modules::gateway::{DataGateway, GatewayMode, LocalGateway};
use crate::modules::local_store::LocalStore;

pub fn feature(objectid: i32, nama: &str, jenis: &str) -> RthFeature {
    RthFeature {
        objectid,
        nama_rth: nama.to_string(),
        jenis_rth: jenis.to_string(),
        luas_m2: 1000.0,
        kls_luas: "Kecil".to_string(),
        vegetasi: "Rumput".to_string(),
        tmp_duduk: "Tidak Ada".to_string(),
        tmp_sampah: "Tidak Ada".to_string(),
        penerangan: "Tidak Ada".to_string(),
        pengunjung: 50,
        kls_pngnjg: "Rendah".to_string(),
        latitude: 0.5071,
        longitude: 101.4478,
    }
}

#[allow(clippy::too_many_arguments)]
fn located(
    objectid: i32,
    nama: &str,
    jenis: &str,
    luas_m2: f64,
    kls_luas: &str,
    kls_pngnjg: &str,
    facilities: [&str; 3],
    lat_lon: (f64, f64),
) -> RthFeature {
    RthFeature {
        luas_m2,
        kls_luas: kls_luas.to_string(),
        kls_pngnjg: kls_pngnjg.to_string(),
        tmp_duduk: facilities[0].to_string(),
        tmp_sampah: facilities[1].to_string(),
        penerangan: facilities[2].to_string(),
        latitude: lat_lon.0,
        longitude: lat_lon.1,
        ..feature(objectid, nama, jenis)
    }
}

/// Four features spread over Pekanbaru with mixed attributes
pub fn sample_features() -> Vec<RthFeature> {
    vec![
        located(
            1,
            "Taman Kaca Mayang",
            "Taman Kota",
            12000.0,
            "Sedang",
            "Tinggi",
            ["Ada", "Ada", "Ada"],
            (0.5235, 101.4478),
        ),
        located(
            2,
            "Jalur Hijau Sudirman",
            "Jalur Hijau Di Jalan",
            3500.0,
            "Kecil",
            "Rendah",
            ["Ada", "Tidak Ada", "Ada"],
            (0.5071, 101.4480),
        ),
        located(
            3,
            "Hutan Kota Diponegoro",
            "Hutan Kota",
            45000.0,
            "Sangat Besar",
            "Sedang",
            ["Tidak Ada", "Ada", "Tidak Ada"],
            (0.5100, 101.4600),
        ),
        located(
            4,
            "Taman Rekreasi Alam Mayang",
            "Taman",
            25000.0,
            "Besar",
            "Tinggi",
            ["Ada", "Ada", "Tidak Ada"],
            (0.4800, 101.4300),
        ),
    ]
}

pub fn sample_reference() -> ReferenceIndex {
    ReferenceIndex::new(sample_features())
}

pub fn report_with_status(status: ReportStatus) -> Report {
    Report {
        id: Uuid::new_v4().to_string(),
        nama_pelapor: Name().fake(),
        rth_id: 1,
        kategori: "Kebersihan".to_string(),
        deskripsi: "Sampah menumpuk di dekat pintu masuk".to_string(),
        foto_url: None,
        status,
        created_at: Utc::now(),
    }
}

pub fn review(rth_id: i32, rating: i32) -> Review {
    Review {
        id: Uuid::new_v4().to_string(),
        nama: Name().fake(),
        rth_id,
        rth_name: None,
        rating,
        komentar: None,
        created_at: Utc::now(),
    }
}

pub fn new_report(rth_id: i32) -> NewReport {
    NewReport {
        nama_pelapor: Name().fake(),
        rth_id,
        kategori: "Penerangan".to_string(),
        deskripsi: "Lampu taman mati sejak minggu lalu".to_string(),
        foto_url: None,
    }
}

pub fn new_review(rth_id: i32, rating: i32) -> NewReview {
    NewReview {
        nama: Name().fake(),
        rth_id,
        rth_name: None,
        rating,
        komentar: Some("Tempatnya asri".to_string()),
    }
}

/// Fresh, not yet created directory under the system temp dir
pub fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("rth-webgis-test-{}", Uuid::new_v4()))
}

pub fn local_gateway() -> LocalGateway {
    LocalGateway::new(LocalStore::new(temp_dir()), sample_features())
}

/// Gateway that records the order of calls and can pretend photo storage works
pub struct RecordingGateway {
    inner: LocalGateway,
    pub calls: Mutex<Vec<&'static str>>,
    pub photo_url: Option<String>,
    pub fail_writes: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            inner: local_gateway(),
            calls: Mutex::new(Vec::new()),
            photo_url: Some("http://storage.test/foto-laporan/laporan/1_abc123.jpg".to_string()),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    /// Photo uploads fail, as with an unreachable bucket
    pub fn without_photo_storage() -> Self {
        Self {
            photo_url: None,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: &'static str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn write_guard(&self) -> Result<()> {
        if self.fail_writes {
            Err(AppError::Internal("store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DataGateway for RecordingGateway {
    fn mode(&self) -> GatewayMode {
        GatewayMode::Remote
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn fetch_all_features(&self) -> Vec<RthFeature> {
        self.inner.fetch_all_features().await
    }

    async fn fetch_all_reports(&self) -> Vec<Report> {
        self.record("fetch_reports");
        self.inner.fetch_all_reports().await
    }

    async fn fetch_reports_for_feature(&self, rth_id: i32) -> Vec<Report> {
        self.inner.fetch_reports_for_feature(rth_id).await
    }

    async fn insert_report(&self, report: NewReport) -> Result<Report> {
        self.record("insert");
        self.write_guard()?;
        self.inner.insert_report(report).await
    }

    async fn set_report_status(&self, id: &str, status: ReportStatus) -> Result<Report> {
        self.record("set_status");
        self.write_guard()?;
        self.inner.set_report_status(id, status).await
    }

    async fn delete_report(&self, id: &str) -> Result<()> {
        self.record("delete");
        self.write_guard()?;
        self.inner.delete_report(id).await
    }

    async fn fetch_all_reviews(&self) -> Vec<Review> {
        self.inner.fetch_all_reviews().await
    }

    async fn fetch_reviews_for_feature(&self, rth_id: i32) -> Vec<Review> {
        self.inner.fetch_reviews_for_feature(rth_id).await
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review> {
        self.record("insert_review");
        self.write_guard()?;
        self.inner.insert_review(review).await
    }

    async fn upload_photo(&self, _photo: &ReportPhoto) -> Option<String> {
        // Yield so a concurrent insert would get the chance to overtake
        tokio::task::yield_now().await;
        self.record("upload");
        self.photo_url.clone()
    }
}

pub fn recording_gateway() -> Arc<RecordingGateway> {
    Arc::new(RecordingGateway::new())
}
