use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;

/// Lifecycle of a citizen report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[serde(alias = "new")]
    Baru,
    #[serde(alias = "in-progress", alias = "in_progress")]
    Diproses,
    #[serde(alias = "done")]
    Selesai,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Baru,
        ReportStatus::Diproses,
        ReportStatus::Selesai,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Baru => "baru",
            ReportStatus::Diproses => "diproses",
            ReportStatus::Selesai => "selesai",
        }
    }

    /// Human readable label for badges and buttons
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Baru => "Baru",
            ReportStatus::Diproses => "Diproses",
            ReportStatus::Selesai => "Selesai",
        }
    }

    /// The statuses a report in this status can be moved to
    pub fn transitions(&self) -> Vec<ReportStatus> {
        Self::ALL.into_iter().filter(|s| s != self).collect()
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baru" | "new" => Ok(ReportStatus::Baru),
            "diproses" | "in-progress" | "in_progress" => Ok(ReportStatus::Diproses),
            "selesai" | "done" => Ok(ReportStatus::Selesai),
            other => Err(format!("Status laporan tidak dikenal: '{}'", other)),
        }
    }
}

/// A stored citizen report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub nama_pelapor: String,
    pub rth_id: i32,
    pub kategori: String,
    pub deskripsi: String,
    #[serde(default)]
    pub foto_url: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Row shape of the `laporan` table; status is plain text guarded by a CHECK
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub id: String,
    pub nama_pelapor: String,
    pub rth_id: i32,
    pub kategori: String,
    pub deskripsi: String,
    pub foto_url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReportRow> for Report {
    type Error = String;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: row.status.parse()?,
            id: row.id,
            nama_pelapor: row.nama_pelapor,
            rth_id: row.rth_id,
            kategori: row.kategori,
            deskripsi: row.deskripsi,
            foto_url: row.foto_url,
            created_at: row.created_at,
        })
    }
}

/// Data for inserting a new report; status always starts at `baru`
#[derive(Debug, Clone)]
pub struct NewReport {
    pub nama_pelapor: String,
    pub rth_id: i32,
    pub kategori: String,
    pub deskripsi: String,
    pub foto_url: Option<String>,
}

/// An image attached to a report submission
#[derive(Debug, Clone)]
pub struct ReportPhoto {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ReportPhoto {
    /// File extension for the stored object, from the upload name or the MIME subtype
    pub fn extension(&self) -> String {
        let from_name = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.trim().to_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

        from_name.unwrap_or_else(|| {
            self.content_type
                .split_once('/')
                .map(|(_, sub)| sub.split(['+', ';']).next().unwrap_or(sub).to_lowercase())
                .unwrap_or_else(|| "bin".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accepts_aliases() {
        let parsed: ReportStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(parsed, ReportStatus::Diproses);
        let parsed: ReportStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(parsed, ReportStatus::Selesai);
        assert_eq!("NEW".parse::<ReportStatus>(), Ok(ReportStatus::Baru));
        assert!("archived".parse::<ReportStatus>().is_err());

        assert_eq!(
            serde_json::to_string(&ReportStatus::Diproses).unwrap(),
            "\"diproses\""
        );
    }

    #[test]
    fn test_transitions_exclude_current() {
        assert_eq!(
            ReportStatus::Diproses.transitions(),
            vec![ReportStatus::Baru, ReportStatus::Selesai]
        );
    }

    #[test]
    fn test_row_with_unknown_status_is_rejected() {
        let row = ReportRow {
            id: "a".into(),
            nama_pelapor: "Budi".into(),
            rth_id: 1,
            kategori: "Kebersihan".into(),
            deskripsi: "Sampah menumpuk".into(),
            foto_url: None,
            status: "hilang".into(),
            created_at: Utc::now(),
        };
        assert!(Report::try_from(row).is_err());
    }

    #[test]
    fn test_photo_extension() {
        let photo = |name: &str, ct: &str| ReportPhoto {
            file_name: name.to_string(),
            content_type: ct.to_string(),
            data: vec![],
        };

        assert_eq!(photo("bangku.JPG", "image/jpeg").extension(), "jpg");
        assert_eq!(photo("kamera", "image/png").extension(), "png");
        assert_eq!(photo("", "image/svg+xml").extension(), "svg");
    }
}
