use serde::{Deserialize, Serialize};

use crate::features::admin::dtos::{AdminRatingsDto, AdminReportListDto, AdminSummaryDto};
use crate::features::map::dtos::MapSummaryDto;
use crate::features::reports::dtos::{ReportForm, ReportResponseDto};
use crate::features::reports::models::ReportStatus;
use crate::features::reviews::dtos::{RatingRecapDto, ReviewForm, ReviewResponseDto};
use crate::features::rth::models::RthFeature;
use crate::features::statistics::{ReportCounts, ReviewStats};
use crate::modules::gateway::GatewayMode;

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
}

impl NoticeKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NoticeKind::Success => "check-circle",
            NoticeKind::Error => "exclamation-circle",
            NoticeKind::Warning => "exclamation-triangle",
        }
    }

    /// Lenient parse for the `kind` query parameter
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("error") => NoticeKind::Error,
            Some("warning") => NoticeKind::Warning,
            _ => NoticeKind::Success,
        }
    }
}

/// One dismissible notification banner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub icon: &'static str,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            icon: kind.icon(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }
}

// =============================================================================
// SHARED PAGE DATA
// =============================================================================

/// Data every page passes to `base.jinja`
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub title: &'static str,
    /// Nav entry to highlight
    pub active: &'static str,
    pub mode: GatewayMode,
    pub dismiss_ms: u32,
    pub notices: Vec<Notice>,
}

/// Entry of a location dropdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationOption {
    pub value: String,
    pub label: String,
}

impl From<&RthFeature> for LocationOption {
    fn from(feature: &RthFeature) -> Self {
        Self {
            value: feature.objectid.to_string(),
            label: format!("{} ({})", feature.nama_rth, feature.jenis_rth),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

// =============================================================================
// TABS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LaporanTab {
    #[default]
    Form,
    List,
}

impl LaporanTab {
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("list") => LaporanTab::List,
            _ => LaporanTab::Form,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewTab {
    #[default]
    Form,
    List,
    Rekap,
}

impl ReviewTab {
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("list") => ReviewTab::List,
            Some("rekap") => ReviewTab::Rekap,
            _ => ReviewTab::Form,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminTab {
    #[default]
    Laporan,
    Rating,
}

impl AdminTab {
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("rating") => AdminTab::Rating,
            _ => AdminTab::Laporan,
        }
    }
}

// =============================================================================
// QUERY / FORM INPUT
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LaporanPageQuery {
    pub tab: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewPageQuery {
    pub tab: Option<String>,
    /// Location filter of the review list
    pub rth: Option<String>,
}

impl ReviewPageQuery {
    pub fn rth_filter(&self) -> Option<i32> {
        self.rth.as_deref().and_then(|r| r.trim().parse().ok())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminPageQuery {
    pub tab: Option<String>,
    pub status: Option<String>,
    pub notice: Option<String>,
    pub kind: Option<String>,
}

/// Status button form on the admin report table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusChangeForm {
    #[serde(default)]
    pub status: String,
    /// Table filter to return to
    #[serde(default)]
    pub filter: String,
}

// =============================================================================
// PAGE CONTEXTS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct IndexContext {
    #[serde(flatten)]
    pub page: PageMeta,
    pub summary: MapSummaryDto,
    pub reports: ReportCounts,
    pub reviews: ReviewStats,
    pub average_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PetaContext {
    #[serde(flatten)]
    pub page: PageMeta,
    pub legend: Vec<LegendEntry>,
    pub area_classes: &'static [&'static str],
    pub visitor_classes: &'static [&'static str],
    pub facilities: Vec<SelectOption>,
    pub center: [f64; 2],
    pub zoom: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaporanContext {
    #[serde(flatten)]
    pub page: PageMeta,
    pub tab: LaporanTab,
    pub form: ReportForm,
    pub locations: Vec<LocationOption>,
    pub categories: &'static [&'static str],
    pub reports: Vec<ReportResponseDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewContext {
    #[serde(flatten)]
    pub page: PageMeta,
    pub tab: ReviewTab,
    pub form: ReviewForm,
    pub locations: Vec<LocationOption>,
    pub filter_rth: Option<String>,
    pub reviews: Vec<ReviewResponseDto>,
    pub recap: Vec<RatingRecapDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminContext {
    #[serde(flatten)]
    pub page: PageMeta,
    pub tab: AdminTab,
    pub summary: AdminSummaryDto,
    pub report_list: AdminReportListDto,
    /// Current status filter, empty for all
    pub status_filter: String,
    pub statuses: Vec<SelectOption>,
    pub ratings: AdminRatingsDto,
}

pub fn status_options() -> Vec<SelectOption> {
    ReportStatus::ALL
        .into_iter()
        .map(|s| SelectOption {
            value: s.as_str().to_string(),
            label: s.label().to_string(),
        })
        .collect()
}
