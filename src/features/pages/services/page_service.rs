use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::admin::dtos::AdminReportQuery;
use crate::features::admin::AdminService;
use crate::features::map::filter::FilterCriteria;
use crate::features::map::marker_style::legend;
use crate::features::map::MapService;
use crate::features::pages::dtos::*;
use crate::features::reports::dtos::{ReportForm, ReportSubmission};
use crate::features::reports::models::ReportStatus;
use crate::features::reports::ReportService;
use crate::features::reviews::dtos::ReviewForm;
use crate::features::reviews::ReviewService;
use crate::features::rth::models::Facility;
use crate::features::rth::reference::ReferenceIndex;
use crate::modules::gateway::GatewayMode;
use crate::shared::constants::{
    ADMIN_NOTICE_DISMISS_MS, AREA_CLASSES, PUBLIC_NOTICE_DISMISS_MS, REPORT_CATEGORIES,
    VISITOR_CLASSES,
};

/// Map centre over Pekanbaru
pub const MAP_CENTER: [f64; 2] = [0.5071, 101.4478];

const DEMO_WARNING: &str = "Mode Demo: Data disimpan secara lokal di server.";
const REFERENCE_LOAD_ERROR: &str = "Gagal memuat data RTH";
const REPORT_WRITE_ERROR: &str = "Gagal mengirim laporan. Silakan coba lagi.";
const REVIEW_WRITE_ERROR: &str = "Gagal mengirim review. Silakan coba lagi.";
const STATUS_WRITE_ERROR: &str = "Gagal mengubah status";

/// Builds the template context of every server-rendered page
pub struct PageService {
    reference: Arc<ReferenceIndex>,
    map_service: Arc<MapService>,
    report_service: Arc<ReportService>,
    review_service: Arc<ReviewService>,
    admin_service: Arc<AdminService>,
    mode: GatewayMode,
    reference_failed: bool,
}

impl PageService {
    pub fn new(
        reference: Arc<ReferenceIndex>,
        map_service: Arc<MapService>,
        report_service: Arc<ReportService>,
        review_service: Arc<ReviewService>,
        admin_service: Arc<AdminService>,
        mode: GatewayMode,
    ) -> Self {
        Self {
            reference_failed: reference.is_empty(),
            reference,
            map_service,
            report_service,
            review_service,
            admin_service,
            mode,
        }
    }

    fn meta(
        &self,
        title: &'static str,
        active: &'static str,
        dismiss_ms: u32,
        mut notices: Vec<Notice>,
        demo_warning: bool,
    ) -> PageMeta {
        if self.reference_failed {
            notices.insert(0, Notice::error(REFERENCE_LOAD_ERROR));
        }
        if demo_warning && self.mode.is_demo() {
            notices.insert(0, Notice::warning(DEMO_WARNING));
        }

        PageMeta {
            title,
            active,
            mode: self.mode,
            dismiss_ms,
            notices,
        }
    }

    fn locations(&self) -> Vec<LocationOption> {
        self.reference
            .sorted_by_name()
            .into_iter()
            .map(LocationOption::from)
            .collect()
    }

    pub async fn index(&self) -> IndexContext {
        let (reports, reviews) =
            tokio::join!(self.report_service.counts(), self.review_service.stats());

        IndexContext {
            page: self.meta("Beranda", "index", PUBLIC_NOTICE_DISMISS_MS, Vec::new(), false),
            summary: self.map_service.summary(&FilterCriteria::default()),
            average_display: reviews.average_display(),
            reports,
            reviews,
        }
    }

    pub fn peta(&self) -> PetaContext {
        PetaContext {
            page: self.meta("Peta RTH", "peta", PUBLIC_NOTICE_DISMISS_MS, Vec::new(), false),
            legend: legend()
                .into_iter()
                .map(|(name, style)| LegendEntry {
                    name,
                    color: style.color,
                    icon: style.icon,
                })
                .collect(),
            area_classes: AREA_CLASSES,
            visitor_classes: VISITOR_CLASSES,
            facilities: Facility::ALL
                .into_iter()
                .map(|f| SelectOption {
                    value: f.as_str().to_string(),
                    label: f.label().to_string(),
                })
                .collect(),
            center: MAP_CENTER,
            zoom: crate::features::map::services::DEFAULT_ZOOM,
        }
    }

    // =========================================================================
    // REPORT PAGE
    // =========================================================================

    pub async fn laporan(
        &self,
        tab: LaporanTab,
        form: ReportForm,
        notices: Vec<Notice>,
    ) -> LaporanContext {
        let reports = match tab {
            LaporanTab::List => self.report_service.list().await,
            LaporanTab::Form => Vec::new(),
        };

        LaporanContext {
            page: self.meta("Laporan", "laporan", PUBLIC_NOTICE_DISMISS_MS, notices, true),
            tab,
            form,
            locations: self.locations(),
            categories: REPORT_CATEGORIES,
            reports,
        }
    }

    /// Submit the report form; the form is cleared only on success
    pub async fn submit_report(&self, submission: ReportSubmission) -> LaporanContext {
        let ReportSubmission { form, photo } = submission;

        match self.report_service.submit(&form.to_dto(), photo).await {
            Ok(_) => {
                let notice =
                    Notice::success("Laporan berhasil dikirim! Terima kasih atas partisipasi Anda.");
                self.laporan(LaporanTab::Form, ReportForm::default(), vec![notice])
                    .await
            }
            Err(e) => {
                let notice = Notice::error(form_error_message(&e, REPORT_WRITE_ERROR));
                self.laporan(LaporanTab::Form, form, vec![notice]).await
            }
        }
    }

    // =========================================================================
    // REVIEW PAGE
    // =========================================================================

    pub async fn review(
        &self,
        tab: ReviewTab,
        filter_rth: Option<i32>,
        form: ReviewForm,
        notices: Vec<Notice>,
    ) -> ReviewContext {
        let (reviews, recap) = match tab {
            ReviewTab::List => {
                let reviews = match filter_rth {
                    Some(id) => self.review_service.list_for_feature(id).await,
                    None => self.review_service.list().await,
                };
                (reviews, Vec::new())
            }
            ReviewTab::Rekap => (Vec::new(), self.review_service.recap().await),
            ReviewTab::Form => (Vec::new(), Vec::new()),
        };

        ReviewContext {
            page: self.meta("Review", "review", PUBLIC_NOTICE_DISMISS_MS, notices, true),
            tab,
            form,
            locations: self.locations(),
            filter_rth: filter_rth.map(|id| id.to_string()),
            reviews,
            recap,
        }
    }

    pub async fn submit_review(&self, form: ReviewForm) -> ReviewContext {
        match self.review_service.submit(&form.to_dto()).await {
            Ok(_) => {
                let notice =
                    Notice::success("Review berhasil dikirim! Terima kasih atas ulasan Anda.");
                self.review(ReviewTab::Form, None, ReviewForm::default(), vec![notice])
                    .await
            }
            Err(e) => {
                let notice = Notice::error(form_error_message(&e, REVIEW_WRITE_ERROR));
                self.review(ReviewTab::Form, None, form, vec![notice]).await
            }
        }
    }

    // =========================================================================
    // ADMIN DASHBOARD
    // =========================================================================

    pub async fn admin(&self, query: AdminPageQuery) -> AdminContext {
        let mut notices = Vec::new();
        if let Some(message) = query.notice.as_deref().filter(|m| !m.trim().is_empty()) {
            notices.push(Notice::new(
                NoticeKind::from_query(query.kind.as_deref()),
                message,
            ));
        }

        let filter = AdminReportQuery {
            status: query.status.clone(),
        };
        let status = match filter.status_filter() {
            Ok(status) => status,
            Err(e) => {
                notices.push(Notice::error(e));
                None
            }
        };

        let (summary, report_list, ratings) = tokio::join!(
            self.admin_service.summary(),
            self.admin_service.reports(status),
            self.admin_service.ratings()
        );

        AdminContext {
            page: self.meta("Admin", "admin", ADMIN_NOTICE_DISMISS_MS, notices, true),
            tab: AdminTab::from_query(query.tab.as_deref()),
            summary,
            report_list,
            status_filter: status.map(|s| s.as_str().to_string()).unwrap_or_default(),
            statuses: status_options(),
            ratings,
        }
    }

    /// Apply a status button and return the dashboard URL to redirect to
    pub async fn change_status(&self, id: &str, form: &StatusChangeForm) -> String {
        let outcome = match form.status.parse::<ReportStatus>() {
            Ok(status) => self
                .admin_service
                .set_status(id, status)
                .await
                .map(|_| format!("Status berhasil diubah ke \"{}\"", status))
                .map_err(|e| {
                    tracing::warn!("Status change for report {} failed: {}", id, e);
                    STATUS_WRITE_ERROR.to_string()
                }),
            Err(e) => Err(e),
        };

        let (kind, notice) = match outcome {
            Ok(message) => ("success", message),
            Err(message) => ("error", message),
        };

        admin_location(form.filter.trim(), kind, &notice)
    }
}

fn form_error_message(error: &AppError, fallback: &str) -> String {
    match error {
        AppError::Validation(msg) | AppError::BadRequest(msg) => msg.clone(),
        _ => fallback.to_string(),
    }
}

fn admin_location(filter: &str, kind: &str, notice: &str) -> String {
    format!(
        "/admin?tab=laporan&status={}&kind={}&notice={}",
        urlencoding::encode(filter),
        kind,
        urlencoding::encode(notice)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportPhoto;
    use crate::modules::gateway::DataGateway;
    use crate::shared::test_helpers::{recording_gateway, sample_reference, RecordingGateway};

    fn service_with(gateway: Arc<dyn DataGateway>, reference: ReferenceIndex) -> PageService {
        let reference = Arc::new(reference);
        let reports = Arc::new(ReportService::new(gateway.clone(), reference.clone()));
        let reviews = Arc::new(ReviewService::new(gateway.clone(), reference.clone()));
        let admin = Arc::new(AdminService::new(reports.clone(), reviews.clone()));

        PageService::new(
            reference.clone(),
            Arc::new(MapService::new(reference)),
            reports,
            reviews,
            admin,
            gateway.mode(),
        )
    }

    fn valid_form() -> ReportForm {
        ReportForm {
            nama_pelapor: "Budi".to_string(),
            rth_id: "1".to_string(),
            kategori: "Kebersihan".to_string(),
            deskripsi: "Tempat sampah penuh".to_string(),
        }
    }

    #[tokio::test]
    async fn test_invalid_report_keeps_input_and_skips_gateway() {
        let gateway = recording_gateway();
        let service = service_with(gateway.clone(), sample_reference());

        let mut form = valid_form();
        form.nama_pelapor = "   ".to_string();

        let ctx = service
            .submit_report(ReportSubmission {
                form: form.clone(),
                photo: None,
            })
            .await;

        assert_eq!(ctx.form.deskripsi, form.deskripsi);
        assert_eq!(ctx.page.notices.last().map(|n| n.kind), Some(NoticeKind::Error));
        assert_eq!(
            ctx.page.notices.last().map(|n| n.message.as_str()),
            Some("Nama pelapor wajib diisi")
        );
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_report_clears_form() {
        let gateway = recording_gateway();
        let service = service_with(gateway.clone(), sample_reference());

        let ctx = service
            .submit_report(ReportSubmission {
                form: valid_form(),
                photo: Some(ReportPhoto {
                    file_name: "foto.jpg".to_string(),
                    content_type: "image/jpeg".to_string(),
                    data: vec![1, 2, 3],
                }),
            })
            .await;

        assert!(ctx.form.nama_pelapor.is_empty());
        assert_eq!(ctx.page.notices.last().map(|n| n.kind), Some(NoticeKind::Success));
        assert_eq!(gateway.calls(), vec!["upload", "insert"]);
    }

    #[tokio::test]
    async fn test_write_failure_shows_generic_error() {
        let gateway = Arc::new(RecordingGateway::failing());
        let service = service_with(gateway, sample_reference());

        let ctx = service
            .submit_report(ReportSubmission {
                form: valid_form(),
                photo: None,
            })
            .await;

        assert_eq!(ctx.form.nama_pelapor, "Budi");
        assert_eq!(
            ctx.page.notices.last().map(|n| n.message.as_str()),
            Some(REPORT_WRITE_ERROR)
        );
    }

    #[tokio::test]
    async fn test_review_without_rating() {
        let gateway = recording_gateway();
        let service = service_with(gateway.clone(), sample_reference());

        let ctx = service
            .submit_review(ReviewForm {
                nama: "Sari".to_string(),
                rth_id: "2".to_string(),
                rating: None,
                komentar: "Teduh".to_string(),
            })
            .await;

        assert_eq!(
            ctx.page.notices.last().map(|n| n.message.as_str()),
            Some("Silakan berikan rating")
        );
        assert_eq!(ctx.form.komentar, "Teduh");
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_reference_shows_load_error() {
        let service = service_with(recording_gateway(), ReferenceIndex::new(Vec::new()));
        let ctx = service.peta();

        assert_eq!(ctx.page.notices[0].message, REFERENCE_LOAD_ERROR);
    }

    #[tokio::test]
    async fn test_locations_sorted_by_name() {
        let service = service_with(recording_gateway(), sample_reference());
        let ctx = service
            .laporan(LaporanTab::Form, ReportForm::default(), Vec::new())
            .await;

        let labels: Vec<&str> = ctx.locations.iter().map(|l| l.label.as_str()).collect();
        let mut sorted = labels.clone();
        sorted.sort_by_key(|l| l.to_lowercase());
        assert_eq!(labels, sorted);
    }

    #[tokio::test]
    async fn test_change_status_redirect() {
        let gateway = recording_gateway();
        let service = service_with(gateway.clone(), sample_reference());

        let location = service
            .change_status(
                "abc",
                &StatusChangeForm {
                    status: "selesai".to_string(),
                    filter: "baru".to_string(),
                },
            )
            .await;

        assert!(location.starts_with("/admin?tab=laporan&status=baru&kind="));
        assert!(gateway.calls().contains(&"set_status"));

        let location = service
            .change_status(
                "abc",
                &StatusChangeForm {
                    status: "ditolak".to_string(),
                    filter: String::new(),
                },
            )
            .await;
        assert!(location.contains("kind=error"));
    }

    #[test]
    fn test_admin_location_encodes_notice() {
        let location = admin_location("", "success", "Status berhasil diubah ke \"selesai\"");
        assert_eq!(
            location,
            "/admin?tab=laporan&status=&kind=success&notice=Status%20berhasil%20diubah%20ke%20%22selesai%22"
        );
    }
}
