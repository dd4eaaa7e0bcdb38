use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::map::{clustering, dtos as map_dtos, handlers as map_handlers, marker_style};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::reviews::{dtos as reviews_dtos, handlers as reviews_handlers};
use crate::features::rth::{dtos as rth_dtos, handlers as rth_handlers, models as rth_models};
use crate::features::statistics;
use crate::modules::gateway::GatewayMode;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // RTH reference data
        rth_handlers::list_rth,
        rth_handlers::get_rth,
        rth_handlers::list_rth_reports,
        rth_handlers::list_rth_reviews,
        // Map
        map_handlers::get_layer,
        map_handlers::get_summary,
        map_handlers::export_csv,
        // Reports
        reports_handlers::create_report,
        reports_handlers::list_reports,
        // Reviews
        reviews_handlers::create_review,
        reviews_handlers::list_reviews,
        reviews_handlers::list_ratings,
        // Admin
        admin_handlers::get_summary,
        admin_handlers::list_reports,
        admin_handlers::update_report_status,
        admin_handlers::delete_report,
        admin_handlers::get_ratings,
    ),
    components(
        schemas(
            // Shared
            Meta,
            GatewayMode,
            // RTH
            rth_models::RthFeature,
            rth_models::Facility,
            rth_dtos::RthDetailDto,
            rth_dtos::FacilityBadgeDto,
            ApiResponse<Vec<rth_models::RthFeature>>,
            ApiResponse<rth_dtos::RthDetailDto>,
            // Map
            marker_style::CategoryStyle,
            clustering::ClusterSize,
            map_dtos::MarkerDto,
            map_dtos::ClusterDto,
            map_dtos::MapLayerDto,
            map_dtos::CategoryCountDto,
            map_dtos::MapSummaryDto,
            ApiResponse<map_dtos::MapLayerDto>,
            ApiResponse<map_dtos::MapSummaryDto>,
            // Reports
            reports_models::ReportStatus,
            reports_dtos::CreateReportDto,
            reports_dtos::ReportUploadForm,
            reports_dtos::UpdateReportStatusDto,
            reports_dtos::ReportResponseDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            // Reviews
            reviews_dtos::CreateReviewDto,
            reviews_dtos::ReviewResponseDto,
            reviews_dtos::RatingRecapDto,
            ApiResponse<reviews_dtos::ReviewResponseDto>,
            ApiResponse<Vec<reviews_dtos::ReviewResponseDto>>,
            ApiResponse<Vec<reviews_dtos::RatingRecapDto>>,
            // Statistics
            statistics::ReportCounts,
            statistics::ReviewStats,
            statistics::FeatureRating,
            // Admin
            admin_dtos::AdminSummaryDto,
            admin_dtos::AdminReportListDto,
            admin_dtos::AdminRatingsDto,
            ApiResponse<admin_dtos::AdminSummaryDto>,
            ApiResponse<admin_dtos::AdminReportListDto>,
            ApiResponse<admin_dtos::AdminRatingsDto>,
        )
    ),
    tags(
        (name = "rth", description = "Green-space (RTH) reference locations"),
        (name = "map", description = "Filtered map layer, visible-set summary and CSV export"),
        (name = "reports", description = "Citizen reports about RTH conditions"),
        (name = "reviews", description = "Citizen reviews and ratings"),
        (name = "admin", description = "Admin dashboard endpoints (basic auth when configured)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "WebGIS RTH API",
        version = "0.1.0",
        description = "API documentation for WebGIS RTH Kota Pekanbaru",
    )
)]
pub struct ApiDoc;

/// Adds the HTTP basic security scheme guarding the admin endpoints
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
