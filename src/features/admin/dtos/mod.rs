mod admin_dtos;

pub use admin_dtos::{AdminRatingsDto, AdminReportListDto, AdminReportQuery, AdminSummaryDto};
