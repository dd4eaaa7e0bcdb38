mod report_dto;

pub use report_dto::{
    validate_photo, CreateReportDto, ReportForm, ReportResponseDto, ReportSubmission,
    ReportUploadForm, UpdateReportStatusDto,
};
