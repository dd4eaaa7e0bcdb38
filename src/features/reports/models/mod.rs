mod report;

pub use report::{NewReport, Report, ReportPhoto, ReportRow, ReportStatus};
