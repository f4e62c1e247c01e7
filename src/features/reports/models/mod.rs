pub mod report;

pub use report::{CreateReport, MapReport, Report, ReportStatus};
