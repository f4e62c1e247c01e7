pub mod geo_service;
pub mod intake_service;
pub mod report_service;

pub use geo_service::GeoEnrichmentService;
pub use intake_service::{IntakeService, IntakeSubmission};
pub use report_service::ReportService;
