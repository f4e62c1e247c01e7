pub mod report_dto;

pub use report_dto::{IntakeResponseDto, MapReportDto, ReportResponseDto};
