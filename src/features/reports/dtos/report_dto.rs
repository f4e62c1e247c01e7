use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::features::reports::models::{MapReport, Report, ReportStatus};
use crate::modules::classifier::DamageLabel;

/// Full report row for the triage table, with display coordinates
/// already filled in.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: String,
    pub location_text: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_path: String,
    pub ai_label: DamageLabel,
    pub ai_confidence: f64,
    pub priority_score: i32,
    pub status: ReportStatus,
    pub reported_at: DateTime<Utc>,
}

impl ReportResponseDto {
    pub fn from_report(report: Report, (latitude, longitude): (f64, f64)) -> Self {
        Self {
            id: report.id,
            location_text: report.location_text,
            latitude,
            longitude,
            image_path: report.image_path,
            ai_label: report.ai_label,
            ai_confidence: report.ai_confidence,
            priority_score: report.priority_score,
            status: report.status,
            reported_at: report.reported_at,
        }
    }
}

/// Trimmed row for map markers
#[derive(Debug, Serialize, ToSchema)]
pub struct MapReportDto {
    pub id: String,
    pub location_text: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_path: String,
    pub ai_label: DamageLabel,
    pub priority_score: i32,
}

impl MapReportDto {
    pub fn from_report(report: MapReport, (latitude, longitude): (f64, f64)) -> Self {
        Self {
            id: report.id,
            location_text: report.location_text,
            latitude,
            longitude,
            image_path: report.image_path,
            ai_label: report.ai_label,
            priority_score: report.priority_score,
        }
    }
}

/// Returned to the citizen right after submission
#[derive(Debug, Serialize, ToSchema)]
pub struct IntakeResponseDto {
    pub id: String,
    pub ai_label: DamageLabel,
    pub ai_confidence: f64,
    pub priority_score: i32,
    pub status: ReportStatus,
}

impl From<Report> for IntakeResponseDto {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            ai_label: report.ai_label,
            ai_confidence: report.ai_confidence,
            priority_score: report.priority_score,
            status: report.status,
        }
    }
}
