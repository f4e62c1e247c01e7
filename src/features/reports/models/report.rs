use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::modules::classifier::DamageLabel;

/// Workflow state of a report, stored as the `report_status` enum.
///
/// Variants serialize with their Indonesian display names so the API
/// and the JSON backup stay compatible with existing consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "report_status")]
pub enum ReportStatus {
    #[sqlx(rename = "Menunggu")]
    #[serde(rename = "Menunggu")]
    Menunggu,
    #[sqlx(rename = "Sedang Dikerjakan")]
    #[serde(rename = "Sedang Dikerjakan")]
    SedangDikerjakan,
    #[sqlx(rename = "Selesai")]
    #[serde(rename = "Selesai")]
    Selesai,
}

impl ReportStatus {
    /// Maps an action verb from the triage endpoint to the resulting
    /// status. Unknown verbs reset the report to the queue.
    pub fn from_action(action: &str) -> Self {
        match action {
            "proses" => Self::SedangDikerjakan,
            "selesai" => Self::Selesai,
            _ => Self::Menunggu,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Menunggu => "Menunggu",
            Self::SedangDikerjakan => "Sedang Dikerjakan",
            Self::Selesai => "Selesai",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database model for a damage report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: String,
    pub location_text: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_path: String,
    pub ai_label: DamageLabel,
    pub ai_confidence: f64,
    pub priority_score: i32,
    pub status: ReportStatus,
    pub reported_at: DateTime<Utc>,
}

/// Column subset fetched for map markers
#[derive(Debug, Clone, FromRow)]
pub struct MapReport {
    pub id: String,
    pub location_text: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_path: String,
    pub ai_label: DamageLabel,
    pub priority_score: i32,
}

/// Insert payload assembled by the intake pipeline
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub id: String,
    pub location_text: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_path: String,
    pub ai_label: DamageLabel,
    pub ai_confidence: f64,
    pub priority_score: i32,
    pub reported_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_map_to_statuses() {
        assert_eq!(
            ReportStatus::from_action("proses"),
            ReportStatus::SedangDikerjakan
        );
        assert_eq!(ReportStatus::from_action("selesai"), ReportStatus::Selesai);
        assert_eq!(ReportStatus::from_action("reset"), ReportStatus::Menunggu);
        assert_eq!(ReportStatus::from_action(""), ReportStatus::Menunggu);
    }

    #[test]
    fn status_serializes_with_display_name() {
        let json = serde_json::to_string(&ReportStatus::SedangDikerjakan).unwrap();
        assert_eq!(json, "\"Sedang Dikerjakan\"");
    }
}
