use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, MapReport, Report, ReportStatus};

/// Persistence gateway for report rows.
pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, report: CreateReport) -> Result<Report> {
        let created = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (
                id, location_text, latitude, longitude, image_path,
                ai_label, ai_confidence, priority_score, reported_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, location_text, latitude, longitude, image_path,
                      ai_label, ai_confidence, priority_score, status, reported_at
            "#,
        )
        .bind(&report.id)
        .bind(&report.location_text)
        .bind(report.latitude)
        .bind(report.longitude)
        .bind(&report.image_path)
        .bind(report.ai_label)
        .bind(report.ai_confidence)
        .bind(report.priority_score)
        .bind(report.reported_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// All reports, most urgent first.
    pub async fn list_by_priority(&self) -> Result<Vec<Report>> {
        let reports = sqlx::query_as::<_, Report>(
            r#"
            SELECT id, location_text, latitude, longitude, image_path,
                   ai_label, ai_confidence, priority_score, status, reported_at
            FROM reports
            ORDER BY priority_score DESC, reported_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    /// Column subset for map markers, same ordering as the triage table.
    pub async fn list_for_map(&self) -> Result<Vec<MapReport>> {
        let reports = sqlx::query_as::<_, MapReport>(
            r#"
            SELECT id, location_text, latitude, longitude, image_path,
                   ai_label, priority_score
            FROM reports
            ORDER BY priority_score DESC, reported_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    pub async fn set_status(&self, id: &str, status: ReportStatus) -> Result<Report> {
        let updated = sqlx::query_as::<_, Report>(
            r#"
            UPDATE reports
            SET status = $2
            WHERE id = $1
            RETURNING id, location_text, latitude, longitude, image_path,
                      ai_label, ai_confidence, priority_score, status, reported_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound(format!("Report with id {id} not found")))
    }
}
