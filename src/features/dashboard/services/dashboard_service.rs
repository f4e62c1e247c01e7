use sqlx::PgPool;

use crate::core::error::Result;
use crate::features::dashboard::dtos::DashboardSummaryDto;

pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Headline numbers for the admin dashboard. A report counts as
    /// severe pending while it has the top priority score and has not
    /// been marked done.
    pub async fn summary(&self) -> Result<DashboardSummaryDto> {
        let summary = sqlx::query_as::<_, DashboardSummaryDto>(
            r#"
            SELECT
                COUNT(*) AS total_reports,
                COUNT(*) FILTER (
                    WHERE priority_score = 3 AND status <> 'Selesai'
                ) AS severe_pending
            FROM reports
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}
