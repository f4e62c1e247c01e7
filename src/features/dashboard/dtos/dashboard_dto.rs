use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct DashboardSummaryDto {
    pub total_reports: i64,
    pub severe_pending: i64,
}
