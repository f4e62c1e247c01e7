use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::teams::dtos::UpdateTeamStatusDto;
use crate::features::teams::models::Team;
use crate::features::teams::services::TeamService;
use crate::shared::types::{ApiResponse, Meta};

/// List all repair teams
#[utoipa::path(
    get,
    path = "/api/teams",
    responses(
        (status = 200, description = "Teams retrieved successfully", body = ApiResponse<Vec<Team>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "teams",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_teams(
    State(service): State<Arc<TeamService>>,
) -> Result<Json<ApiResponse<Vec<Team>>>> {
    let teams = service.list().await?;
    let total = teams.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(teams),
        None,
        Some(Meta { total }),
    )))
}

/// Update a team's dispatch status
#[utoipa::path(
    patch,
    path = "/api/teams/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    request_body = UpdateTeamStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<Team>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_team_status(
    State(service): State<Arc<TeamService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateTeamStatusDto>,
) -> Result<Json<ApiResponse<Team>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let team = service.set_status(id, &dto.status).await?;
    Ok(Json(ApiResponse::success(Some(team), None, None)))
}
