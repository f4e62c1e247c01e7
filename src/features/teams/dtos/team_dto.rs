use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamStatusDto {
    #[validate(length(min = 1, max = 50, message = "Status is required"))]
    pub status: String,
}
