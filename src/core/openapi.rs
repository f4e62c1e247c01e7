use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::teams::{
    dtos as teams_dtos, handlers as teams_handlers, models as teams_models,
};
use crate::modules::classifier::DamageLabel;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::get_me,
        // Reports
        reports_handlers::report_handler::submit_report,
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::map_reports,
        reports_handlers::report_handler::report_action,
        // Teams
        teams_handlers::team_handler::list_teams,
        teams_handlers::team_handler::update_team_status,
        // Dashboard
        dashboard_handlers::dashboard_handler::summary,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::auth_dto::LoginRequestDto,
            auth::dtos::auth_dto::AuthResponseDto,
            auth::dtos::auth_dto::MeResponseDto,
            ApiResponse<auth::dtos::auth_dto::AuthResponseDto>,
            ApiResponse<auth::dtos::auth_dto::MeResponseDto>,
            // Reports
            DamageLabel,
            reports_models::report::ReportStatus,
            reports_dtos::ReportResponseDto,
            reports_dtos::MapReportDto,
            reports_dtos::IntakeResponseDto,
            ApiResponse<reports_dtos::IntakeResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<Vec<reports_dtos::MapReportDto>>,
            ApiResponse<reports_dtos::ReportResponseDto>,
            // Teams
            teams_models::Team,
            teams_dtos::UpdateTeamStatusDto,
            ApiResponse<Vec<teams_models::Team>>,
            ApiResponse<teams_models::Team>,
            // Dashboard
            dashboard_dtos::DashboardSummaryDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
        )
    ),
    tags(
        (name = "auth", description = "Admin authentication"),
        (name = "reports", description = "Citizen damage reports and admin triage"),
        (name = "teams", description = "Field repair team dispatch"),
        (name = "dashboard", description = "Admin dashboard summary"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "LaporJalan API",
        version = "0.1.0",
        description = "API documentation for LaporJalan",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
