use crate::features::teams::handlers;
use crate::features::teams::services::TeamService;
use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

/// Protected team routes (require JWT authentication)
pub fn protected_routes(service: Arc<TeamService>) -> Router {
    Router::new()
        .route("/api/teams", get(handlers::list_teams))
        .route("/api/teams/{id}/status", patch(handlers::update_team_status))
        .with_state(service)
}
