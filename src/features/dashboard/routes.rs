use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Protected dashboard routes (require JWT authentication)
pub fn protected_routes(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard/summary", get(handlers::summary))
        .with_state(service)
}
