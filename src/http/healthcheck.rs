use axum::{Json, extract::State};
use tennis_server_domain::health::{HealthCheck, HealthCheckService};

use crate::app::AppState;

pub async fn healthcheck(State(app_state): State<AppState>) -> Json<HealthCheck> {
    Json(app_state.healthcheck_service.healthcheck().await)
}
