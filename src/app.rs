use std::sync::Arc;

use tennis_server_domain::{
    health::{ArcHealthCheckRepository, ArcHealthCheckService, HealthCheckServiceImpl},
    player::{ArcPlayerRepository, ArcPlayerService, PlayerServiceImpl},
};

#[derive(Clone)]
pub struct AppState {
    pub player_service: ArcPlayerService,
    pub healthcheck_service: ArcHealthCheckService,
}

pub fn construct_app(
    player_repository: ArcPlayerRepository,
    healthcheck_repository: ArcHealthCheckRepository,
) -> AppState {
    let player_service: ArcPlayerService =
        Arc::new(Box::new(PlayerServiceImpl::new(player_repository)));

    let healthcheck_service: ArcHealthCheckService =
        Arc::new(Box::new(HealthCheckServiceImpl::new(healthcheck_repository)));

    AppState {
        player_service,
        healthcheck_service,
    }
}
