use std::sync::Arc;

use log::info;
use tennis_persistence_sqlite::{
    health::SqliteHealthCheckRepository, players::SqlitePlayerRepository,
};
use tennis_server_domain::{health::ArcHealthCheckRepository, player::ArcPlayerRepository};

mod app;
mod http;
mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().expect("Failed to load .env file");

    logs::init_logger();

    let player_repository: ArcPlayerRepository = Arc::new(Box::new(SqlitePlayerRepository::new()));
    let healthcheck_repository: ArcHealthCheckRepository =
        Arc::new(Box::new(SqliteHealthCheckRepository::new()));

    let app = app::construct_app(player_repository, healthcheck_repository);

    info!("Starting application");

    http::run(app, shutdown_signal()).await;
}
