use axum::{Router, response::IntoResponse, routing::get};
use log::info;
use tennis_server_domain::ServiceError;

use crate::app::AppState;

mod healthcheck;
mod players;

pub struct HttpServiceError(ServiceError);

impl IntoResponse for HttpServiceError {
    fn into_response(self) -> axum::http::Response<axum::body::Body> {
        let (status, msg) = match self.0 {
            ServiceError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            ServiceError::AlreadyExists(msg) => (axum::http::StatusCode::CONFLICT, msg),
            ServiceError::BadRequest(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            ServiceError::DataAccess(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = serde_json::json!({ "error": msg });
        (status, axum::Json(body)).into_response()
    }
}

impl From<ServiceError> for HttpServiceError {
    fn from(value: ServiceError) -> Self {
        HttpServiceError(value)
    }
}

pub async fn run(
    app: AppState,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) {
    let router: Router = Router::new()
        .route("/healthcheck", get(healthcheck::healthcheck))
        .route(
            "/players",
            get(players::get_all)
                .post(players::create)
                .put(players::update),
        )
        .route(
            "/players/{last_name}",
            get(players::get_by_last_name).delete(players::delete),
        )
        .with_state(app);

    let port = std::env::var("TENNIS_HTTP_PORT")
        .expect("TENNIS_HTTP_PORT must be set")
        .parse::<u16>()
        .expect("TENNIS_HTTP_PORT must be a valid u16");

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .unwrap();

    info!("API server listening on port {}", port);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .unwrap();

    info!("HTTP API shut down gracefully");
}
