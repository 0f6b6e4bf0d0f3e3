use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tennis_server_domain::player::{Player, PlayerService, PlayerToSave};

use crate::{app::AppState, http::HttpServiceError};

pub async fn get_all(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Player>>, HttpServiceError> {
    let players = app_state.player_service.get_all_players().await?;
    Ok(Json(players))
}

pub async fn get_by_last_name(
    Path(last_name): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Player>, HttpServiceError> {
    let player = app_state.player_service.get_by_last_name(&last_name).await?;
    Ok(Json(player))
}

pub async fn create(
    State(app_state): State<AppState>,
    Json(player_to_save): Json<PlayerToSave>,
) -> Result<(StatusCode, Json<Player>), HttpServiceError> {
    let player = app_state.player_service.create(player_to_save).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn update(
    State(app_state): State<AppState>,
    Json(player_to_save): Json<PlayerToSave>,
) -> Result<Json<Player>, HttpServiceError> {
    let player = app_state.player_service.update(player_to_save).await?;
    Ok(Json(player))
}

pub async fn delete(
    Path(last_name): Path<String>,
    State(app_state): State<AppState>,
) -> Result<StatusCode, HttpServiceError> {
    app_state.player_service.delete(&last_name).await?;
    Ok(StatusCode::NO_CONTENT)
}
