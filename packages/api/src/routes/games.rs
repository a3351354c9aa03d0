use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lambda_http::tracing::{debug, info};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::game::requests::MoveRequest;
use shared::models::game::responses::{GameResponse, MoveResponse};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/games", post(create_game).get(list_games))
        .route("/games/{id}", get(get_game))
        .route("/games/{id}/join", post(join_game))
        .route("/games/{id}/move", post(make_move))
        .route("/games/{id}/moves", get(list_moves))
}

async fn create_game(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<(StatusCode, Json<GameResponse>), ApiError> {
    let game = state
        .game_service
        .create_game(&authenticated_user.user_id)
        .await?;
    info!("User {} created game {}", authenticated_user.user_id, game.id());
    Ok((StatusCode::CREATED, Json(GameResponse::from(&game))))
}

async fn list_games(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
) -> Result<Json<Vec<GameResponse>>, ApiError> {
    let games = state.game_service.list_games().await?;
    Ok(Json(games.iter().map(GameResponse::from).collect()))
}

async fn get_game(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let game = state.game_service.get_game(&game_id).await?;
    Ok(Json(GameResponse::from(&game)))
}

async fn join_game(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<Json<GameResponse>, ApiError> {
    let game = state
        .game_service
        .join_game(&game_id, &authenticated_user.user_id)
        .await?;
    Ok(Json(GameResponse::from(&game)))
}

async fn make_move(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MoveResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let position = request.position().ok_or_else(|| {
        ApiError::BadRequest("Row and column must each be between 0 and 2".to_string())
    })?;

    let game_move = state
        .game_service
        .make_move(
            &game_id,
            &authenticated_user.user_id,
            position.row,
            position.column,
        )
        .await?;
    debug!("Recorded move {} in game {}", game_move.id, game_id);
    Ok((StatusCode::CREATED, Json(MoveResponse::from(game_move))))
}

async fn list_moves(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<MoveResponse>>, ApiError> {
    let moves = state.game_service.list_moves(&game_id).await?;
    Ok(Json(moves.into_iter().map(MoveResponse::from).collect()))
}
