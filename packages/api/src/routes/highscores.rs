use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{error::ApiError, state::AppState};
use shared::models::highscore::HighscoreEntry;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/highscores", get(list_highscores))
        .route("/highscores/{id}", get(get_highscore))
}

async fn list_highscores(
    State(state): State<AppState>,
) -> Result<Json<Vec<HighscoreEntry>>, ApiError> {
    Ok(Json(state.leaderboard_service.highscores().await?))
}

async fn get_highscore(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<HighscoreEntry>, ApiError> {
    Ok(Json(state.leaderboard_service.highscore(&user_id).await?))
}
