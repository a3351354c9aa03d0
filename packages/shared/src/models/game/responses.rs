use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Game, GameStatus, Mark, Move, Side, Winner};
use crate::services::grid::Grid;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameResponse {
    pub id: String,
    pub player_one: Option<String>,
    pub player_two: Option<String>,
    pub status: GameStatus,
    pub winner: Option<Winner>,
    pub next_turn: Option<Side>,
    pub next_player: Option<String>,
    pub board: [[Option<Mark>; 3]; 3],
    pub created_at: DateTime<Utc>,
}

impl From<&Game> for GameResponse {
    fn from(game: &Game) -> Self {
        GameResponse {
            id: game.id().to_string(),
            player_one: game.player_one().map(str::to_string),
            player_two: game.player_two().map(str::to_string),
            status: game.status(),
            winner: game.winner().cloned(),
            next_turn: game.next_turn(),
            next_player: game.next_player().map(str::to_string),
            board: *Grid::from_moves(game.moves()).cells(),
            created_at: game.created_at(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveResponse {
    pub id: String,
    pub game_id: String,
    pub player_id: String,
    pub row: u8,
    pub column: u8,
    pub mark: Mark,
    pub created_at: DateTime<Utc>,
}

impl From<Move> for MoveResponse {
    fn from(game_move: Move) -> Self {
        MoveResponse {
            id: game_move.id,
            game_id: game_move.game_id,
            player_id: game_move.player_id,
            row: game_move.row,
            column: game_move.column,
            mark: game_move.mark,
            created_at: game_move.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
