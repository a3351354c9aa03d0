use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Mark;

pub const GRID_SIZE: u8 = 3;

/// A cell coordinate on the 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub column: u8,
}

impl Position {
    pub fn new(row: u8, column: u8) -> Option<Self> {
        if row < GRID_SIZE && column < GRID_SIZE {
            Some(Position { row, column })
        } else {
            None
        }
    }
}

/// A mark placed by one participant. Never edited once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub id: String,
    pub game_id: String,
    pub player_id: String,
    pub row: u8,
    pub column: u8,
    pub mark: Mark,
    pub created_at: DateTime<Utc>,
}

impl Move {
    pub fn new(game_id: &str, player_id: &str, position: Position, mark: Mark) -> Self {
        Move {
            id: Uuid::new_v4().to_string(),
            game_id: game_id.to_string(),
            player_id: player_id.to_string(),
            row: position.row,
            column: position.column,
            mark,
            created_at: Utc::now(),
        }
    }

    pub fn position(&self) -> Position {
        Position {
            row: self.row,
            column: self.column,
        }
    }
}
