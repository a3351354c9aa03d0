use serde::{Deserialize, Serialize};

use super::Position;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveRequest {
    pub row: u8,
    pub column: u8,
}

impl MoveRequest {
    pub fn new(row: u8, column: u8) -> Self {
        MoveRequest { row, column }
    }

    /// `None` when either coordinate falls outside the grid.
    pub fn position(&self) -> Option<Position> {
        Position::new(self.row, self.column)
    }
}
