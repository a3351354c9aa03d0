use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HighscoreEntry {
    pub id: String,
    pub username: String,
    pub wins_count: u32,
}
