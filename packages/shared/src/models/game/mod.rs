pub mod game_move;
pub mod requests;
pub mod responses;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use game_move::{Move, Position};

/// One of the two fixed slots in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::PlayerOne => Side::PlayerTwo,
            Side::PlayerTwo => Side::PlayerOne,
        }
    }

    /// The mark a side plays with for the whole game.
    pub fn mark(self) -> Mark {
        match self {
            Side::PlayerOne => Mark::Nought,
            Side::PlayerTwo => Mark::Cross,
        }
    }

    pub fn for_mark(mark: Mark) -> Side {
        match mark {
            Mark::Nought => Side::PlayerOne,
            Mark::Cross => Side::PlayerTwo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[serde(rename = "o")]
    Nought,
    #[serde(rename = "x")]
    Cross,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "player_id", rename_all = "snake_case")]
pub enum Winner {
    Player(String),
    Draw,
}

/// A single tic-tac-toe game and every move played in it.
///
/// Fields are only written through the transition functions in
/// `services::game_rules`; `version` is bumped once per persisted change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    id: String,
    player_one: Option<String>,
    player_two: Option<String>,
    status: GameStatus,
    winner: Option<Winner>,
    next_turn: Option<Side>,
    moves: Vec<Move>,
    created_at: DateTime<Utc>,
    version: u64,
}

impl Game {
    pub fn new() -> Self {
        Game {
            id: Uuid::new_v4().to_string(),
            player_one: None,
            player_two: None,
            status: GameStatus::NotStarted,
            winner: None,
            next_turn: None,
            moves: vec![],
            created_at: Utc::now(),
            version: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn player_one(&self) -> Option<&str> {
        self.player_one.as_deref()
    }

    pub fn player_two(&self) -> Option<&str> {
        self.player_two.as_deref()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<&Winner> {
        self.winner.as_ref()
    }

    /// The winning participant, `None` while undecided or on a draw.
    pub fn winner_id(&self) -> Option<&str> {
        match &self.winner {
            Some(Winner::Player(id)) => Some(id),
            _ => None,
        }
    }

    pub fn next_turn(&self) -> Option<Side> {
        self.next_turn
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn participant(&self, side: Side) -> Option<&str> {
        match side {
            Side::PlayerOne => self.player_one(),
            Side::PlayerTwo => self.player_two(),
        }
    }

    /// The participant whose move it is, if the turn is decided and the slot bound.
    pub fn next_player(&self) -> Option<&str> {
        self.next_turn.and_then(|side| self.participant(side))
    }

    pub fn side_of(&self, participant: &str) -> Option<Side> {
        if self.player_one() == Some(participant) {
            Some(Side::PlayerOne)
        } else if self.player_two() == Some(participant) {
            Some(Side::PlayerTwo)
        } else {
            None
        }
    }

    pub fn is_participant(&self, participant: &str) -> bool {
        self.side_of(participant).is_some()
    }

    pub fn is_full(&self) -> bool {
        self.player_one.is_some() && self.player_two.is_some()
    }

    pub fn has_move_at(&self, row: u8, column: u8) -> bool {
        self.moves
            .iter()
            .any(|m| m.row == row && m.column == column)
    }

    pub fn moves_by<'a>(&'a self, participant: &'a str) -> impl Iterator<Item = &'a Move> + 'a {
        self.moves.iter().filter(move |m| m.player_id == participant)
    }

    pub(crate) fn bind(&mut self, side: Side, participant: &str) {
        match side {
            Side::PlayerOne => self.player_one = Some(participant.to_string()),
            Side::PlayerTwo => self.player_two = Some(participant.to_string()),
        }
    }

    pub(crate) fn unbind(&mut self, side: Side) {
        match side {
            Side::PlayerOne => self.player_one = None,
            Side::PlayerTwo => self.player_two = None,
        }
    }

    /// Status only moves forward; an attempt to regress is ignored.
    pub(crate) fn advance_status(&mut self, status: GameStatus) {
        if status > self.status {
            self.status = status;
        }
    }

    pub(crate) fn set_next_turn(&mut self, side: Option<Side>) {
        self.next_turn = side;
    }

    pub(crate) fn finish(&mut self, winner: Winner) {
        self.advance_status(GameStatus::Finished);
        self.winner = Some(winner);
        self.next_turn = None;
    }

    pub(crate) fn push_move(&mut self, game_move: Move) {
        self.moves.push(game_move);
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
