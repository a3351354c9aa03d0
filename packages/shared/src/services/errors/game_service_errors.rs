use crate::repositories::errors::game_repository_errors::GameRepositoryError;

/// Rejections and failures of the game session manager.
///
/// Everything up to `InvalidMove` is an expected business-rule rejection and
/// carries the user-facing message in its `Display`.
#[derive(Debug)]
pub enum GameServiceError {
    // join
    AlreadyFinished,
    AlreadyJoined,
    GameFull,
    // move
    NotAParticipant,
    GameFinished,
    GameNotStarted,
    NotYourTurn,
    InvalidMove,

    GameNotFound,
    ConcurrentModification,
    /// Slot release refused: moves in the game reference the participant.
    ParticipantHasMoves,
    /// Caller broke a precondition of the engine. Not a user error.
    InvariantViolation(String),
    RepositoryError(GameRepositoryError),
}

impl GameServiceError {
    pub fn is_rule_rejection(&self) -> bool {
        matches!(
            self,
            GameServiceError::AlreadyFinished
                | GameServiceError::AlreadyJoined
                | GameServiceError::GameFull
                | GameServiceError::NotAParticipant
                | GameServiceError::GameFinished
                | GameServiceError::GameNotStarted
                | GameServiceError::NotYourTurn
                | GameServiceError::InvalidMove
        )
    }
}

impl std::fmt::Display for GameServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameServiceError::AlreadyFinished | GameServiceError::GameFinished => {
                write!(f, "This game has already finished")
            }
            GameServiceError::AlreadyJoined => write!(f, "You already joined this game"),
            GameServiceError::GameFull => write!(f, "This game is already full"),
            GameServiceError::NotAParticipant => write!(f, "You are not part of this game"),
            GameServiceError::GameNotStarted => write!(f, "Wait for the other player to join"),
            GameServiceError::NotYourTurn => write!(f, "This is not your turn now"),
            GameServiceError::InvalidMove => write!(f, "You cannot make this move"),
            GameServiceError::GameNotFound => write!(f, "Game not found"),
            GameServiceError::ConcurrentModification => {
                write!(f, "Game was modified by another request, reload and retry")
            }
            GameServiceError::ParticipantHasMoves => {
                write!(f, "Participant has moves in this game")
            }
            GameServiceError::InvariantViolation(msg) => {
                write!(f, "Game invariant violated: {}", msg)
            }
            GameServiceError::RepositoryError(err) => write!(f, "Repository error: {}", err),
        }
    }
}

impl std::error::Error for GameServiceError {}

impl From<GameRepositoryError> for GameServiceError {
    fn from(err: GameRepositoryError) -> Self {
        match err {
            GameRepositoryError::NotFound => GameServiceError::GameNotFound,
            GameRepositoryError::VersionConflict => GameServiceError::ConcurrentModification,
            other => GameServiceError::RepositoryError(other),
        }
    }
}
