use std::fmt;

use crate::services::errors::game_service_errors::GameServiceError;

#[derive(Debug)]
pub enum UserServiceError {
    RepositoryError(String),
    UserAlreadyExists,
    UserNotFound,
    /// Moves reference the account, so it cannot be removed.
    UserHasMoves,
    ValidationError(String),
    GameServiceError(GameServiceError),
}

impl fmt::Display for UserServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UserServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            UserServiceError::UserAlreadyExists => write!(f, "User already exists"),
            UserServiceError::UserNotFound => write!(f, "User not found"),
            UserServiceError::UserHasMoves => {
                write!(f, "User has played moves and cannot be deleted")
            }
            UserServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UserServiceError::GameServiceError(err) => write!(f, "Game service error: {}", err),
        }
    }
}

impl std::error::Error for UserServiceError {}

impl From<GameServiceError> for UserServiceError {
    fn from(err: GameServiceError) -> Self {
        UserServiceError::GameServiceError(err)
    }
}
