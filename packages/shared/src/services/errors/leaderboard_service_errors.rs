use std::fmt;

#[derive(Debug)]
pub enum LeaderboardServiceError {
    UserNotFound,
    RepositoryError(String),
}

impl fmt::Display for LeaderboardServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LeaderboardServiceError::UserNotFound => write!(f, "User not found"),
            LeaderboardServiceError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for LeaderboardServiceError {}
