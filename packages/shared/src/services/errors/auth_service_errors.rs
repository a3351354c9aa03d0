use crate::services::errors::user_service_errors::UserServiceError;
use std::fmt;

#[derive(Debug)]
pub enum AuthServiceError {
    UserServiceError(UserServiceError),
    /// Covers both an unknown username and a wrong password.
    InvalidCredentials,
    JwtError(String),
    ValidationError(String),
    InvalidToken,
    ExpiredToken,
}

impl fmt::Display for AuthServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuthServiceError::UserServiceError(err) => write!(f, "User service error: {}", err),
            AuthServiceError::InvalidCredentials => write!(f, "Invalid username or password"),
            AuthServiceError::JwtError(msg) => write!(f, "Token signing failed: {}", msg),
            AuthServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AuthServiceError::InvalidToken => write!(f, "Invalid bearer token"),
            AuthServiceError::ExpiredToken => write!(f, "Bearer token has expired"),
        }
    }
}

impl std::error::Error for AuthServiceError {}

impl From<UserServiceError> for AuthServiceError {
    fn from(err: UserServiceError) -> Self {
        AuthServiceError::UserServiceError(err)
    }
}
