use std::fmt;

#[derive(Debug)]
pub enum UserRepositoryError {
    NotFound,
    /// The id or the username is already taken.
    AlreadyExists,
    Serialization(String),
    DynamoDb(String),
    Storage(String),
}

impl fmt::Display for UserRepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRepositoryError::NotFound => write!(f, "User not found"),
            UserRepositoryError::AlreadyExists => write!(f, "Username is already taken"),
            UserRepositoryError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            UserRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
            UserRepositoryError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for UserRepositoryError {}

impl From<serde_dynamo::Error> for UserRepositoryError {
    fn from(err: serde_dynamo::Error) -> Self {
        UserRepositoryError::Serialization(err.to_string())
    }
}
