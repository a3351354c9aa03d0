#[derive(Debug)]
pub enum GameRepositoryError {
    NotFound,
    AlreadyExists,
    VersionConflict,
    Serialization(String),
    DynamoDb(String),
    Storage(String),
}

impl std::fmt::Display for GameRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameRepositoryError::NotFound => write!(f, "Game not found"),
            GameRepositoryError::AlreadyExists => write!(f, "Game already exists"),
            GameRepositoryError::VersionConflict => {
                write!(f, "Game was modified by a concurrent request")
            }
            GameRepositoryError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            GameRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
            GameRepositoryError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for GameRepositoryError {}

impl From<serde_dynamo::Error> for GameRepositoryError {
    fn from(err: serde_dynamo::Error) -> Self {
        GameRepositoryError::Serialization(err.to_string())
    }
}
