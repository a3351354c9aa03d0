use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lambda_http::tracing::error;
use shared::models::game::responses::ErrorResponse;
use shared::services::errors::{
    auth_service_errors::AuthServiceError, game_service_errors::GameServiceError,
    leaderboard_service_errors::LeaderboardServiceError, user_service_errors::UserServiceError,
};

#[derive(Debug)]
pub enum ApiError {
    UserService(UserServiceError),
    AuthService(AuthServiceError),
    GameService(GameServiceError),
    LeaderboardService(LeaderboardServiceError),
    BadRequest(String),
    Unauthorized,
    /// Authenticated, but acting on another account.
    Forbidden,
}

impl From<UserServiceError> for ApiError {
    fn from(error: UserServiceError) -> Self {
        ApiError::UserService(error)
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        ApiError::AuthService(error)
    }
}

impl From<GameServiceError> for ApiError {
    fn from(error: GameServiceError) -> Self {
        ApiError::GameService(error)
    }
}

impl From<LeaderboardServiceError> for ApiError {
    fn from(error: LeaderboardServiceError) -> Self {
        ApiError::LeaderboardService(error)
    }
}

fn game_status(error: &GameServiceError) -> StatusCode {
    match error {
        e if e.is_rule_rejection() => StatusCode::BAD_REQUEST,
        GameServiceError::GameNotFound => StatusCode::NOT_FOUND,
        GameServiceError::ConcurrentModification | GameServiceError::ParticipantHasMoves => {
            StatusCode::CONFLICT
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UserService(UserServiceError::UserAlreadyExists) => StatusCode::CONFLICT,
            ApiError::UserService(UserServiceError::UserNotFound) => StatusCode::NOT_FOUND,
            ApiError::UserService(UserServiceError::UserHasMoves) => StatusCode::CONFLICT,
            ApiError::UserService(UserServiceError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            ApiError::UserService(UserServiceError::GameServiceError(e)) => game_status(e),
            ApiError::UserService(UserServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::AuthService(AuthServiceError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            ApiError::AuthService(AuthServiceError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            ApiError::AuthService(AuthServiceError::UserServiceError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::AuthService(AuthServiceError::JwtError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::AuthService(
                AuthServiceError::InvalidToken | AuthServiceError::ExpiredToken,
            ) => StatusCode::UNAUTHORIZED,

            ApiError::GameService(e) => game_status(e),

            ApiError::LeaderboardService(LeaderboardServiceError::UserNotFound) => {
                StatusCode::NOT_FOUND
            }
            ApiError::LeaderboardService(LeaderboardServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::UserService(e) => e.to_string(),
            ApiError::AuthService(e) => e.to_string(),
            ApiError::GameService(e) => e.to_string(),
            ApiError::LeaderboardService(e) => e.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Unauthorized => "Missing or invalid bearer token".to_string(),
            ApiError::Forbidden => "You can only change your own account".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Storage and invariant details stay in the logs.
        let message = if status.is_server_error() {
            error!("Request failed: {}", self.message());
            "Internal server error".to_string()
        } else {
            self.message()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
