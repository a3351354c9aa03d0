use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use lambda_http::tracing::{debug, warn};

use crate::{error::ApiError, state::AppState};
use shared::models::auth::requests::{CreateUserRequest, LoginRequest};
use shared::models::auth::responses::LoginResponse;
use shared::models::user::UserResponse;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/user", post(create_user))
        .route("/auth/login", post(login))
}

async fn create_user(
    State(state): State<AppState>,
    Json(user_data): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .user_service
        .create_user(&user_data.username, &user_data.email, &user_data.password)
        .await
        .map_err(|e| {
            warn!("Failed to create user {}: {}", user_data.username, e);
            ApiError::from(e)
        })?;
    debug!("User created successfully: {}", user.id);
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

async fn login(
    State(state): State<AppState>,
    Json(login_data): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    state
        .auth_service
        .authenticate_user(&login_data.username, &login_data.password)
        .await
        .map(Json)
        .map_err(|e| {
            warn!("Failed to authenticate user {}: {}", login_data.username, e);
            ApiError::from(e)
        })
}
