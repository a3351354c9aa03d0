use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use lambda_http::tracing::{debug, warn};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::auth::requests::UpdateUserRequest;
use shared::models::user::UserResponse;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(get_user).delete(delete_user))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user_by_id).patch(update_user))
}

async fn get_user(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<UserResponse>, ApiError> {
    state
        .user_service
        .get_user_by_id(&authenticated_user.user_id)
        .await
        .map(|user| Json(user.into()))
        .map_err(|e| {
            warn!(
                "Failed to retrieve user {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}

async fn delete_user(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .delete_user(&authenticated_user.user_id)
        .await
        .map_err(|e| {
            warn!(
                "Failed to delete user {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })?;
    debug!("User deleted successfully: {}", authenticated_user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn list_users(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

async fn get_user_by_id(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.get_user_by_id(&user_id).await?;
    Ok(Json(user.into()))
}

async fn update_user(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(user_id): Path<String>,
    Json(changes): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    if authenticated_user.user_id != user_id {
        warn!(
            "User {} tried to update account {}",
            authenticated_user.user_id, user_id
        );
        return Err(ApiError::Forbidden);
    }

    let user = state
        .user_service
        .update_user(
            &user_id,
            changes.email.as_deref(),
            changes.password.as_deref(),
        )
        .await?;
    debug!("User updated successfully: {}", user.id);
    Ok(Json(user.into()))
}
