use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use lambda_http::tracing::debug;
use shared::services::errors::user_service_errors::UserServiceError;

use crate::{error::ApiError, state::AppState};

/// The account id carried by a valid `Authorization: Bearer <jwt>` header.
///
/// The account must still exist; tokens of deleted accounts are rejected.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let user_id = state
            .auth_service
            .extract_user_id_from_token(token)
            .map_err(|e| {
                debug!("Rejected bearer token: {}", e);
                ApiError::from(e)
            })?;

        state
            .user_service
            .get_user_by_id(&user_id)
            .await
            .map_err(|e| match e {
                UserServiceError::UserNotFound => {
                    debug!("Bearer token for deleted user {}", user_id);
                    ApiError::Unauthorized
                }
                other => ApiError::from(other),
            })?;

        Ok(AuthenticatedUser { user_id })
    }
}
