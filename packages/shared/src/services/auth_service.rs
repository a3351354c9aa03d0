use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::auth::responses::{LoginResponse, TokenClaims};

use crate::services::errors::auth_service_errors::AuthServiceError;
use crate::services::errors::user_service_errors::UserServiceError;
use crate::services::user_service::UserService;

const TOKEN_LIFETIME_HOURS: i64 = 24;

pub struct AuthService {
    user_service: Arc<UserService>,
    jwt_secret: String,
}

impl AuthService {
    pub fn with_jwt_secret(user_service: Arc<UserService>, jwt_secret: String) -> Self {
        AuthService {
            user_service,
            jwt_secret,
        }
    }

    pub async fn authenticate_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, AuthServiceError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthServiceError::ValidationError(
                "Username or password cannot be empty".to_string(),
            ));
        }

        match self.user_service.get_user_by_username(username).await {
            Ok(user) if user.verify_password(password) => self.generate_token(&user.id),
            Ok(_) | Err(UserServiceError::UserNotFound) => {
                warn!("Failed login for {}", username);
                Err(AuthServiceError::InvalidCredentials)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn generate_token(&self, user_id: &str) -> Result<LoginResponse, AuthServiceError> {
        let now = Utc::now();
        let exp = (now + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp();
        let iat = now.timestamp();

        let claims = TokenClaims {
            sub: user_id.to_string(),
            exp,
            iat,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(|e| AuthServiceError::JwtError(format!("{:#?}", e)))?;
        debug!("Issued token for user {}", user_id);

        Ok(LoginResponse {
            user_id: user_id.to_string(),
            token,
            token_type: "Bearer".to_string(),
            expires_in: TOKEN_LIFETIME_HOURS * 60 * 60,
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let validation = Validation::default();

        match decode::<TokenClaims>(token, &decoding_key, &validation) {
            Ok(token_data) => {
                let now = Utc::now().timestamp();
                if token_data.claims.exp < now {
                    Err(AuthServiceError::ExpiredToken)
                } else {
                    Ok(token_data.claims)
                }
            }
            Err(err) => match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    Err(AuthServiceError::ExpiredToken)
                }
                _ => Err(AuthServiceError::InvalidToken),
            },
        }
    }

    pub fn extract_user_id_from_token(&self, token: &str) -> Result<String, AuthServiceError> {
        let claims = self.verify_token(token)?;
        Ok(claims.sub)
    }
}
