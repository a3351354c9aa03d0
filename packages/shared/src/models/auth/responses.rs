use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub token: String,
    pub token_type: String,
    /// Seconds until `token` expires.
    pub expires_in: i64,
}

/// JWT payload. Timestamps are Unix seconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}
