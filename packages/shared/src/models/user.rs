use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, password: &str) -> Self {
        let password_salt = Uuid::new_v4().to_string();
        User {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            password_hash: hash_password(password, &password_salt),
            password_salt,
            created_at: Utc::now(),
        }
    }

    /// Digest comparison runs in constant time.
    pub fn verify_password(&self, password: &str) -> bool {
        let candidate = hash_password(password, &self.password_salt);
        candidate
            .as_bytes()
            .ct_eq(self.password_hash.as_bytes())
            .into()
    }

    /// Replaces the password with a fresh salt.
    pub fn set_password(&mut self, password: &str) {
        self.password_salt = Uuid::new_v4().to_string();
        self.password_hash = hash_password(password, &self.password_salt);
    }
}

fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Public view of an account, without password material.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
