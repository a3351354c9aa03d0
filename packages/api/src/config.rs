use std::fmt;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    DynamoDb {
        games_table: String,
        users_table: String,
    },
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Behind API Gateway through the Lambda runtime.
    Lambda,
    /// Plain HTTP server on `bind_addr`.
    Local,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub storage: StorageBackend,
    pub run_mode: RunMode,
    pub bind_addr: SocketAddr,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} environment variable must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "Invalid value for {}: {}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let jwt_secret = require("JWT_SECRET")?;

        let storage = match get("STORAGE_BACKEND").as_deref() {
            None | Some("dynamodb") => StorageBackend::DynamoDb {
                games_table: require("GAMES_TABLE")?,
                users_table: require("USERS_TABLE")?,
            },
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let run_mode = match get("RUN_MODE").as_deref() {
            None | Some("lambda") => RunMode::Lambda,
            Some("local") => RunMode::Local,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "RUN_MODE",
                    value: other.to_string(),
                })
            }
        };

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        Ok(AppConfig {
            jwt_secret,
            storage,
            run_mode,
            bind_addr,
        })
    }
}
