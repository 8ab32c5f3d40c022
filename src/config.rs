//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Which document store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Firestore,
    Memory,
}

impl FromStr for DatabaseBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(DatabaseBackend::Firestore),
            "memory" => Ok(DatabaseBackend::Memory),
            other => Err(ConfigError::Invalid {
                var: "DATABASE_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project hosting the Firestore database
    pub gcp_project_id: String,
    /// Document store backend
    pub database_backend: DatabaseBackend,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_backend = match env::var("DATABASE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => DatabaseBackend::Firestore,
        };

        let gcp_project_id = match (env::var("GCP_PROJECT_ID"), database_backend) {
            (Ok(id), _) => id.trim().to_string(),
            (Err(_), DatabaseBackend::Memory) => "local-dev".to_string(),
            (Err(_), DatabaseBackend::Firestore) => {
                return Err(ConfigError::Missing("GCP_PROJECT_ID"))
            }
        };

        Ok(Self {
            gcp_project_id,
            database_backend,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}
