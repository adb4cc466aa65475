//! Configuration types.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Service configuration, read from `SCHED_ASSIST_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the scheduling API, without a trailing slash.
    pub api_base_url: String,
    /// Bearer token for the scheduling API.
    pub api_token: SecretString,
    /// User the service acts for (single-user deployment).
    pub user_id: String,
    /// Port the onboarding routes listen on.
    pub port: u16,
    /// Path of the local client-state database.
    pub db_path: String,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// `SCHED_ASSIST_API_URL` and `SCHED_ASSIST_API_TOKEN` are required;
    /// everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = std::env::var("SCHED_ASSIST_API_URL")
            .map_err(|_| ConfigError::MissingEnvVar("SCHED_ASSIST_API_URL".to_string()))?;

        let api_token = std::env::var("SCHED_ASSIST_API_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("SCHED_ASSIST_API_TOKEN".to_string()))?;

        let user_id =
            std::env::var("SCHED_ASSIST_USER").unwrap_or_else(|_| "default".to_string());

        let port = match std::env::var("SCHED_ASSIST_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SCHED_ASSIST_PORT".to_string(),
                message: format!("not a valid port: {raw}"),
            })?,
            Err(_) => 8080,
        };

        let db_path = std::env::var("SCHED_ASSIST_DB_PATH")
            .unwrap_or_else(|_| "./data/sched-assist.db".to_string());

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_token: SecretString::from(api_token),
            user_id,
            port,
            db_path,
        })
    }
}
