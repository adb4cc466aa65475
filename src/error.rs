//! Error types for sched-assist.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Onboarding error: {0}")]
    Onboarding(#[from] OnboardingError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Scheduling API client errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{op} request failed: {reason}")]
    RequestFailed { op: String, reason: String },

    #[error("{op} returned status {status}: {body}")]
    Status { op: String, status: u16, body: String },

    #[error("Failed to decode {op} response: {reason}")]
    Decode { op: String, reason: String },
}

/// Client state storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Onboarding finalization errors.
///
/// Only the two fatal steps surface here. Event-type seeding failures are
/// logged and never abort the workflow.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("Default schedule creation failed: {0}")]
    ScheduleCreation(#[source] ApiError),

    #[error("Profile completion failed: {0}")]
    ProfileCompletion(#[source] ApiError),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
