use miette::{Diagnostic, Result};
use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(homeboard::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(homeboard::config))]
    Config(String),

    #[error("Events API transport error: {0}")]
    #[diagnostic(code(homeboard::events_transport))]
    Transport(String),

    #[error("Events API returned HTTP {status}")]
    #[diagnostic(code(homeboard::events_status))]
    Status { status: u16 },

    #[error("Events API error: {0}")]
    #[diagnostic(code(homeboard::events_payload))]
    Payload(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(homeboard::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(homeboard::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(homeboard::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(homeboard::other))]
    Other(String),
}

impl Error {
    /// True when the failure is the "endpoint not found" transport status,
    /// the one case that gets a short-delay auto-retry.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Status { status } if *status == StatusCode::NOT_FOUND.as_u16())
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type BoardResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}
