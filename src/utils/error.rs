// src/utils/error.rs

use serde::{Deserialize, Serialize};
use std::fmt;

pub type RelayResult<T> = Result<T, RelayError>;

/// Main error type for the relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayError {
    pub message: String,
    pub status: Option<u16>,
    pub error_code: Option<String>,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ConfigurationError,
    SerializationError,
    DatabaseError,
    NetworkError,
    ExternalServiceError,
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RelayError {}

impl RelayError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            error_code: None,
            kind,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, error_code: impl Into<String>) -> Self {
        self.error_code = Some(error_code.into());
        self
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigurationError, message)
            .with_status(500)
            .with_code("CONFIG_ERROR")
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationError, message)
            .with_status(400)
            .with_code("PARSE_ERROR")
    }

    pub fn database_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DatabaseError, message)
            .with_status(500)
            .with_code("DATABASE_ERROR")
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NetworkError, message)
            .with_status(503)
            .with_code("NETWORK_ERROR")
    }

    pub fn discord_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalServiceError, message)
            .with_status(502)
            .with_code("DISCORD_ERROR")
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::parse_error(format!("JSON parsing error: {}", err))
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::network_error(format!("HTTP request failed: {}", err))
    }
}

impl From<url::ParseError> for RelayError {
    fn from(err: url::ParseError) -> Self {
        RelayError::config_error(format!("URL parse error: {}", err))
    }
}

impl From<RelayError> for worker::Error {
    fn from(err: RelayError) -> Self {
        let message = match err.status {
            Some(status_code) => format!(
                "[Status: {}] RelayError (Kind: {:?}): {}",
                status_code, err.kind, err.message
            ),
            None => format!("RelayError (Kind: {:?}): {}", err.kind, err.message),
        };

        worker::Error::RustError(message)
    }
}
