//! Error types for the Melodia client.

use melodia_core::ApiErrorBody;
use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// A non-2xx response from the backend.
///
/// `message` is the response body text, or the status line when the body
/// is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    pub status: u16,
    pub message: String,
}

impl HttpError {
    pub(crate) fn new(status: StatusCode, body: String) -> Self {
        let message = if body.trim().is_empty() {
            status_line(status)
        } else {
            body
        };
        Self {
            status: status.as_u16(),
            message,
        }
    }

    /// 401 and 403 both mean "not authorized"; callers do not distinguish them.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    /// The backend's structured error body, if the message is one.
    pub fn api_error(&self) -> Option<ApiErrorBody> {
        serde_json::from_str(&self.message).ok()
    }

    /// Best human-readable text: the structured message if present, else the raw body.
    pub fn display_message(&self) -> String {
        self.api_error()
            .map(|body| body.message)
            .unwrap_or_else(|| self.message.clone())
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for HttpError {}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Authentication failures surfaced to the initiating action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The backend rejected the identifier/password pair
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The backend rejected a registration (duplicate username/email, validation)
    #[error("Registration failed: {0}")]
    RegistrationFailed(String),
}

/// Errors that can occur when talking to the Melodia backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Backend answered with a non-2xx status
    #[error("HTTP error {0}")]
    Http(#[from] HttpError),

    /// Authentication failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid backend URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error during upload or token persistence
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Token store could not be read or written
    #[error("Token storage error: {0}")]
    TokenStore(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status of the failure, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http(e) => Some(e.status),
            _ => None,
        }
    }

    /// True for 401/403 responses.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Http(e) if e.is_unauthorized())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
