//! Error types for sf-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

/// Result type alias for sf-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sf-auth operations.
///
/// Error messages are sanitized to prevent accidental credential exposure.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// HTTP status of the token exchange, if one was received.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Authentication { status, .. } => Some(*status),
            ErrorKind::MalformedTokenResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
///
/// Error messages avoid including credential values.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The token endpoint answered with a non-200 status.
    #[error("Authentication failed ({status}): {error} - {description}")]
    Authentication {
        status: u16,
        error: String,
        description: String,
    },

    /// The token endpoint answered 200 without a usable access token.
    #[error("Malformed token response ({status}): {message}")]
    MalformedTokenResponse { status: u16, message: String },

    /// Transport or wire-level failure from sf-client.
    #[error("{0}")]
    Client(sflite_client::ErrorKind),

    /// Invalid credentials configuration.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sflite_client::Error> for Error {
    fn from(err: sflite_client::Error) -> Self {
        Self {
            kind: ErrorKind::Client(err.kind),
            source: err.source,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(ErrorKind::Serialization(err.to_string()), err)
    }
}
