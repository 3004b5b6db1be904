//! Error types for sf-rest.
//!
//! Every failure a call can end in maps onto one [`ErrorKind`]. Lower-crate
//! errors are folded into these kinds by the `From` impls below.

/// Result type alias for sf-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sf-rest operations.
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

    /// HTTP status attached to the failure, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Authentication { status, .. } => Some(*status),
            ErrorKind::UnauthorizedRetryExhausted { .. } => Some(401),
            ErrorKind::SalesforceApi { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the connection could not be opened or broke mid-exchange.
    pub fn is_connection_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Connection(_))
    }

    /// Returns true if the token exchange was refused.
    pub fn is_authentication_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication { .. })
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The transport could not connect, or failed while exchanging bytes.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The token exchange answered with a non-200 status.
    #[error("Authentication failed ({status}): {error} - {description}")]
    Authentication {
        status: u16,
        error: String,
        description: String,
    },

    /// The call was still answered 401 after the re-authentication budget was spent.
    #[error("Unauthorized after {attempts} re-authentication attempt(s)")]
    UnauthorizedRetryExhausted { attempts: u32, body: String },

    /// The response (or token response) could not be interpreted.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Salesforce rejected a typed request (non-success status).
    #[error("Salesforce API error ({status}): {error_code} - {message}")]
    SalesforceApi {
        status: u16,
        error_code: String,
        message: String,
    },

    /// Credentials are missing or inconsistent.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<sflite_client::ErrorKind> for ErrorKind {
    fn from(kind: sflite_client::ErrorKind) -> Self {
        use sflite_client::ErrorKind as C;
        match kind {
            C::Connection(msg) | C::Io(msg) => ErrorKind::Connection(msg),
            C::Tls(msg) => ErrorKind::Connection(format!("TLS: {msg}")),
            C::MalformedResponse(msg) => ErrorKind::MalformedResponse(msg),
            C::Json(msg) => ErrorKind::Json(msg),
        }
    }
}

impl From<sflite_client::Error> for Error {
    fn from(err: sflite_client::Error) -> Self {
        Self {
            kind: err.kind.into(),
            source: err.source,
        }
    }
}

impl From<sflite_auth::Error> for Error {
    fn from(err: sflite_auth::Error) -> Self {
        use sflite_auth::ErrorKind as A;
        let kind = match err.kind {
            A::Authentication {
                status,
                error,
                description,
            } => ErrorKind::Authentication {
                status,
                error,
                description,
            },
            A::MalformedTokenResponse { status, message } => {
                ErrorKind::MalformedResponse(format!("token response ({status}): {message}"))
            }
            A::Client(kind) => kind.into(),
            A::InvalidCredentials(msg) => ErrorKind::InvalidCredentials(msg),
            A::EnvVar(name) => {
                ErrorKind::InvalidCredentials(format!("environment variable not set: {name}"))
            }
            A::Json(msg) => ErrorKind::Json(msg),
            A::Serialization(msg) => ErrorKind::Other(msg),
        };
        Self {
            kind,
            source: err.source,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}
