//! Bearer-token session lifecycle.

use tracing::{info, instrument, warn};

use crate::credentials::Credentials;
use crate::error::Result;
use crate::oauth::{handle_token_response, token_request};
use sflite_client::{SfHttpClient, Transport};

/// The current bearer token and the host API calls go to.
///
/// The token is redacted in Debug output.
#[derive(Clone, Default)]
pub struct Session {
    access_token: Option<String>,
    resolved_host: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("resolved_host", &self.resolved_host)
            .finish()
    }
}

impl Session {
    /// Get the access token, if one is held.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Get the host API calls are sent to.
    pub fn resolved_host(&self) -> &str {
        &self.resolved_host
    }
}

/// Obtains and holds the bearer token for a set of credentials.
///
/// The token is acquired lazily by [`ensure_token`](Self::ensure_token) and
/// dropped by [`invalidate`](Self::invalidate).
#[derive(Debug, Clone)]
pub struct SessionManager {
    credentials: Credentials,
    session: Session,
}

impl SessionManager {
    /// Create an unauthenticated session for `credentials`.
    pub fn new(credentials: Credentials) -> Self {
        let session = Session {
            access_token: None,
            resolved_host: credentials.host(),
        };
        Self {
            credentials,
            session,
        }
    }

    /// Get the credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get the current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get the current token, if any.
    pub fn current_token(&self) -> Option<&str> {
        self.session.access_token()
    }

    /// Get the host API calls are sent to.
    pub fn resolved_host(&self) -> &str {
        self.session.resolved_host()
    }

    /// Returns true if a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.session.access_token.is_some()
    }

    /// Drop the current token. The resolved host is kept.
    pub fn invalidate(&mut self) {
        self.session.access_token = None;
    }

    /// Make sure a token is held, performing the password grant if needed.
    ///
    /// The exchange is sent to the current resolved host. On success the
    /// resolved host is replaced with the host of `instance_url` unless the
    /// credentials name an instance. On failure no token is held.
    #[instrument(skip(self, http), fields(host = %self.session.resolved_host))]
    pub async fn ensure_token<T: Transport>(&mut self, http: &mut SfHttpClient<T>) -> Result<()> {
        if self.session.access_token.is_some() {
            return Ok(());
        }
        self.authenticate(http).await
    }

    /// Perform the password grant unconditionally.
    #[instrument(skip(self, http), fields(host = %self.session.resolved_host))]
    pub async fn authenticate<T: Transport>(&mut self, http: &mut SfHttpClient<T>) -> Result<()> {
        self.session.access_token = None;

        let request = token_request(&self.credentials, &self.session.resolved_host)?;
        let result = http.send(&request).await?;

        let token = match handle_token_response(&result) {
            Ok(token) => token,
            Err(e) => {
                warn!(status = result.status, error = %e, "Token exchange failed");
                return Err(e);
            }
        };

        if !self.credentials.instance().is_named() {
            if let Some(host) = token.instance_host() {
                self.session.resolved_host = host;
            }
        }
        self.session.access_token = Some(token.access_token);

        info!(resolved_host = %self.session.resolved_host, "Authenticated");
        Ok(())
    }
}
