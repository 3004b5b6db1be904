//! Salesforce REST API client.
//!
//! `SalesforceRestClient` owns the HTTP client, the session and the status
//! of the most recent call. Every operation funnels through
//! [`call`](SalesforceRestClient::call).

use sflite_auth::{Credentials, SessionManager};
use sflite_client::{ClientConfig, SfHttpClient, TcpTransport, TlsTransport, Transport};

use crate::error::Result;

mod call;
mod crud;
mod query;

#[cfg(test)]
pub(crate) mod scripted;

/// Salesforce REST API client.
///
/// Provides:
/// - CRUD operations on SObjects
/// - SOQL queries, with pagination helpers
/// - The status code of the most recent call via [`last_status`](Self::last_status)
///
/// The token is acquired on the first call and refreshed when a call is
/// answered 401.
///
/// # Thread safety
///
/// Every operation takes `&mut self`; one call is in flight at a time.
/// Share a client across tasks only behind a lock such as
/// `tokio::sync::Mutex`.
///
/// # Example
///
/// ```rust,no_run
/// use sflite_auth::Credentials;
/// use sflite_rest::SalesforceRestClient;
///
/// # async fn example() -> Result<(), sflite_rest::Error> {
/// let creds = Credentials::named("myorg", "client_id", "client_secret", "user@example.com", "password");
/// let mut client = SalesforceRestClient::new(creds)?;
///
/// let id = client.create("Account", r#"{"Name":"New Account"}"#).await?;
/// if let Some(id) = id {
///     client.update("Account", &id, r#"{"Name":"Updated"}"#).await?;
///     client.delete("Account", &id).await?;
/// }
///
/// let body = client.query("SELECT Id, Name FROM Account LIMIT 10").await?;
/// println!("{} {}", client.last_status(), body);
/// # Ok(())
/// # }
/// ```
pub struct SalesforceRestClient<T: Transport = TlsTransport> {
    http: SfHttpClient<T>,
    session: SessionManager,
    last_status: u16,
}

impl<T: Transport> std::fmt::Debug for SalesforceRestClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceRestClient")
            .field("session", &self.session)
            .field("config", self.http.config())
            .field("last_status", &self.last_status)
            .finish_non_exhaustive()
    }
}

impl SalesforceRestClient<TlsTransport> {
    /// Create a new TLS client with default configuration.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new TLS client with custom configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        credentials.validate()?;
        let http = SfHttpClient::new(config)?;
        Ok(Self::from_parts(http, credentials))
    }

    /// Create a TLS client from `SF_*` environment variables.
    ///
    /// See [`Credentials::from_env`] for the recognized variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Credentials::from_env()?)
    }
}

impl SalesforceRestClient<TcpTransport> {
    /// Create a plaintext client for local servers.
    pub fn plaintext(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        credentials.validate()?;
        Ok(Self::from_parts(SfHttpClient::plaintext(config), credentials))
    }
}

impl<T: Transport> SalesforceRestClient<T> {
    /// Create a client over a caller-supplied transport.
    pub fn with_transport(credentials: Credentials, transport: T, config: ClientConfig) -> Result<Self> {
        credentials.validate()?;
        Ok(Self::from_parts(
            SfHttpClient::with_transport(transport, config),
            credentials,
        ))
    }

    fn from_parts(http: SfHttpClient<T>, credentials: Credentials) -> Self {
        Self {
            http,
            session: SessionManager::new(credentials),
            last_status: 0,
        }
    }

    /// Status code of the most recently received response (0 before any).
    pub fn last_status(&self) -> u16 {
        self.last_status
    }

    /// Get the API version (e.g. "58.0").
    pub fn api_version(&self) -> &str {
        self.session.credentials().api_version()
    }

    /// Host API calls are sent to.
    pub fn resolved_host(&self) -> &str {
        self.session.resolved_host()
    }

    /// Returns true if a bearer token is held.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Get the session manager.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Get the HTTP client configuration.
    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// Build a path under `/services/data/v{version}/`.
    pub(crate) fn data_path(&self, suffix: &str) -> String {
        format!("/services/data/v{}/{}", self.api_version(), suffix)
    }

    /// Build a path under `/services/data/v{version}/sobjects/`.
    pub(crate) fn sobject_path(&self, sobject: &str, id: Option<&str>) -> String {
        match id {
            Some(id) => self.data_path(&format!("sobjects/{}/{}", sobject, id)),
            None => self.data_path(&format!("sobjects/{}", sobject)),
        }
    }
}
