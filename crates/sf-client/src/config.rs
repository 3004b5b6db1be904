//! Client configuration.

use crate::retry::RetryConfig;
use std::time::Duration;

/// Configuration for the HTTP client and its transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Port to connect to on the resolved host.
    pub port: u16,
    /// Pause between writing a request and starting to read the response.
    pub response_delay: Duration,
    /// A read that yields no bytes for this long ends the response.
    pub read_idle_timeout: Duration,
    /// Bound on TCP connect plus TLS handshake.
    pub connect_timeout: Duration,
    /// Accept any server certificate. Off by default; see
    /// [`ClientConfigBuilder::accept_invalid_certs`].
    pub accept_invalid_certs: bool,
    /// Re-authentication policy for calls answered with 401.
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            port: crate::HTTPS_PORT,
            response_delay: Duration::from_millis(100),
            read_idle_timeout: Duration::from_secs(1),
            connect_timeout: Duration::from_secs(10),
            accept_invalid_certs: false,
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the port (443 unless talking to a local test server).
    pub fn with_port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the pause between sending a request and reading the response.
    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.config.response_delay = delay;
        self
    }

    /// Set the idle timeout that ends a response read.
    pub fn with_read_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_idle_timeout = timeout;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Disable server certificate verification.
    ///
    /// **Security:** with this enabled any peer can impersonate the
    /// Salesforce host and read the credentials sent in the token exchange.
    /// Only use it against hosts you control.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    /// Set the re-authentication policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Never re-authenticate on 401.
    pub fn without_retry(mut self) -> Self {
        self.config.retry = RetryConfig::no_retry();
        self
    }

    /// Build the client configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
