//! Single-attempt HTTP client: one connection, one request, one parsed response.

use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::RawRequest;
use crate::response::{self, CallResult};
use crate::transport::{TcpTransport, TlsTransport, Transport};

/// HTTP client that performs exactly one attempt per [`send`](Self::send).
///
/// Each attempt opens a connection to the request's host on the configured
/// port, writes the rendered request, waits `response_delay`, reads the
/// response and closes the connection. There is no pooling and no retry;
/// re-authentication is decided one layer up.
///
/// Not thread-safe: `send` takes `&mut self` and one request is in flight
/// at a time.
#[derive(Debug)]
pub struct SfHttpClient<T: Transport = TlsTransport> {
    transport: T,
    config: ClientConfig,
}

impl SfHttpClient<TlsTransport> {
    /// Create a new TLS client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = TlsTransport::new(&config)?;
        Ok(Self { transport, config })
    }

    /// Create a new TLS client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }
}

impl SfHttpClient<TcpTransport> {
    /// Create a plaintext client for local servers.
    pub fn plaintext(config: ClientConfig) -> Self {
        let transport = TcpTransport::new(&config);
        Self { transport, config }
    }
}

impl<T: Transport> SfHttpClient<T> {
    /// Create a client over a caller-supplied transport.
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get the transport mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Perform one request and parse its response.
    ///
    /// The connection is closed whether or not the exchange succeeded.
    #[instrument(skip(self, request), fields(method = %request.method, host = %request.host, path = %request.path))]
    pub async fn send(&mut self, request: &RawRequest) -> Result<CallResult> {
        self.transport.connect(&request.host, self.config.port).await?;
        let exchanged = self.exchange(request).await;
        self.transport.close().await;

        let raw = exchanged?;
        let result = response::parse(&String::from_utf8_lossy(&raw))?;

        if result.is_success() {
            debug!(status = result.status, body_len = result.body.len(), "Response received");
        } else {
            info!(status = result.status, body_len = result.body.len(), "Non-success response");
        }
        Ok(result)
    }

    async fn exchange(&mut self, request: &RawRequest) -> Result<Vec<u8>> {
        debug!(authenticated = request.bearer_token.is_some(), "Sending request");
        self.transport.write(request.to_wire().as_bytes()).await?;

        if !self.config.response_delay.is_zero() {
            tokio::time::sleep(self.config.response_delay).await;
        }

        self.transport.read_all().await
    }
}
