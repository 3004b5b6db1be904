//! Byte transports: one connection per call, opened and closed by the client.
//!
//! [`TlsTransport`] is the production transport. [`TcpTransport`] speaks
//! plaintext and exists for local development servers and tests.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{DigitallySignedStruct, RootCertStore, SignatureScheme};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};

/// A connection-oriented byte transport.
///
/// The client drives it as connect → write → read_all → close, once per
/// request. Implementations hold at most one open connection.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Open a connection to `host:port`.
    async fn connect(&mut self, host: &str, port: u16) -> Result<()>;

    /// Write all of `bytes` to the open connection.
    async fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Read the response until it is complete, the peer closes, or the
    /// connection goes idle.
    async fn read_all(&mut self) -> Result<Vec<u8>>;

    /// Close the connection. Safe to call when nothing is open.
    async fn close(&mut self);
}

/// TLS transport backed by rustls.
pub struct TlsTransport {
    connector: TlsConnector,
    connect_timeout: Duration,
    read_idle_timeout: Duration,
    stream: Option<TlsStream<TcpStream>>,
}

impl std::fmt::Debug for TlsTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsTransport")
            .field("connect_timeout", &self.connect_timeout)
            .field("read_idle_timeout", &self.read_idle_timeout)
            .field("connected", &self.stream.is_some())
            .finish()
    }
}

impl TlsTransport {
    /// Build a TLS transport from client configuration.
    ///
    /// Server certificates are verified against the webpki root store unless
    /// `accept_invalid_certs` is set.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let builder = rustls::ClientConfig::builder_with_provider(provider.clone())
            .with_safe_default_protocol_versions()?;

        let tls_config = if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled; the peer is not authenticated");
            builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert { provider }))
                .with_no_client_auth()
        } else {
            let mut roots = RootCertStore::empty();
            roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
            builder.with_root_certificates(roots).with_no_client_auth()
        };

        Ok(Self {
            connector: TlsConnector::from(Arc::new(tls_config)),
            connect_timeout: config.connect_timeout,
            read_idle_timeout: config.read_idle_timeout,
            stream: None,
        })
    }
}

impl Transport for TlsTransport {
    async fn connect(&mut self, host: &str, port: u16) -> Result<()> {
        self.close().await;

        let server_name = ServerName::try_from(host.to_string()).map_err(|e| {
            Error::with_source(
                ErrorKind::Connection(format!("invalid server name {host:?}")),
                e,
            )
        })?;

        let handshake = async {
            let tcp = TcpStream::connect((host, port)).await?;
            self.connector.connect(server_name, tcp).await
        };

        let stream = tokio::time::timeout(self.connect_timeout, handshake)
            .await
            .map_err(|_| {
                Error::new(ErrorKind::Connection(format!(
                    "timed out connecting to {host}:{port}"
                )))
            })?
            .map_err(|e| connect_error(host, port, e))?;

        debug!(host, port, "TLS connection established");
        self.stream = Some(stream);
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or_else(not_connected)?;
        write_request(stream, bytes).await
    }

    async fn read_all(&mut self) -> Result<Vec<u8>> {
        let idle = self.read_idle_timeout;
        let stream = self.stream.as_mut().ok_or_else(not_connected)?;
        read_response(stream, idle).await.map_err(Into::into)
    }

    async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.shutdown().await;
        }
    }
}

/// Plaintext TCP transport with the same framing as [`TlsTransport`].
#[derive(Debug)]
pub struct TcpTransport {
    connect_timeout: Duration,
    read_idle_timeout: Duration,
    stream: Option<TcpStream>,
}

impl TcpTransport {
    /// Build a plaintext transport from client configuration.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout,
            read_idle_timeout: config.read_idle_timeout,
            stream: None,
        }
    }
}

impl Transport for TcpTransport {
    async fn connect(&mut self, host: &str, port: u16) -> Result<()> {
        self.close().await;

        let stream = tokio::time::timeout(self.connect_timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| {
                Error::new(ErrorKind::Connection(format!(
                    "timed out connecting to {host}:{port}"
                )))
            })?
            .map_err(|e| connect_error(host, port, e))?;

        debug!(host, port, "TCP connection established");
        self.stream = Some(stream);
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or_else(not_connected)?;
        write_request(stream, bytes).await
    }

    async fn read_all(&mut self) -> Result<Vec<u8>> {
        let idle = self.read_idle_timeout;
        let stream = self.stream.as_mut().ok_or_else(not_connected)?;
        read_response(stream, idle).await.map_err(Into::into)
    }

    async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.shutdown().await;
        }
    }
}

fn not_connected() -> Error {
    Error::new(ErrorKind::Connection("not connected".to_string()))
}

fn connect_error(host: &str, port: u16, err: io::Error) -> Error {
    Error::with_source(
        ErrorKind::Connection(format!("failed to connect to {host}:{port}: {err}")),
        err,
    )
}

async fn write_request<S: AsyncWrite + Unpin>(stream: &mut S, bytes: &[u8]) -> Result<()> {
    stream.write_all(bytes).await?;
    stream.flush().await?;
    Ok(())
}

/// Read until EOF, an idle gap of `idle`, or a complete framed response.
async fn read_response<S: AsyncRead + Unpin>(stream: &mut S, idle: Duration) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(4096);
    let mut chunk = [0u8; 4096];

    loop {
        let n = match tokio::time::timeout(idle, stream.read(&mut chunk)).await {
            Err(_) => break,
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => n,
            // Peers that close without a TLS close_notify.
            Ok(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof && !buf.is_empty() => break,
            Ok(Err(e)) => return Err(e),
        };
        buf.extend_from_slice(&chunk[..n]);
        if response_complete(&buf) {
            break;
        }
    }

    Ok(buf)
}

/// True once the header block is in and the body length is satisfied.
///
/// Responses without `Content-Length` (other than 204/304) are only ended
/// by EOF or the idle timeout.
fn response_complete(buf: &[u8]) -> bool {
    let mut headers = [httparse::EMPTY_HEADER; 64];
    let mut response = httparse::Response::new(&mut headers);
    let header_len = match response.parse(buf) {
        Ok(httparse::Status::Complete(len)) => len,
        _ => return false,
    };

    if matches!(response.code, Some(204 | 304)) {
        return true;
    }

    response
        .headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("content-length"))
        .and_then(|h| std::str::from_utf8(h.value).ok())
        .and_then(|v| v.trim().parse::<usize>().ok())
        .is_some_and(|len| buf.len() - header_len >= len)
}

/// Certificate verifier that accepts any server certificate but still
/// checks handshake signatures.
#[derive(Debug)]
struct AcceptAnyServerCert {
    provider: Arc<CryptoProvider>,
}

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}
