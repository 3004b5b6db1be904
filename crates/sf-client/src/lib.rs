//! # sf-client
//!
//! Wire-level plumbing for a minimal Salesforce REST client.
//!
//! This crate provides:
//! - A raw HTTP/1.1 request builder ([`RawRequest`])
//! - A response parser that extracts the status code and the JSON body,
//!   including array-typed bodies ([`response::parse`])
//! - A [`Transport`] abstraction with a rustls-backed [`TlsTransport`]
//! - [`SfHttpClient`], which performs one connect/write/read/close attempt
//! - The bounded re-authentication policy ([`RetryPolicy`])
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SalesforceRestClient                     │
//! │  (sf-rest: call orchestration, CRUD + query)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SessionManager                           │
//! │  (sf-auth: password grant, bearer token, resolved host)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - RawRequest -> wire string                                │
//! │  - Transport: connect / write / read_all / close            │
//! │  - Response parsing                                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use sflite_client::{ClientConfig, RawRequest, RequestMethod, SfHttpClient};
//!
//! # async fn example() -> Result<(), sflite_client::Error> {
//! let mut client = SfHttpClient::new(ClientConfig::default())?;
//! let request = RawRequest::new(
//!     RequestMethod::Get,
//!     "myorg.my.salesforce.com",
//!     "/services/data/v58.0/sobjects/Account/001xx000003DGb2",
//! )
//! .bearer_auth("00Dxx0000001gPL!AR8AQ...");
//!
//! let result = client.send(&request).await?;
//! println!("{} {}", result.status, result.body);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod request;
pub mod response;
mod retry;
mod transport;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{RawRequest, RequestMethod};
pub use response::CallResult;
pub use retry::{RetryConfig, RetryPolicy};
pub use transport::{TcpTransport, TlsTransport, Transport};

/// Default Salesforce API version.
pub const DEFAULT_API_VERSION: &str = "58.0";

/// Port for HTTPS.
pub const HTTPS_PORT: u16 = 443;

/// Content type for JSON request bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type for form-encoded request bodies.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
