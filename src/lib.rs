//! # sflite
//!
//! A minimal Salesforce REST client for Rust.
//!
//! Authenticates with the OAuth 2.0 username-password flow, performs SObject
//! CRUD and SOQL queries, and re-authenticates once when a call is answered
//! 401.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets) are redacted in Debug output
//! - Tracing/logging skips credential parameters
//! - TLS certificates are verified unless
//!   [`ClientConfigBuilder::accept_invalid_certs`](client::ClientConfigBuilder::accept_invalid_certs)
//!   is set explicitly
//!
//! ## Crates
//!
//! - **sflite-client** - Raw HTTP/1.1 over TLS: request builder, response parser, transport
//! - **sflite-auth** - Credentials, password grant, session
//! - **sflite-rest** - Call orchestration with bounded re-authentication, CRUD and query
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sflite::{Credentials, SalesforceRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::for_environment(
//!         true,
//!         "consumer_key",
//!         "consumer_secret",
//!         "user@example.com",
//!         "password+security_token",
//!     );
//!     let mut client = SalesforceRestClient::new(creds)?;
//!
//!     let body = client.query("SELECT Id, Name FROM Account LIMIT 10").await?;
//!     println!("{} {}", client.last_status(), body);
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
pub use sflite_auth as auth;
pub use sflite_client as client;
pub use sflite_rest as rest;

// Re-export commonly used types at the top level
pub use sflite_auth::{Credentials, Instance};
pub use sflite_client::{CallResult, ClientConfig, RetryConfig};
pub use sflite_rest::{Error, ErrorKind, QueryResult, Result, SalesforceRestClient};
