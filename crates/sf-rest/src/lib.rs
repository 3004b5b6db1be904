//! # sf-rest
//!
//! Minimal Salesforce REST client: SObject CRUD and SOQL query over a
//! password-grant session.
//!
//! ## Features
//!
//! - **Lazy authentication** - The token is acquired on the first call
//! - **Bounded re-authentication** - A 401 refreshes the token and replays
//!   the call once (configurable through [`RetryConfig`])
//! - **SObject CRUD** - Create, Read, Update, Delete individual records
//! - **SOQL Query** - Raw, typed and paginated queries
//! - **Last status** - The status of the most recent call is always available
//!
//! ## Example
//!
//! ```rust,no_run
//! use sflite_rest::SalesforceRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sflite_rest::Error> {
//!     let mut client = SalesforceRestClient::from_env()?;
//!
//!     // Query
//!     let accounts: Vec<serde_json::Value> = client
//!         .query_all("SELECT Id, Name FROM Account LIMIT 10")
//!         .await?;
//!
//!     // Create
//!     if let Some(id) = client.create("Account", r#"{"Name":"New Account"}"#).await? {
//!         // Update
//!         client.update("Account", &id, r#"{"Name":"Updated"}"#).await?;
//!
//!         // Delete
//!         client.delete("Account", &id).await?;
//!     }
//!
//!     println!("{} accounts, last status {}", accounts.len(), client.last_status());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod query;
mod sobject;

// Main client
pub use client::SalesforceRestClient;

// Error types
pub use error::{Error, ErrorKind, Result};

// Query types
pub use query::{encode_soql, QueryResult};

// SObject types
pub use sobject::ApiError;

// Re-export lower-crate types that users might need
pub use sflite_auth::{Credentials, Instance};
pub use sflite_client::{
    CallResult, ClientConfig, ClientConfigBuilder, RequestMethod, RetryConfig,
};
