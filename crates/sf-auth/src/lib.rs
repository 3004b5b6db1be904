//! # sf-auth
//!
//! Salesforce authentication for sflite: the OAuth 2.0 username-password
//! flow and the session it produces.
//!
//! ## Security
//!
//! - Secrets and tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error messages never carry credential values
//!
//! ## Example
//!
//! ```rust,no_run
//! use sflite_auth::{Credentials, SessionManager};
//! use sflite_client::SfHttpClient;
//!
//! # async fn example() -> Result<(), sflite_auth::Error> {
//! let creds = Credentials::from_env()?;
//! creds.validate()?;
//!
//! let mut http = SfHttpClient::default_client()?;
//! let mut session = SessionManager::new(creds);
//! session.ensure_token(&mut http).await?;
//!
//! println!("calls go to {}", session.resolved_host());
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod oauth;
mod session;

pub use credentials::{Credentials, Instance};
pub use error::{Error, ErrorKind, Result};
pub use oauth::{password_grant_body, token_request, TokenResponse, TOKEN_PATH};
pub use session::{Session, SessionManager};

/// Login host for production orgs.
pub const PRODUCTION_LOGIN_HOST: &str = "login.salesforce.com";

/// Login host for sandbox orgs.
pub const SANDBOX_LOGIN_HOST: &str = "test.salesforce.com";
