//! OAuth 2.0 username-password flow.
//!
//! The token exchange is a single unauthenticated form POST to
//! `/services/oauth2/token`. It is never retried.

use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::error::{Error, ErrorKind, Result};
use sflite_client::{CallResult, RawRequest, RequestMethod, CONTENT_TYPE_FORM};

/// Path of the token endpoint.
pub const TOKEN_PATH: &str = "/services/oauth2/token";

/// Form fields of the password grant, in wire order.
#[derive(Serialize)]
struct PasswordGrant<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    username: &'a str,
    password: &'a str,
}

/// Build the form-encoded password grant body.
///
/// Values are percent-encoded, so a password containing `&` or `=` is sent
/// intact.
pub fn password_grant_body(credentials: &Credentials) -> Result<String> {
    let grant = PasswordGrant {
        grant_type: "password",
        client_id: credentials.client_id(),
        client_secret: credentials.client_secret(),
        username: credentials.username(),
        password: credentials.password(),
    };
    Ok(serde_urlencoded::to_string(&grant)?)
}

/// Build the token request for `host`.
pub fn token_request(credentials: &Credentials, host: &str) -> Result<RawRequest> {
    Ok(RawRequest::new(RequestMethod::Post, host, TOKEN_PATH)
        .content_type(CONTENT_TYPE_FORM)
        .body(password_grant_body(credentials)?))
}

/// OAuth token response.
///
/// The access token is redacted in Debug output.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Instance URL (e.g. `https://na1.salesforce.com`).
    #[serde(default)]
    pub instance_url: Option<String>,
    /// Identity URL.
    #[serde(default)]
    pub id: Option<String>,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Issued at timestamp, in milliseconds.
    #[serde(default)]
    pub issued_at: Option<String>,
    /// Signature for verification.
    #[serde(default)]
    pub signature: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("issued_at", &self.issued_at)
            .finish_non_exhaustive()
    }
}

impl TokenResponse {
    /// Host part of `instance_url`, if present and parseable.
    ///
    /// Accepts both `https://host[:port]/...` and a bare host.
    pub fn instance_host(&self) -> Option<String> {
        let raw = self.instance_url.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(url) = url::Url::parse(raw) {
            if let Some(host) = url.host_str() {
                return Some(host.to_string());
            }
        }
        let bare = raw.split('/').next().unwrap_or(raw);
        let host = bare.split(':').next().unwrap_or(bare);
        (!host.is_empty()).then(|| host.to_string())
    }
}

/// OAuth error body returned by the token endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct OAuthErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}

/// Interpret the token endpoint's response.
///
/// 200 with a non-empty `access_token` is a token; 200 without one is a
/// malformed response; anything else is an authentication failure.
pub(crate) fn handle_token_response(result: &CallResult) -> Result<TokenResponse> {
    if result.status != 200 {
        let (error, description) = match result.json::<OAuthErrorResponse>() {
            Ok(err) => (err.error, err.error_description),
            Err(_) => ("unknown_error".to_string(), String::new()),
        };
        return Err(Error::new(ErrorKind::Authentication {
            status: result.status,
            error,
            description,
        }));
    }

    let token: TokenResponse = result.json().map_err(|e| {
        Error::with_source(
            ErrorKind::MalformedTokenResponse {
                status: result.status,
                message: "token response is not valid JSON".to_string(),
            },
            e,
        )
    })?;

    if token.access_token.is_empty() {
        return Err(Error::new(ErrorKind::MalformedTokenResponse {
            status: result.status,
            message: "access_token is empty".to_string(),
        }));
    }

    Ok(token)
}
