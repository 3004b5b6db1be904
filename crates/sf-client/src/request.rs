//! Raw HTTP/1.1 request construction.
//!
//! Requests are rendered by hand: request line, `Host`, optional
//! `Authorization: Bearer`, `Content-Type`, `Content-Length`, blank line,
//! body. Nothing is escaped. Callers must not put CR/LF or other control
//! characters in the path, content type or token.

use std::fmt;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl RequestMethod {
    /// The method token as it appears on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully specified request, ready to be rendered onto the wire.
///
/// The bearer token is redacted in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct RawRequest {
    pub method: RequestMethod,
    pub host: String,
    pub path: String,
    pub content_type: String,
    pub body: String,
    pub bearer_token: Option<String>,
}

impl fmt::Debug for RawRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawRequest")
            .field("method", &self.method)
            .field("host", &self.host)
            .field("path", &self.path)
            .field("content_type", &self.content_type)
            .field("body_len", &self.body.len())
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl RawRequest {
    /// Create an unauthenticated request with an empty body.
    pub fn new(method: RequestMethod, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method,
            host: host.into(),
            path: path.into(),
            content_type: crate::CONTENT_TYPE_JSON.to_string(),
            body: String::new(),
            bearer_token: None,
        }
    }

    /// Set the Content-Type header value.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the literal request body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Attach a bearer token. An empty token leaves the request unauthenticated.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.bearer_token = if token.is_empty() { None } else { Some(token) };
        self
    }

    /// Render the request exactly as it is written to the socket.
    pub fn to_wire(&self) -> String {
        let mut wire = format!(
            "{} {} HTTP/1.1\r\nHost: {}\r\n",
            self.method, self.path, self.host
        );
        if let Some(token) = self.bearer_token.as_deref().filter(|t| !t.is_empty()) {
            wire.push_str("Authorization: Bearer ");
            wire.push_str(token);
            wire.push_str("\r\n");
        }
        wire.push_str(&format!(
            "Content-Type: {}\r\nContent-Length: {}\r\n\r\n",
            self.content_type,
            self.body.len()
        ));
        wire.push_str(&self.body);
        wire
    }
}
