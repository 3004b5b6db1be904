//! Response parsing: status code and JSON body extraction from raw text.
//!
//! The status code is read at a fixed offset (just past `"HTTP/1.1 "`).
//! The body is located by searching for the first `{`; a `[` immediately
//! before it, or opening the body after the headers, marks an array-typed
//! body. The end of the value is found with
//! serde_json's streaming tokenizer, falling back to the offset heuristic
//! when the value cannot be tokenized.

use serde::de::{DeserializeOwned, IgnoredAny};

use crate::error::{Error, ErrorKind, Result};

/// Byte offset of the three status digits in `HTTP/1.1 200 OK`.
const STATUS_OFFSET: usize = 9;

/// Status code and JSON body of one call attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallResult {
    /// HTTP status code.
    pub status: u16,
    /// Raw JSON fragment; empty when the response carried no JSON.
    pub body: String,
}

impl CallResult {
    /// Create a result from its parts.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true if the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Deserialize the body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    /// Look up a top-level field of an object body as a string.
    ///
    /// String values are returned unquoted; other non-null values are
    /// returned in their JSON form.
    pub fn field(&self, key: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        match value.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Parse the full text of an HTTP response.
///
/// Fails with [`ErrorKind::MalformedResponse`] when the status digits are
/// missing. A response without any `{` yields an empty body.
pub fn parse(raw: &str) -> Result<CallResult> {
    let status = parse_status(raw)?;
    let body = extract_body(raw).unwrap_or_default().to_string();
    Ok(CallResult { status, body })
}

fn parse_status(raw: &str) -> Result<u16> {
    let digits = raw
        .as_bytes()
        .get(STATUS_OFFSET..STATUS_OFFSET + 3)
        .filter(|d| d.iter().all(u8::is_ascii_digit))
        .ok_or_else(|| {
            let preview: String = raw.chars().take(16).collect();
            Error::new(ErrorKind::MalformedResponse(format!(
                "no status code in response starting {preview:?}"
            )))
        })?;

    Ok(digits
        .iter()
        .fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0')))
}

/// Locate the JSON value in a response. `None` when there is no `{`.
fn extract_body(raw: &str) -> Option<&str> {
    let open = raw.find('{')?;
    let start = array_start(raw, open).unwrap_or(open);
    let is_array = start < open;
    let candidate = &raw[start..];

    if let Some(len) = balanced_len(candidate) {
        return Some(&candidate[..len]);
    }

    if is_array {
        let end = raw[open..]
            .find(']')
            .map(|i| open + i + 1)
            .unwrap_or(raw.len());
        Some(&raw[start..end])
    } else {
        Some(candidate)
    }
}

/// Offset of the `[` opening an array body whose first `{` is at `open`.
fn array_start(raw: &str, open: usize) -> Option<usize> {
    if raw[..open].ends_with('[') {
        return Some(open - 1);
    }

    let headers_end = raw[..open].find("\r\n\r\n")? + 4;
    let offset = raw[headers_end..open].find(|c: char| !c.is_ascii_whitespace())?;
    let pos = headers_end + offset;
    (raw.as_bytes()[pos] == b'[').then_some(pos)
}

/// Byte length of the first complete JSON value in `text`.
fn balanced_len(text: &str) -> Option<usize> {
    let mut values = serde_json::Deserializer::from_str(text).into_iter::<IgnoredAny>();
    match values.next() {
        Some(Ok(_)) => Some(values.byte_offset()),
        _ => None,
    }
}
