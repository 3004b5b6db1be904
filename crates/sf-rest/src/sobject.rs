//! REST error payload types.

use serde::{Deserialize, Serialize};

/// Error entry returned by the REST API on a failed request.
///
/// Non-success responses carry a JSON array of these.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    #[serde(rename = "errorCode")]
    pub error_code: String,
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}
