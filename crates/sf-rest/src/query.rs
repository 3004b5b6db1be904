//! SOQL query result types.

use serde::{Deserialize, Serialize};

/// One page of SOQL query results.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize")]
    pub total_size: u64,

    /// Whether all records are returned (no more pages).
    pub done: bool,

    /// Path of the next page, relative to the instance host.
    #[serde(rename = "nextRecordsUrl")]
    pub next_records_url: Option<String>,

    /// The records in this page.
    pub records: Vec<T>,
}

/// Percent-encode a SOQL statement for the `q` parameter.
///
/// Only spaces are encoded (as `%20`); every other character is passed
/// through unchanged.
pub fn encode_soql(soql: &str) -> String {
    soql.replace(' ', "%20")
}
