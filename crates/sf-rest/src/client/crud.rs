use serde::de::DeserializeOwned;
use serde::Serialize;
use sflite_client::{CallResult, RequestMethod, Transport, CONTENT_TYPE_JSON};
use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, Result};
use crate::sobject::ApiError;

impl<T: Transport> super::SalesforceRestClient<T> {
    /// Create a record from a JSON body.
    ///
    /// Returns the new record's id when Salesforce answers 201, `None`
    /// otherwise. The status is available from [`last_status`](Self::last_status)
    /// and the response body is logged at debug level.
    #[instrument(skip(self, body))]
    pub async fn create(&mut self, sobject: &str, body: &str) -> Result<Option<String>> {
        let path = self.sobject_path(sobject, None);
        let result = self
            .call(RequestMethod::Post, &path, CONTENT_TYPE_JSON, body)
            .await?;

        if result.status != 201 {
            debug!(status = result.status, body = %result.body, "Create not accepted");
            return Ok(None);
        }

        Ok(result.field("id").filter(|id| !id.is_empty()))
    }

    /// Create a record from any serializable value.
    #[instrument(skip(self, record))]
    pub async fn create_record<R: Serialize>(
        &mut self,
        sobject: &str,
        record: &R,
    ) -> Result<Option<String>> {
        let body = serde_json::to_string(record)?;
        self.create(sobject, &body).await
    }

    /// Read a record.
    ///
    /// Returns the JSON body whatever the status; check
    /// [`last_status`](Self::last_status) to tell a record from an error.
    #[instrument(skip(self))]
    pub async fn read(&mut self, sobject: &str, id: &str) -> Result<String> {
        let path = self.sobject_path(sobject, Some(id));
        let result = self
            .call(RequestMethod::Get, &path, CONTENT_TYPE_JSON, "")
            .await?;
        Ok(result.body)
    }

    /// Read a record and deserialize it.
    ///
    /// A non-success status becomes a [`ErrorKind::SalesforceApi`] error.
    #[instrument(skip(self))]
    pub async fn read_json<R: DeserializeOwned>(&mut self, sobject: &str, id: &str) -> Result<R> {
        let path = self.sobject_path(sobject, Some(id));
        let result = self
            .call(RequestMethod::Get, &path, CONTENT_TYPE_JSON, "")
            .await?;
        decode(result)
    }

    /// Update a record with a JSON body.
    ///
    /// Returns true iff Salesforce answers 204 No Content.
    #[instrument(skip(self, body))]
    pub async fn update(&mut self, sobject: &str, id: &str, body: &str) -> Result<bool> {
        let path = self.sobject_path(sobject, Some(id));
        let result = self
            .call(RequestMethod::Patch, &path, CONTENT_TYPE_JSON, body)
            .await?;
        Ok(result.status == 204)
    }

    /// Update a record from any serializable value.
    #[instrument(skip(self, record))]
    pub async fn update_record<R: Serialize>(
        &mut self,
        sobject: &str,
        id: &str,
        record: &R,
    ) -> Result<bool> {
        let body = serde_json::to_string(record)?;
        self.update(sobject, id, &body).await
    }

    /// Delete a record.
    ///
    /// Returns true iff Salesforce answers 204 No Content.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, sobject: &str, id: &str) -> Result<bool> {
        let path = self.sobject_path(sobject, Some(id));
        let result = self
            .call(RequestMethod::Delete, &path, CONTENT_TYPE_JSON, "")
            .await?;
        Ok(result.status == 204)
    }
}

/// Deserialize a successful response, or turn an error response into
/// [`ErrorKind::SalesforceApi`].
pub(crate) fn decode<R: DeserializeOwned>(result: CallResult) -> Result<R> {
    if !result.is_success() {
        return Err(api_error(&result));
    }
    Ok(result.json()?)
}

fn api_error(result: &CallResult) -> Error {
    let first = result
        .json::<Vec<ApiError>>()
        .ok()
        .and_then(|errors| errors.into_iter().next());

    let (error_code, message) = match first {
        Some(err) => (err.error_code, err.message),
        None => ("UNKNOWN_ERROR".to_string(), result.body.clone()),
    };

    Error::new(ErrorKind::SalesforceApi {
        status: result.status,
        error_code,
        message,
    })
}
