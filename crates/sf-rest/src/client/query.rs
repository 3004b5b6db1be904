use serde::de::DeserializeOwned;
use sflite_client::{RequestMethod, Transport, CONTENT_TYPE_JSON};
use tracing::{debug, instrument};

use super::crud::decode;
use crate::error::Result;
use crate::query::{encode_soql, QueryResult};

impl<T: Transport> super::SalesforceRestClient<T> {
    /// Execute a SOQL query and return the raw JSON body.
    ///
    /// Only spaces in `soql` are percent-encoded. The body is returned
    /// whatever the status; check [`last_status`](Self::last_status).
    ///
    /// # Security
    ///
    /// The statement is sent as given. Escape quotes and backslashes in any
    /// user-provided value placed inside a string literal.
    #[instrument(skip(self))]
    pub async fn query(&mut self, soql: &str) -> Result<String> {
        let path = self.query_path(soql);
        let result = self
            .call(RequestMethod::Get, &path, CONTENT_TYPE_JSON, "")
            .await?;
        Ok(result.body)
    }

    /// Execute a SOQL query and deserialize the first page.
    ///
    /// Use [`query_more`](Self::query_more) or [`query_all`](Self::query_all)
    /// for the remaining pages.
    #[instrument(skip(self))]
    pub async fn query_json<R: DeserializeOwned>(&mut self, soql: &str) -> Result<QueryResult<R>> {
        let path = self.query_path(soql);
        let result = self
            .call(RequestMethod::Get, &path, CONTENT_TYPE_JSON, "")
            .await?;
        decode(result)
    }

    /// Fetch the next page of query results.
    ///
    /// `next_records_url` is the `nextRecordsUrl` of the previous page.
    #[instrument(skip(self))]
    pub async fn query_more<R: DeserializeOwned>(
        &mut self,
        next_records_url: &str,
    ) -> Result<QueryResult<R>> {
        let result = self
            .call(RequestMethod::Get, next_records_url, CONTENT_TYPE_JSON, "")
            .await?;
        decode(result)
    }

    /// Execute a SOQL query and collect every page.
    #[instrument(skip(self))]
    pub async fn query_all<R: DeserializeOwned>(&mut self, soql: &str) -> Result<Vec<R>> {
        let mut page: QueryResult<R> = self.query_json(soql).await?;
        let mut records = std::mem::take(&mut page.records);

        while let Some(next_url) = page.next_records_url.take().filter(|_| !page.done) {
            debug!(fetched = records.len(), total = page.total_size, "Fetching next page");
            page = self.query_more(&next_url).await?;
            records.append(&mut page.records);
        }

        Ok(records)
    }

    fn query_path(&self, soql: &str) -> String {
        self.data_path(&format!("query/?q={}", encode_soql(soql)))
    }
}
