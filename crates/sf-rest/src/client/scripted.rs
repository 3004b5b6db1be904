//! In-memory transport that replays canned responses and records requests.

use std::collections::VecDeque;
use std::time::Duration;

use sflite_auth::Credentials;
use sflite_client::{ClientConfig, Error, ErrorKind, Result, Transport};

use super::SalesforceRestClient;

#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    responses: VecDeque<String>,
    refuse_connect: bool,
    pub hosts: Vec<String>,
    pub requests: Vec<String>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, raw: impl Into<String>) -> Self {
        self.responses.push_back(raw.into());
        self
    }

    pub fn push(&mut self, raw: impl Into<String>) {
        self.responses.push_back(raw.into());
    }

    pub fn refuse_connect(mut self) -> Self {
        self.refuse_connect = true;
        self
    }

    pub fn token_exchanges(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| r.starts_with("POST /services/oauth2/token HTTP/1.1"))
            .count()
    }

    pub fn api_requests(&self) -> Vec<&String> {
        self.requests
            .iter()
            .filter(|r| !r.starts_with("POST /services/oauth2/token HTTP/1.1"))
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn connect(&mut self, host: &str, _port: u16) -> Result<()> {
        if self.refuse_connect {
            return Err(Error::new(ErrorKind::Connection(format!(
                "connection to {host} refused"
            ))));
        }
        self.hosts.push(host.to_string());
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.requests
            .push(String::from_utf8_lossy(bytes).into_owned());
        Ok(())
    }

    async fn read_all(&mut self) -> Result<Vec<u8>> {
        self.responses
            .pop_front()
            .map(String::into_bytes)
            .ok_or_else(|| Error::new(ErrorKind::Io("no scripted response left".to_string())))
    }

    async fn close(&mut self) {}
}

/// A raw HTTP/1.1 response with a JSON body.
pub(crate) fn http(status: u16, body: &str) -> String {
    format!(
        "HTTP/1.1 {status} Status\r\nContent-Type: application/json;charset=UTF-8\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    )
}

/// A successful token response.
pub(crate) fn token(access_token: &str, instance_url: &str) -> String {
    http(
        200,
        &format!(
            r#"{{"access_token":"{access_token}","instance_url":"{instance_url}","id":"https://login.salesforce.com/id/00Dxx/005xx","token_type":"Bearer","issued_at":"1700000000000","signature":"sig"}}"#
        ),
    )
}

pub(crate) fn credentials() -> Credentials {
    Credentials::for_environment(true, "3MVG9id", "secret", "user@example.com", "pw")
}

pub(crate) fn config() -> ClientConfig {
    ClientConfig::builder()
        .with_response_delay(Duration::ZERO)
        .build()
}

pub(crate) fn client(transport: ScriptedTransport) -> SalesforceRestClient<ScriptedTransport> {
    SalesforceRestClient::with_transport(credentials(), transport, config())
        .expect("valid credentials")
}

impl SalesforceRestClient<ScriptedTransport> {
    pub(crate) fn script(&self) -> &ScriptedTransport {
        self.http.transport()
    }

    pub(crate) fn script_mut(&mut self) -> &mut ScriptedTransport {
        self.http.transport_mut()
    }
}
