use std::time::Duration;

use sflite::{ClientConfig, Credentials, SalesforceRestClient};
use sflite_client::TcpTransport;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/services/oauth2/token";

/// Credentials whose login host is the local mock server.
pub fn credentials() -> Credentials {
    Credentials::with_login_host(
        "127.0.0.1",
        "3MVG9test",
        "test_secret",
        "integration@example.com",
        "p@ss&word",
    )
}

/// Client configuration pointing at the mock server's port.
pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .with_port(server.address().port())
        .with_response_delay(Duration::ZERO)
        .with_read_idle_timeout(Duration::from_millis(500))
        .build()
}

pub fn client(server: &MockServer) -> SalesforceRestClient<TcpTransport> {
    SalesforceRestClient::plaintext(credentials(), config(server))
        .expect("test credentials are valid")
}

/// A successful token response whose instance URL is the mock server.
pub fn token_response(server: &MockServer, access_token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "access_token": access_token,
        "instance_url": server.uri(),
        "id": "https://login.salesforce.com/id/00Dxx0000001gPL/005xx000001Sv6A",
        "token_type": "Bearer",
        "issued_at": "1700000000000",
        "signature": "c2lnbmF0dXJl"
    }))
}

/// Mount a token endpoint that always succeeds with `access_token`.
pub async fn mount_token(server: &MockServer, access_token: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response(server, access_token))
        .expect(expected_calls)
        .mount(server)
        .await;
}
