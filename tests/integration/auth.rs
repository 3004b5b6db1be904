//! Token exchange against a mock login host.

use super::common::{client, credentials, mount_token, token_response, TOKEN_PATH};
use sflite::ErrorKind;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_password_grant_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "grant_type=password&client_id=3MVG9test&client_secret=test_secret\
             &username=integration%40example.com&password=p%40ss%26word",
        ))
        .respond_with(token_response(&server, "00Dform"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/data/v58.0/sobjects/Account/001xyz"))
        .and(header("Authorization", "Bearer 00Dform"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"Id": "001xyz"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    client.read("Account", "001xyz").await.unwrap();

    assert!(client.is_authenticated());
    assert_eq!(client.resolved_host(), "127.0.0.1");
}

#[tokio::test]
async fn test_token_is_acquired_once() {
    let server = MockServer::start().await;
    mount_token(&server, "00Donce", 1).await;

    Mock::given(method("GET"))
        .and(path("/services/data/v58.0/sobjects/Account/001xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"Id": "001xyz"})))
        .expect(3)
        .mount(&server)
        .await;

    let mut client = client(&server);
    for _ in 0..3 {
        client.read("Account", "001xyz").await.unwrap();
    }
}

#[tokio::test]
async fn test_rejected_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "authentication failure"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let err = client.query("SELECT Id FROM Account").await.unwrap_err();

    assert_eq!(client.last_status(), 400);
    assert!(!client.is_authenticated());
    match err.kind {
        ErrorKind::Authentication { status, error, description } => {
            assert_eq!(status, 400);
            assert_eq!(error, "invalid_grant");
            assert_eq!(description, "authentication failure");
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_host_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = sflite::ClientConfig::builder().with_port(port).build();
    let mut client = sflite::SalesforceRestClient::plaintext(credentials(), config).unwrap();

    let err = client.delete("Account", "001xyz").await.unwrap_err();
    assert!(err.is_connection_error());
    assert_eq!(client.last_status(), 0);
}
