//! CRUD, query and re-authentication against a mock org.

use super::common::{client, mount_token, token_response, TOKEN_PATH};
use sflite::ErrorKind;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACCOUNTS: &str = "/services/data/v58.0/sobjects/Account";
const ACCOUNT: &str = "/services/data/v58.0/sobjects/Account/001xyz";

#[tokio::test]
async fn test_crud_roundtrip() {
    let server = MockServer::start().await;
    mount_token(&server, "00Dcrud", 1).await;

    Mock::given(method("POST"))
        .and(path(ACCOUNTS))
        .and(header("Authorization", "Bearer 00Dcrud"))
        .and(body_json(serde_json::json!({"Name": "Acme"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "001xyz",
            "success": true,
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ACCOUNT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "attributes": {"type": "Account", "url": ACCOUNT},
            "Id": "001xyz",
            "Name": "Acme"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(ACCOUNT))
        .and(body_json(serde_json::json!({"Name": "Acme Corp"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(ACCOUNT))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);

    let id = client.create("Account", r#"{"Name":"Acme"}"#).await.unwrap();
    assert_eq!(id.as_deref(), Some("001xyz"));
    assert_eq!(client.last_status(), 201);

    let body = client.read("Account", "001xyz").await.unwrap();
    let record: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(record["Name"], "Acme");
    assert_eq!(client.last_status(), 200);

    assert!(client
        .update("Account", "001xyz", r#"{"Name":"Acme Corp"}"#)
        .await
        .unwrap());
    assert_eq!(client.last_status(), 204);

    assert!(client.delete("Account", "001xyz").await.unwrap());
    assert_eq!(client.last_status(), 204);
}

#[tokio::test]
async fn test_create_rejected() {
    let server = MockServer::start().await;
    mount_token(&server, "00Dtoken", 1).await;

    Mock::given(method("POST"))
        .and(path(ACCOUNTS))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!([{
            "message": "Required fields are missing: [Name]",
            "errorCode": "REQUIRED_FIELD_MISSING",
            "fields": ["Name"]
        }])))
        .mount(&server)
        .await;

    let mut client = client(&server);
    let id = client.create("Account", "{}").await.unwrap();

    assert_eq!(id, None);
    assert_eq!(client.last_status(), 400);
}

#[tokio::test]
async fn test_read_missing_record_returns_array_body() {
    let server = MockServer::start().await;
    mount_token(&server, "00Dtoken", 1).await;

    Mock::given(method("GET"))
        .and(path("/services/data/v58.0/sobjects/Account/001missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!([{
            "errorCode": "NOT_FOUND",
            "message": "The requested resource does not exist"
        }])))
        .mount(&server)
        .await;

    let mut client = client(&server);
    let body = client.read("Account", "001missing").await.unwrap();

    let errors: Vec<sflite::rest::ApiError> = serde_json::from_str(&body).unwrap();
    assert_eq!(errors[0].error_code, "NOT_FOUND");
    assert_eq!(client.last_status(), 404);
}

#[tokio::test]
async fn test_delete_with_200_is_not_success() {
    let server = MockServer::start().await;
    mount_token(&server, "00Dtoken", 1).await;

    Mock::given(method("DELETE"))
        .and(path(ACCOUNT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let mut client = client(&server);
    assert!(!client.delete("Account", "001xyz").await.unwrap());
    assert_eq!(client.last_status(), 200);
}

#[tokio::test]
async fn test_query_and_pagination() {
    #[derive(Debug, serde::Deserialize)]
    struct Account {
        #[serde(rename = "Name")]
        name: String,
    }

    let server = MockServer::start().await;
    mount_token(&server, "00Dquery", 1).await;

    Mock::given(method("GET"))
        .and(path("/services/data/v58.0/query/"))
        .and(query_param("q", "SELECT Name FROM Account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalSize": 3,
            "done": false,
            "nextRecordsUrl": "/services/data/v58.0/query/01gxx0000002Gd-2",
            "records": [{"Name": "Alpha"}, {"Name": "Beta"}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/data/v58.0/query/01gxx0000002Gd-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalSize": 3,
            "done": true,
            "records": [{"Name": "Gamma"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);

    let raw = client.query("SELECT Name FROM Account").await.unwrap();
    assert!(raw.contains("\"nextRecordsUrl\""));

    let all: Vec<Account> = client.query_all("SELECT Name FROM Account").await.unwrap();
    let names: Vec<&str> = all.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
}

#[tokio::test]
async fn test_expired_session_is_refreshed_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response(&server, "00Dexpired"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_response(&server, "00Dfresh"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ACCOUNT))
        .and(header("Authorization", "Bearer 00Dexpired"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!([{
            "message": "Session expired or invalid",
            "errorCode": "INVALID_SESSION_ID"
        }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ACCOUNT))
        .and(header("Authorization", "Bearer 00Dfresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"Id": "001xyz"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let body = client.read("Account", "001xyz").await.unwrap();

    assert_eq!(body, r#"{"Id":"001xyz"}"#);
    assert_eq!(client.last_status(), 200);
}

#[tokio::test]
async fn test_unauthorized_after_refresh_is_returned() {
    let server = MockServer::start().await;
    mount_token(&server, "00Drevoked", 2).await;

    Mock::given(method("GET"))
        .and(path(ACCOUNT))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!([{
            "message": "Session expired or invalid",
            "errorCode": "INVALID_SESSION_ID"
        }])))
        .expect(2)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let err = client.read("Account", "001xyz").await.unwrap_err();

    assert_eq!(client.last_status(), 401);
    match err.kind {
        ErrorKind::UnauthorizedRetryExhausted { attempts, body } => {
            assert_eq!(attempts, 1);
            assert!(body.contains("INVALID_SESSION_ID"));
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
}
