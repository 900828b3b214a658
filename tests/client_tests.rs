//! Integration tests for the CrmClient using mockito for HTTP mocking.

use crm_llm_tools::{Backend, BackendCall, Config, CrmApiError, CrmClient};
use mockito::{Matcher, Server};
use serde_json::json;

fn client_for(server: &Server) -> CrmClient {
    CrmClient::new(&Config::new(server.url()).with_api_key("test-api-key"))
}

#[test]
fn test_get_with_query_and_bearer() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/contacts")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "20".into()),
            Matcher::UrlEncoded("tags".into(), "founder,vc".into()),
        ]))
        .match_header("authorization", "Bearer test-api-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"contacts": [{"id": "c1", "first_name": "Ada"}]}"#)
        .create();

    let client = client_for(&server);
    let query = vec![
        ("limit".to_string(), "20".to_string()),
        ("tags".to_string(), "founder,vc".to_string()),
    ];
    let result = client.get("/api/contacts", &query).unwrap();

    mock.assert();
    assert_eq!(result["contacts"][0]["id"], "c1");
    assert_eq!(client.metrics().http_requests_total(), 1);
}

#[test]
fn test_no_authorization_without_key() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/analytics/contacts")
        .match_query(Matcher::UrlEncoded("time_range".into(), "30d".into()))
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"total": 12}"#)
        .create();

    let client = CrmClient::new(&Config::new(server.url()));
    let call = BackendCall::get("/api/analytics/contacts").query("time_range", "30d");
    let result = client.execute(&call).unwrap();

    mock.assert();
    assert_eq!(result, json!({"total": 12}));
}

#[test]
fn test_post_sends_json_body() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/api/contacts")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "status": "lead"
        })))
        .with_status(201)
        .with_body(r#"{"id": "c-new"}"#)
        .create();

    let client = client_for(&server);
    let result = client
        .post(
            "/api/contacts",
            &json!({"first_name": "Ada", "last_name": "Lovelace", "status": "lead"}),
        )
        .unwrap();

    mock.assert();
    assert_eq!(result["id"], "c-new");
}

#[test]
fn test_patch_and_delete() {
    let mut server = Server::new();

    let patch = server
        .mock("PATCH", "/api/contacts/c1")
        .match_body(Matcher::Json(json!({"status": "customer"})))
        .with_status(200)
        .with_body(r#"{"id": "c1", "status": "customer"}"#)
        .create();
    let delete = server
        .mock("DELETE", "/api/contacts/c1")
        .with_status(204)
        .create();

    let client = client_for(&server);
    let updated = client
        .patch("/api/contacts/c1", &json!({"status": "customer"}))
        .unwrap();
    let deleted = client.delete("/api/contacts/c1").unwrap();

    patch.assert();
    delete.assert();
    assert_eq!(updated["status"], "customer");
    assert!(deleted.is_null());
}

#[test]
fn test_server_error_keeps_status_and_body() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/contacts/c1")
        .with_status(500)
        .with_body("database unavailable")
        .create();

    let client = client_for(&server);
    let err = client.get("/api/contacts/c1", &[]).unwrap_err();

    mock.assert();
    match err {
        CrmApiError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("database unavailable"));
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
    assert_eq!(client.metrics().http_errors_total(), 1);
}

#[test]
fn test_not_found() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/api/contacts/missing")
        .with_status(404)
        .with_body(r#"{"detail": "not found"}"#)
        .create();

    let client = client_for(&server);
    let err = client.get("/api/contacts/missing", &[]).unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[test]
fn test_empty_object_is_success() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/api/contacts")
        .with_status(200)
        .with_body("{}")
        .create();

    let client = client_for(&server);
    assert_eq!(client.get("/api/contacts", &[]).unwrap(), json!({}));
}

#[test]
fn test_invalid_json_body() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/api/contacts")
        .with_status(200)
        .with_body("<html>proxy error</html>")
        .create();

    let client = client_for(&server);
    let err = client.get("/api/contacts", &[]).unwrap_err();
    assert!(matches!(err, CrmApiError::JsonError(_)));
}

#[test]
fn test_connection_failure() {
    // Nothing listens on port 1
    let client = CrmClient::new(&Config::new("http://127.0.0.1:1").with_timeout(2));
    let err = client.get("/api/contacts", &[]).unwrap_err();

    assert!(matches!(
        err,
        CrmApiError::HttpError(_) | CrmApiError::Timeout
    ));
    assert_eq!(err.status(), None);
}
