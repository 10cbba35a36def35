use mockito::{Matcher, Server};
use serene::ai::rest::RestClient;
use serene::ai::sdk::GenerativeClient;
use serene::ai::{AIRequestClient, ErrorKind};
use serene::errors::AIError;
use serene::Config;
use std::path::PathBuf;

const SUCCESS_BODY: &str =
    r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Be kind "},{"text":"to yourself."}]}}]}"#;

fn config_for(server: &Server) -> Config {
    Config {
        api_key: Some("test-key".to_string()),
        base_url: server.url(),
        api_versions: vec!["v1".to_string()],
        models: vec!["flash".to_string(), "pro".to_string()],
        db_path: PathBuf::from("unused.db"),
    }
}

#[test]
fn test_rest_client_sends_key_as_query_and_joins_parts() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/flash:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJson(serde_json::json!({
            "contents": [{ "parts": [{ "text": "hello" }] }]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SUCCESS_BODY)
        .create();

    let client = RestClient::new(server.url(), Some("test-key".to_string()));
    let text = client.generate("v1beta", "flash", "hello").unwrap();

    assert_eq!(text, "Be kind to yourself.");
    mock.assert();
}

#[test]
fn test_rest_client_error_does_not_leak_key() {
    let mut server = Server::new();
    server
        .mock("POST", "/v1/models/flash:generateContent")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal")
        .create();

    let client = RestClient::new(server.url(), Some("secret-key".to_string()));
    let err = client.generate("v1", "flash", "hello").unwrap_err();

    assert!(matches!(err, AIError::Http { status: 500, .. }));
    assert!(!err.to_string().contains("secret-key"));
}

#[test]
fn test_generative_client_sends_key_header() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/v1/models/pro:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SUCCESS_BODY)
        .create();

    let client = GenerativeClient::new(server.url(), "test-key").unwrap();
    let text = client.generate_content("v1", "pro", "hello").unwrap();

    assert_eq!(text, "Be kind to yourself.");
    mock.assert();
}

#[test]
fn test_generative_client_decodes_error_envelope() {
    let mut server = Server::new();
    server
        .mock("POST", "/v1/models/pro:generateContent")
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
        )
        .create();

    let client = GenerativeClient::new(server.url(), "test-key").unwrap();
    let err = client.generate_content("v1", "pro", "hello").unwrap_err();

    match err {
        AIError::Api { code, status, .. } => {
            assert_eq!(code, 429);
            assert_eq!(status, "RESOURCE_EXHAUSTED");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[test]
fn test_cascade_falls_through_to_http_path() {
    let mut server = Server::new();
    let sdk_flash = server
        .mock("POST", "/v1/models/flash:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .with_status(404)
        .with_body(r#"{"error":{"code":404,"message":"model not found","status":"NOT_FOUND"}}"#)
        .create();
    let sdk_pro = server
        .mock("POST", "/v1/models/pro:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[]}"#)
        .create();
    let rest_flash = server
        .mock("POST", "/v1/models/flash:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SUCCESS_BODY)
        .create();

    let client = AIRequestClient::from_config(&config_for(&server));
    assert!(client.is_available());
    assert_eq!(client.strategies().len(), 4);

    let text = client.generate("hello").unwrap();
    assert_eq!(text, "Be kind to yourself.");

    sdk_flash.assert();
    sdk_pro.assert();
    rest_flash.assert();
}

#[test]
fn test_cascade_exhaustion_reports_last_failure_kind() {
    let mut server = Server::new();
    let sdk = server
        .mock(
            "POST",
            Matcher::Regex(r"^/v1/models/(flash|pro):generateContent$".into()),
        )
        .match_header("x-goog-api-key", "test-key")
        .with_status(503)
        .with_body("Service Unavailable")
        .expect(2)
        .create();
    let rest_flash = server
        .mock("POST", "/v1/models/flash:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(503)
        .with_body("Service Unavailable")
        .create();
    let last = server
        .mock("POST", "/v1/models/pro:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(429)
        .with_body("Too Many Requests")
        .create();

    let client = AIRequestClient::from_config(&config_for(&server));
    let failure = client.generate("hello").unwrap_err();

    assert_eq!(failure.kind, ErrorKind::QuotaExceeded);
    assert_eq!(failure.message, ErrorKind::QuotaExceeded.user_message());
    sdk.assert();
    rest_flash.assert();
    last.assert();
}

#[test]
fn test_unreachable_provider_is_network_error() {
    let config = Config {
        api_key: Some("test-key".to_string()),
        base_url: "http://127.0.0.1:9".to_string(),
        api_versions: vec!["v1".to_string()],
        models: vec!["flash".to_string()],
        db_path: PathBuf::from("unused.db"),
    };

    let client = AIRequestClient::from_config(&config);
    let failure = client.generate("hello").unwrap_err();

    assert_eq!(failure.kind, ErrorKind::NetworkError);
}
