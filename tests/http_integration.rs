//! Integration tests for the Messente client.
//!
//! These tests run the real reqwest transport against mock primary/backup hosts.

use messente::{
    ApiEndpoint, Credentials, ErrorFamily, KnownErrorCode, MessenteClient, MessenteError,
    ProtocolError, SendSms,
};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(primary: &MockServer, backup: &MockServer) -> MessenteClient {
    MessenteClient::builder(Credentials::new("user", "pass").unwrap())
        .primary_url(primary.uri())
        .backup_url(backup.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn send_hits_primary_with_query_params() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send_sms/"))
        .and(query_param("username", "user"))
        .and(query_param("password", "pass"))
        .and(query_param("text", "hello world"))
        .and(query_param("to", "+15550001111"))
        .and(query_param_is_missing("from"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK abc123"))
        .expect(1)
        .mount(&primary)
        .await;

    let client = client_for(&primary, &backup);
    let id = client
        .send(SendSms::new("hello world", "+15550001111"))
        .await
        .unwrap();

    assert_eq!(id.as_str(), "abc123");
}

#[tokio::test]
async fn send_includes_sender_name_when_given() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send_sms/"))
        .and(query_param("from", "Acme"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK id-with-sender"))
        .expect(1)
        .mount(&primary)
        .await;

    let client = client_for(&primary, &backup);
    let id = client
        .send_text("hi", "+15550001111", Some("Acme"))
        .await
        .unwrap();

    assert_eq!(id.as_str(), "id-with-sender");
}

#[tokio::test]
async fn backup_flag_switches_host_between_calls() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get_dlr_response/"))
        .and(query_param("sms_unique_id", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK SENT"))
        .expect(1)
        .mount(&primary)
        .await;
    Mock::given(method("GET"))
        .and(path("/get_dlr_response/"))
        .and(query_param("sms_unique_id", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK DELIVERED"))
        .expect(1)
        .mount(&backup)
        .await;

    let mut client = client_for(&primary, &backup);

    let status = client.get_status_of("abc123").await.unwrap();
    assert_eq!(status.as_str(), "SENT");

    client.set_use_backup_api(true);
    let status = client.get_status_of("abc123").await.unwrap();
    assert_eq!(status.as_str(), "DELIVERED");
    assert!(status.is_delivered());
}

#[tokio::test]
async fn backup_endpoint_from_builder_is_used_for_send() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send_sms/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK from-backup"))
        .expect(1)
        .mount(&backup)
        .await;

    let client = MessenteClient::builder(Credentials::new("user", "pass").unwrap())
        .primary_url(primary.uri())
        .backup_url(backup.uri())
        .endpoint(ApiEndpoint::Backup)
        .build()
        .unwrap();

    let id = client.send(SendSms::new("hi", "1")).await.unwrap();
    assert_eq!(id.as_str(), "from-backup");
}

#[tokio::test]
async fn server_failure_is_retryable_and_suggests_backup() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send_sms/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("FAILURE 209"))
        .mount(&primary)
        .await;

    let client = client_for(&primary, &backup);
    let err = client.send(SendSms::new("hi", "1")).await.unwrap_err();

    assert!(err.is_retryable());
    let api = err.api_error().expect("api error");
    assert_eq!(api.family(), ErrorFamily::Failure);
    assert_eq!(api.known(), Some(KnownErrorCode::ServerFailure));
    assert!(api.suggests_backup());
}

#[tokio::test]
async fn unknown_message_id_is_a_hard_error() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get_dlr_response/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ERROR 107"))
        .mount(&primary)
        .await;

    let client = client_for(&primary, &backup);
    let err = client.get_status_of("missing").await.unwrap_err();

    assert!(!err.is_retryable());
    assert_eq!(
        err.api_error().map(|api| api.code().as_str()),
        Some("ERROR 107")
    );
}

#[tokio::test]
async fn malformed_body_is_reported_verbatim() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send_sms/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&primary)
        .await;

    let client = client_for(&primary, &backup);
    let err = client.send(SendSms::new("hi", "1")).await.unwrap_err();

    match err {
        MessenteError::Protocol(ProtocolError::InvalidResponse { body }) => {
            assert_eq!(body, "<html>maintenance</html>");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_success_status_is_a_transport_level_error() {
    let primary = MockServer::start().await;
    let backup = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send_sms/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&primary)
        .await;

    let client = client_for(&primary, &backup);
    let err = client.send(SendSms::new("hi", "1")).await.unwrap_err();

    match err {
        MessenteError::HttpStatus { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body.as_deref(), Some("bad gateway"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let client = MessenteClient::builder(Credentials::new("user", "pass").unwrap())
        .primary_url("http://127.0.0.1:1")
        .build()
        .unwrap();

    let err = client.send(SendSms::new("hi", "1")).await.unwrap_err();
    assert!(matches!(err, MessenteError::Transport(_)));
}
