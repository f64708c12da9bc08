use std::time::Duration;

use super::{envelope, record_json, RECORD_ID, TOKEN, ZONE_ID};
use crate::api::{models::*, CloudflareClient, DnsApiClient};
use crate::config::ApiToken;
use crate::error::Error;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CloudflareClient {
    CloudflareClient::with_base_url(server.uri(), ApiToken::new(TOKEN), Duration::from_secs(5))
        .unwrap()
}

#[tokio::test]
async fn test_list_records_filters_by_type_and_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/zones/{}/dns_records", ZONE_ID)))
        .and(query_param("type", "A"))
        .and(query_param("name", "example.com"))
        .and(header("Authorization", "Bearer test_token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([record_json(RECORD_ID, "1.1.1.1")]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server)
        .list_records(ZONE_ID, "example.com", RecordType::A)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, RECORD_ID);
    assert_eq!(records[0].content, "1.1.1.1");
    assert_eq!(records[0].r#type, RecordType::A);
}

#[tokio::test]
async fn test_get_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/zones/{}/dns_records/{}", ZONE_ID, RECORD_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(record_json(RECORD_ID, "1.1.1.1"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let record = client_for(&server)
        .get_record(ZONE_ID, RECORD_ID)
        .await
        .unwrap();

    assert_eq!(record.name, "example.com");
    assert_eq!(record.ttl, 3600);
    assert!(!record.proxied);
}

#[tokio::test]
async fn test_informational_messages_do_not_fail_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/zones/{}/dns_records/{}", ZONE_ID, RECORD_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": record_json(RECORD_ID, "1.1.1.1"),
            "success": true,
            "errors": [],
            "messages": [{ "code": 10000, "message": "this endpoint is deprecated" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client_for(&server)
        .get_record(ZONE_ID, RECORD_ID)
        .await
        .unwrap();

    assert_eq!(record.content, "1.1.1.1");
}

#[tokio::test]
async fn test_update_record_sends_put_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/zones/{}/dns_records/{}", ZONE_ID, RECORD_ID)))
        .and(header("Authorization", "Bearer test_token"))
        .and(body_json(json!({
            "type": "A",
            "name": "example.com",
            "content": "2.2.2.2",
            "ttl": 120,
            "proxied": false
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(record_json(RECORD_ID, "2.2.2.2"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let update = DnsRecordUpdate {
        r#type: RecordType::A,
        name: "example.com".to_string(),
        content: "2.2.2.2".to_string(),
        ttl: 120,
        proxied: false,
    };
    let record = client_for(&server)
        .update_record(ZONE_ID, RECORD_ID, &update)
        .await
        .unwrap();

    assert_eq!(record.content, "2.2.2.2");
}

#[tokio::test]
async fn test_error_status_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string(
            r#"{"success":false,"errors":[{"code":9109,"message":"Invalid access token"}]}"#,
        ))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_record(ZONE_ID, RECORD_ID)
        .await
        .unwrap_err();

    match &err {
        Error::Api { status, body, .. } => {
            assert_eq!(*status, 403);
            assert!(body.contains("Invalid access token"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("GET "));
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": null,
            "success": false,
            "errors": [{"code": 81044, "message": "Record does not exist."}],
            "messages": []
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_record(ZONE_ID, RECORD_ID)
        .await
        .unwrap_err();

    match err {
        Error::Api { status, body, .. } => {
            assert_eq!(status, 200);
            assert_eq!(body, "Record does not exist. (81044)");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_record(ZONE_ID, RECORD_ID)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_timeout_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(record_json(RECORD_ID, "1.1.1.1")))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = CloudflareClient::with_base_url(
        server.uri(),
        ApiToken::new(TOKEN),
        Duration::from_millis(200),
    )
    .unwrap();
    let err = client.get_record(ZONE_ID, RECORD_ID).await.unwrap_err();

    match err {
        Error::Transport { method, url, .. } => {
            assert_eq!(method, reqwest::Method::GET);
            assert!(url.ends_with(&format!("/zones/{}/dns_records/{}", ZONE_ID, RECORD_ID)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_diagnostics_never_contain_the_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad header: Bearer test_token"))
        .mount(&server)
        .await;

    let token = ApiToken::new(TOKEN);
    let err = client_for(&server)
        .get_record(ZONE_ID, RECORD_ID)
        .await
        .unwrap_err();

    let diagnostic = token.redact(&err.to_string());
    assert!(!diagnostic.contains(TOKEN));
    assert!(diagnostic.contains("Bearer ***"));
}
