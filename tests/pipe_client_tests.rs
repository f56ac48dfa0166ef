//! Integration tests for the auth-refreshing GraphQL transport.
//!
//! These tests run the client against mock auth and GraphQL servers and
//! verify the token lifecycle end to end:
//! - First call acquires a token, later calls reuse it
//! - A token within the refresh margin is replaced before the GraphQL call
//! - The ARL only ever travels as a cookie to the auth endpoint
//! - Every response-triage outcome maps to the right error variant

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use deezer_gql::{Arl, DeezerConfig, EndpointUrl, GraphqlError, PipeClient};

const TEST_ARL: &str = "test-arl-credential";

/// Builds a three-segment token whose payload carries the given expiry.
fn jwt_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"ES256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp": {exp}}}"#));
    format!("{header}.{payload}.test-signature")
}

/// Builds a client pointed at separate mock auth and GraphQL servers.
fn test_client(auth_server: &MockServer, pipe_server: &MockServer) -> PipeClient {
    let config = DeezerConfig::builder()
        .auth_url(EndpointUrl::new(format!("{}/login/arl", auth_server.uri())).unwrap())
        .pipe_url(EndpointUrl::new(format!("{}/api", pipe_server.uri())).unwrap())
        .build();
    PipeClient::with_config(Arl::new(TEST_ARL).unwrap(), config)
}

/// Mounts an auth mock that returns a token valid for six minutes.
///
/// The body is labeled `text/plain` the way the real endpoint labels it.
async fn mount_auth(server: &MockServer, expected_calls: u64) {
    let jwt = jwt_with_exp(Utc::now().timestamp() + 360);
    Mock::given(method("POST"))
        .and(path("/login/arl"))
        .and(header("cookie", format!("arl={TEST_ARL}").as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(json!({ "jwt": jwt }).to_string())
                .insert_header("content-type", "text/plain;charset=UTF-8"),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mounts a GraphQL mock answering with the given `data` payload.
async fn mount_graphql(server: &MockServer, data: serde_json::Value, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// ============================================================================
// Token Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_first_execute_acquires_token_then_queries() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    mount_auth(&auth_server, 1).await;
    mount_graphql(&pipe_server, json!({"me": {"id": "42"}}), 1).await;

    let client = test_client(&auth_server, &pipe_server);
    assert!(client.cached_token().await.is_none());

    let data = client.run("query GetMe { me { id } }", None).await.unwrap();

    assert_eq!(data, json!({"me": {"id": "42"}}));
    assert!(client.cached_token().await.is_some());
}

#[tokio::test]
async fn test_valid_cached_token_skips_auth() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    // Exactly one auth round trip despite two queries
    mount_auth(&auth_server, 1).await;
    mount_graphql(&pipe_server, json!({"me": {"id": "42"}}), 2).await;

    let client = test_client(&auth_server, &pipe_server);
    client.run("query GetMe { me { id } }", None).await.unwrap();
    client.run("query GetMe { me { id } }", None).await.unwrap();
}

#[tokio::test]
async fn test_token_within_margin_is_refreshed_before_use() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    // Tokens expire 10s out; with the default 30s margin every call refreshes
    let jwt = jwt_with_exp(Utc::now().timestamp() + 10);
    Mock::given(method("POST"))
        .and(path("/login/arl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(json!({ "jwt": jwt }).to_string()),
        )
        .expect(2)
        .mount(&auth_server)
        .await;
    mount_graphql(&pipe_server, json!({"ok": true}), 2).await;

    let client = test_client(&auth_server, &pipe_server);
    client.run("{ ok }", None).await.unwrap();
    client.run("{ ok }", None).await.unwrap();
}

#[tokio::test]
async fn test_margin_is_tunable_through_config() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    // 120s of validity is fine under a zero margin, so one auth call serves
    // both queries
    let jwt = jwt_with_exp(Utc::now().timestamp() + 120);
    Mock::given(method("POST"))
        .and(path("/login/arl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(json!({ "jwt": jwt }).to_string()),
        )
        .expect(1)
        .mount(&auth_server)
        .await;
    mount_graphql(&pipe_server, json!({"ok": true}), 2).await;

    let config = DeezerConfig::builder()
        .auth_url(EndpointUrl::new(format!("{}/login/arl", auth_server.uri())).unwrap())
        .pipe_url(EndpointUrl::new(format!("{}/api", pipe_server.uri())).unwrap())
        .refresh_margin(Duration::from_secs(0))
        .build();
    let client = PipeClient::with_config(Arl::new(TEST_ARL).unwrap(), config);

    client.run("{ ok }", None).await.unwrap();
    client.run("{ ok }", None).await.unwrap();
}

#[tokio::test]
async fn test_cached_expiry_matches_token_payload() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    let exp = Utc::now().timestamp() + 360;
    Mock::given(method("POST"))
        .and(path("/login/arl"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(json!({ "jwt": jwt_with_exp(exp) }).to_string()),
        )
        .mount(&auth_server)
        .await;
    mount_graphql(&pipe_server, json!({"ok": true}), 1).await;

    let client = test_client(&auth_server, &pipe_server);
    client.run("{ ok }", None).await.unwrap();

    let token = client.cached_token().await.unwrap();
    assert_eq!(token.expires_at().timestamp(), exp);
}

#[tokio::test]
async fn test_concurrent_calls_share_a_single_refresh() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    mount_auth(&auth_server, 1).await;
    mount_graphql(&pipe_server, json!({"ok": true}), 2).await;

    let client = test_client(&auth_server, &pipe_server);
    let (first, second) = tokio::join!(client.run("{ ok }", None), client.run("{ ok }", None));

    first.unwrap();
    second.unwrap();
}

// ============================================================================
// Credential Handling Tests
// ============================================================================

#[tokio::test]
async fn test_arl_travels_only_as_cookie_to_auth_endpoint() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    mount_auth(&auth_server, 1).await;

    // Poison mocks: any GraphQL request carrying a cookie or the credential
    // in its body must never match
    Mock::given(method("POST"))
        .and(path("/api"))
        .and(header_exists("cookie"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&pipe_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .and(body_string_contains(TEST_ARL))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&pipe_server)
        .await;
    mount_graphql(&pipe_server, json!({"ok": true}), 1).await;

    let client = test_client(&auth_server, &pipe_server);
    client.run("{ ok }", None).await.unwrap();
}

#[tokio::test]
async fn test_graphql_request_carries_bearer_token() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    let jwt = jwt_with_exp(Utc::now().timestamp() + 360);
    Mock::given(method("POST"))
        .and(path("/login/arl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(json!({ "jwt": jwt }).to_string()),
        )
        .mount(&auth_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .and(header("authorization", format!("Bearer {jwt}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
        .expect(1)
        .mount(&pipe_server)
        .await;

    let client = test_client(&auth_server, &pipe_server);
    client.run("{ ok }", None).await.unwrap();
}

#[tokio::test]
async fn test_request_body_carries_query_variables_and_operation_name() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    mount_auth(&auth_server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .and(body_partial_json(json!({
            "query": "query GetTrack($trackId: String!) { track(trackId: $trackId) { id } }",
            "variables": {"trackId": "3135556"},
            "operationName": "GetTrack",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"track": {"id": "3135556"}}})),
        )
        .expect(1)
        .mount(&pipe_server)
        .await;

    let client = test_client(&auth_server, &pipe_server);
    let response = client
        .execute(
            "query GetTrack($trackId: String!) { track(trackId: $trackId) { id } }",
            Some(json!({"trackId": "3135556"})),
            Some("GetTrack"),
        )
        .await
        .unwrap();

    assert!(response.is_ok());
}

// ============================================================================
// Auth Failure Tests
// ============================================================================

#[tokio::test]
async fn test_auth_rejection_surfaces_status_and_body() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/arl"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Invalid ARL"))
        .mount(&auth_server)
        .await;

    let client = test_client(&auth_server, &pipe_server);
    let result = client.run("{ ok }", None).await;

    match result {
        Err(GraphqlError::Http(error)) => {
            assert_eq!(error.code, 403);
            assert_eq!(error.body, "Invalid ARL");
        }
        other => panic!("expected an HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_auth_response_without_jwt_field_is_invalid() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/arl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "wrong-key"})))
        .mount(&auth_server)
        .await;

    let client = test_client(&auth_server, &pipe_server);
    let result = client.run("{ ok }", None).await;

    assert!(matches!(result, Err(GraphqlError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_auth_response_with_undecodable_token_is_invalid() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/arl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"jwt": "not-a-three-segment-token"})),
        )
        .mount(&auth_server)
        .await;

    let client = test_client(&auth_server, &pipe_server);
    let result = client.run("{ ok }", None).await;

    assert!(matches!(result, Err(GraphqlError::InvalidResponse(_))));
}

// ============================================================================
// Response Triage Tests
// ============================================================================

#[tokio::test]
async fn test_graphql_http_error_surfaces_status() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    mount_auth(&auth_server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&pipe_server)
        .await;

    let client = test_client(&auth_server, &pipe_server);
    let result = client.run("{ ok }", None).await;

    match result {
        Err(GraphqlError::Http(error)) => assert_eq!(error.code, 500),
        other => panic!("expected an HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_graphql_errors_surface_all_entries_in_order() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    mount_auth(&auth_server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [
                {"message": "Cannot query field 'nope'", "locations": [{"line": 1, "column": 9}]},
                {"message": "Variable '$id' is not defined"},
            ]
        })))
        .mount(&pipe_server)
        .await;

    let client = test_client(&auth_server, &pipe_server);
    let result = client.run("query Broken { nope }", None).await;

    match result {
        Err(GraphqlError::Graphql(multi)) => {
            assert_eq!(multi.errors.len(), 2);
            assert_eq!(multi.errors[0].message, "Cannot query field 'nope'");
            assert_eq!(multi.errors[1].message, "Variable '$id' is not defined");
            let locations = multi.errors[0].locations.as_ref().unwrap();
            assert_eq!(locations[0].line, 1);
            assert_eq!(locations[0].column, 9);
        }
        other => panic!("expected a GraphQL multi-error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_body_is_invalid_response() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    mount_auth(&auth_server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&pipe_server)
        .await;

    let client = test_client(&auth_server, &pipe_server);
    let result = client.run("{ ok }", None).await;

    assert!(matches!(result, Err(GraphqlError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_body_without_data_or_errors_is_invalid_response() {
    let auth_server = MockServer::start().await;
    let pipe_server = MockServer::start().await;
    mount_auth(&auth_server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"something": "unexpected"})))
        .mount(&pipe_server)
        .await;

    let client = test_client(&auth_server, &pipe_server);
    let result = client.run("{ ok }", None).await;

    assert!(matches!(result, Err(GraphqlError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_network_failure_propagates_as_transport_error() {
    // Builder-started servers are not pooled, so dropping them actually
    // closes their listeners; pooled `MockServer::start()` servers keep
    // answering (with 404) after the handle is dropped.
    let auth_server = MockServer::builder().start().await;
    let pipe_server = MockServer::builder().start().await;
    let client = test_client(&auth_server, &pipe_server);
    // Dropping the servers frees their ports before the client connects
    drop(auth_server);
    drop(pipe_server);

    let result = client.run("{ ok }", None).await;

    assert!(matches!(result, Err(GraphqlError::Network(_))));
}
