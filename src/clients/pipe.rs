//! The auth-refreshing GraphQL transport.
//!
//! This module provides the [`PipeClient`] type: it owns the session
//! credential (ARL), the cached access token and its expiry, and wraps every
//! outbound GraphQL request with token acquisition/refresh and error
//! translation.

use serde_json::Value;
use tokio::sync::Mutex;

use crate::auth::AccessToken;
use crate::clients::errors::{
    GraphqlError, GraphqlErrorEntry, GraphqlMultiError, HttpResponseError, InvalidResponseError,
};
use crate::clients::http_response::HttpResponse;
use crate::config::{Arl, DeezerConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// GraphQL client for the Deezer Pipe API.
///
/// The client handles:
/// - Lazy JWT acquisition from the auth endpoint (ARL sent as a cookie,
///   only ever to the auth host)
/// - Proactive refresh when the cached token is within the safety margin
///   of its expiry
/// - Bearer-authenticated GraphQL POSTs to the Pipe endpoint
/// - Structured error translation ([`GraphqlError`])
///
/// The token cache is per-instance; there is no ambient or global state.
/// Concurrent calls on the same client coalesce on a single refresh because
/// the cache sits behind an async mutex.
///
/// # Thread Safety
///
/// `PipeClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use deezer_gql::{Arl, PipeClient};
///
/// let client = PipeClient::new(Arl::new("your-arl")?);
///
/// // Low-level: raw response in, data triage out
/// let response = client.execute("{ me { id } }", None, None).await?;
/// let data = PipeClient::get_data(&response)?;
///
/// // Or both steps at once
/// let data = client.run("{ me { id } }", None).await?;
/// ```
#[derive(Debug)]
pub struct PipeClient {
    /// The internal reqwest HTTP client.
    http: reqwest::Client,
    /// The long-lived session credential. Immutable for the client's lifetime.
    arl: Arl,
    /// Endpoint and refresh settings.
    config: DeezerConfig,
    /// The cached short-lived token, absent until first use.
    token: Mutex<Option<AccessToken>>,
}

// Verify PipeClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PipeClient>();
};

impl PipeClient {
    /// Creates a new client for the production endpoints.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(arl: Arl) -> Self {
        Self::with_config(arl, DeezerConfig::default())
    }

    /// Creates a new client with explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created (e.g., TLS
    /// initialization failure, or a user agent prefix that is not a valid
    /// header value).
    #[must_use]
    pub fn with_config(arl: Arl, config: DeezerConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Deezer Pipe GraphQL Client v{SDK_VERSION} | Rust {rust_version}"
        );

        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            arl,
            config,
            token: Mutex::new(None),
        }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &DeezerConfig {
        &self.config
    }

    /// Returns a clone of the cached access token, if one has been acquired.
    pub async fn cached_token(&self) -> Option<AccessToken> {
        self.token.lock().await.clone()
    }

    /// Ensures a currently-valid access token is cached and returns it.
    ///
    /// If no token is cached, or the cached token's expiry is within the
    /// configured safety margin of now, a token-acquisition request is made:
    /// an HTTP POST to the auth endpoint with the ARL as a cookie (never as
    /// a query parameter or body field, and never to the GraphQL host). The
    /// auth endpoint labels its JSON body `text/plain`, so the body is
    /// parsed as JSON regardless of declared content type.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Http`] if the auth endpoint returns a non-success
    ///   status
    /// - [`GraphqlError::InvalidResponse`] if the body cannot be parsed as
    ///   JSON, lacks the `jwt` field, or the token payload is undecodable
    /// - [`GraphqlError::Network`] if the auth endpoint is unreachable
    pub async fn ensure_token(&self) -> Result<String, GraphqlError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_within(self.config.refresh_margin()) {
                tracing::debug!(
                    expires_at = %token.expires_at(),
                    "Cached token is within the refresh margin, refreshing"
                );
            } else {
                return Ok(token.as_str().to_string());
            }
        }

        let token = self.acquire_token().await?;
        let jwt = token.as_str().to_string();
        *cached = Some(token);
        Ok(jwt)
    }

    /// Performs one token-acquisition round trip against the auth endpoint.
    async fn acquire_token(&self) -> Result<AccessToken, GraphqlError> {
        let response = self
            .http
            .post(self.config.auth_url().as_ref())
            .header(
                reqwest::header::COOKIE,
                format!("arl={}", self.arl.as_ref()),
            )
            .send()
            .await?;

        let code = response.status().as_u16();
        let body = response.text().await?;

        if !(200..=299).contains(&code) {
            tracing::warn!(code, "Auth endpoint returned a non-success status");
            return Err(HttpResponseError { code, body }.into());
        }

        // Parsed as JSON no matter what Content-Type claims
        let json: Value = serde_json::from_str(&body).map_err(|_| {
            InvalidResponseError::new("auth response body is not valid JSON")
        })?;
        let jwt = json
            .get("jwt")
            .and_then(Value::as_str)
            .ok_or_else(|| InvalidResponseError::new("auth response is missing the 'jwt' field"))?;

        let token = AccessToken::parse(jwt)?;
        tracing::debug!(expires_at = %token.expires_at(), "Acquired access token");
        Ok(token)
    }

    /// Executes a GraphQL query and returns the raw HTTP response.
    ///
    /// Calls [`ensure_token`](Self::ensure_token), then POSTs
    /// `{query, variables, operationName}` to the GraphQL endpoint with the
    /// token in an `Authorization: Bearer` header. The raw response is
    /// returned for the caller layer to interpret; this method does not
    /// distinguish GraphQL-level errors from success; that is
    /// [`get_data`](Self::get_data)'s job.
    ///
    /// There is no automatic retry and no internal timeout beyond what the
    /// HTTP transport enforces; callers wanting bounded latency should wrap
    /// this call themselves.
    ///
    /// # Errors
    ///
    /// - Any token-acquisition failure from
    ///   [`ensure_token`](Self::ensure_token)
    /// - [`GraphqlError::Network`] if the GraphQL endpoint is unreachable
    pub async fn execute(
        &self,
        query: &str,
        variables: Option<Value>,
        operation_name: Option<&str>,
    ) -> Result<HttpResponse, GraphqlError> {
        let jwt = self.ensure_token().await?;

        let body = serde_json::json!({
            "query": query,
            "variables": variables,
            "operationName": operation_name,
        });

        let response = self
            .http
            .post(self.config.pipe_url().as_ref())
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {jwt}"))
            .json(&body)
            .send()
            .await?;

        let code = response.status().as_u16();
        let headers = HttpResponse::collect_headers(response.headers());
        let text = response.text().await?;

        Ok(HttpResponse::new(code, headers, text))
    }

    /// Interprets a raw GraphQL response, returning the `data` value.
    ///
    /// Triage order:
    /// 1. Non-success status: [`GraphqlError::Http`] with status and body
    /// 2. Body not parsable as a JSON object:
    ///    [`GraphqlError::InvalidResponse`]
    /// 3. Non-empty `errors` list: [`GraphqlError::Graphql`] with every
    ///    entry, order preserved
    /// 4. No `data` key (and no errors): [`GraphqlError::InvalidResponse`]
    /// 5. Otherwise the `data` value, which may legitimately be `null`
    ///
    /// # Errors
    ///
    /// See the triage order above; each failing step maps to the listed
    /// variant.
    pub fn get_data(response: &HttpResponse) -> Result<Value, GraphqlError> {
        if !response.is_ok() {
            return Err(HttpResponseError {
                code: response.code,
                body: response.body.clone(),
            }
            .into());
        }

        let body: Value = serde_json::from_str(&response.body)
            .map_err(|_| InvalidResponseError::new("response body is not valid JSON"))?;
        let Value::Object(mut object) = body else {
            return Err(InvalidResponseError::new("response body is not a JSON object").into());
        };

        let data = object.remove("data");

        if let Some(errors_value) = object.remove("errors") {
            let is_empty = errors_value.as_array().is_some_and(Vec::is_empty);
            if !is_empty {
                let errors: Vec<GraphqlErrorEntry> = serde_json::from_value(errors_value)
                    .map_err(|_| {
                        InvalidResponseError::new("'errors' list entries are malformed")
                    })?;
                return Err(GraphqlMultiError { errors, data }.into());
            }
        }

        data.map_or_else(
            || {
                Err(InvalidResponseError::new(
                    "response contains neither 'data' nor 'errors'",
                )
                .into())
            },
            Ok,
        )
    }

    /// Executes a query and interprets the response in one step.
    ///
    /// Convenience composition of [`execute`](Self::execute) and
    /// [`get_data`](Self::get_data).
    ///
    /// # Errors
    ///
    /// Any error either step can produce.
    pub async fn run(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<Value, GraphqlError> {
        let response = self.execute(query, variables, None).await?;
        Self::get_data(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(code: u16, body: &str) -> HttpResponse {
        HttpResponse::new(code, HashMap::new(), body.to_string())
    }

    #[test]
    fn test_get_data_returns_data_on_success() {
        let resp = response(200, r#"{"data": {"track": {"id": "123", "title": "Test"}}}"#);
        let data = PipeClient::get_data(&resp).unwrap();
        assert_eq!(data["track"]["id"], "123");
        assert_eq!(data["track"]["title"], "Test");
    }

    #[test]
    fn test_get_data_returns_null_data_when_key_present() {
        let resp = response(200, r#"{"data": null}"#);
        let data = PipeClient::get_data(&resp).unwrap();
        assert!(data.is_null());
    }

    #[test]
    fn test_get_data_raises_http_error_on_500() {
        let resp = response(500, "Internal Server Error");
        let err = PipeClient::get_data(&resp).unwrap_err();
        match err {
            GraphqlError::Http(e) => {
                assert_eq!(e.code, 500);
                assert_eq!(e.body, "Internal Server Error");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn test_get_data_raises_http_error_even_for_valid_body() {
        // Status wins over body content
        let resp = response(500, r#"{"data": {"me": {"id": "1"}}}"#);
        assert!(matches!(
            PipeClient::get_data(&resp),
            Err(GraphqlError::Http(_))
        ));
    }

    #[test]
    fn test_get_data_raises_invalid_response_on_non_json() {
        let resp = response(200, "this is not json");
        assert!(matches!(
            PipeClient::get_data(&resp),
            Err(GraphqlError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_get_data_raises_invalid_response_on_missing_keys() {
        let resp = response(200, r#"{"something": "unexpected"}"#);
        assert!(matches!(
            PipeClient::get_data(&resp),
            Err(GraphqlError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_get_data_raises_multi_error_preserving_order() {
        let resp = response(
            200,
            r#"{
                "data": null,
                "errors": [
                    {"message": "Track not found", "locations": [{"line": 1, "column": 1}]},
                    {"message": "Unauthorized"}
                ]
            }"#,
        );

        let err = PipeClient::get_data(&resp).unwrap_err();
        match err {
            GraphqlError::Graphql(e) => {
                assert_eq!(e.errors.len(), 2);
                assert_eq!(e.errors[0].message, "Track not found");
                assert_eq!(e.errors[1].message, "Unauthorized");
                assert!(e.errors[0].locations.is_some());
            }
            other => panic!("expected Graphql error, got {other:?}"),
        }
    }

    #[test]
    fn test_get_data_treats_empty_errors_list_as_success() {
        let resp = response(200, r#"{"data": {"me": null}, "errors": []}"#);
        let data = PipeClient::get_data(&resp).unwrap();
        assert!(data["me"].is_null());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PipeClient>();
    }

    #[test]
    fn test_client_construction_with_default_config() {
        let client = PipeClient::new(Arl::new("test-arl").unwrap());
        assert_eq!(
            client.config().pipe_url().as_ref(),
            "https://pipe.deezer.com/api"
        );
    }
}
