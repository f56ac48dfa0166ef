//! Error types for the auth-refreshing GraphQL transport.
//!
//! This module contains the four failure categories every call can surface:
//!
//! - [`GraphqlError::Http`]: non-success status from either endpoint,
//!   carrying the status code and response body text
//! - [`GraphqlError::InvalidResponse`]: a body that is not parsable JSON or
//!   lacks the fields the protocol requires (`jwt` for auth, `data`/`errors`
//!   for GraphQL)
//! - [`GraphqlError::Graphql`]: the remote API reported one or more
//!   application-level errors despite a successful HTTP exchange; all
//!   entries are preserved in order
//! - [`GraphqlError::Network`]: a connection failure reaching either
//!   endpoint, propagated from the HTTP layer unchanged
//!
//! The transport performs zero automatic retries and zero silent error
//! suppression; every failure is raised as a distinct, inspectable condition.
//!
//! # Example
//!
//! ```rust,ignore
//! use deezer_gql::{GraphqlError, PipeClient};
//!
//! match client.run("{ me { id } }", None).await {
//!     Ok(data) => println!("data: {data}"),
//!     Err(GraphqlError::Http(e)) => println!("HTTP {}: {}", e.code, e.body),
//!     Err(GraphqlError::Graphql(e)) => {
//!         for entry in &e.errors {
//!             println!("GraphQL error: {}", entry.message);
//!         }
//!     }
//!     Err(GraphqlError::InvalidResponse(e)) => println!("bad response: {e}"),
//!     Err(GraphqlError::Network(e)) => println!("network: {e}"),
//! }
//! ```

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Error returned when an endpoint responds with a non-success status.
///
/// Raised for both the auth endpoint and the GraphQL endpoint. The body is
/// carried as text, not parsed; many upstream failure pages are not JSON.
#[derive(Debug, Error)]
#[error("HTTP {code}: {body}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body text.
    pub body: String,
}

/// Error returned when a response body does not match the protocol.
///
/// Covers unparsable JSON, an auth body without a `jwt` field, a GraphQL
/// body with neither `data` nor `errors`, and a token whose payload cannot
/// be decoded.
#[derive(Debug, Error)]
#[error("Invalid response: {reason}")]
pub struct InvalidResponseError {
    /// Human-readable description of what was missing or malformed.
    pub reason: String,
}

impl InvalidResponseError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A position in the query document attached to a GraphQL error entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorLocation {
    /// 1-based line in the query document.
    pub line: u32,
    /// 1-based column in the query document.
    pub column: u32,
}

/// One entry from a GraphQL response's `errors` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphqlErrorEntry {
    /// The error message reported by the server.
    pub message: String,
    /// Positions in the query document, when the server reports them.
    #[serde(default)]
    pub locations: Option<Vec<ErrorLocation>>,
    /// Path to the response field the error applies to, when reported.
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
}

/// Error returned when the server reports GraphQL-level errors.
///
/// The HTTP exchange succeeded, but the response carried a non-empty
/// `errors` list. All entries are surfaced together in the order the server
/// reported them, never just the first.
#[derive(Debug, Error)]
pub struct GraphqlMultiError {
    /// The ordered list of error entries from the response.
    pub errors: Vec<GraphqlErrorEntry>,
    /// The (possibly null or partial) `data` value that accompanied the errors.
    pub data: Option<serde_json::Value>,
}

impl fmt::Display for GraphqlMultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphQL errors ({}): ", self.errors.len())?;
        for (i, entry) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            f.write_str(&entry.message)?;
        }
        Ok(())
    }
}

/// Unified error type for all transport operations.
///
/// Use pattern matching to handle specific failure categories.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// Non-success HTTP status from either endpoint.
    #[error(transparent)]
    Http(#[from] HttpResponseError),

    /// The response body did not match the protocol.
    #[error(transparent)]
    InvalidResponse(#[from] InvalidResponseError),

    /// The server reported application-level GraphQL errors.
    #[error(transparent)]
    Graphql(#[from] GraphqlMultiError),

    /// Network or connection error, propagated unchanged.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl From<crate::auth::TokenError> for GraphqlError {
    fn from(err: crate::auth::TokenError) -> Self {
        Self::InvalidResponse(InvalidResponseError::new(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_carries_status_and_body() {
        let error = HttpResponseError {
            code: 500,
            body: "Internal Server Error".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 500: Internal Server Error");
    }

    #[test]
    fn test_invalid_response_error_message() {
        let error = InvalidResponseError::new("body is not valid JSON");
        assert_eq!(error.to_string(), "Invalid response: body is not valid JSON");
    }

    #[test]
    fn test_multi_error_preserves_order_in_display() {
        let error = GraphqlMultiError {
            errors: vec![
                GraphqlErrorEntry {
                    message: "Track not found".to_string(),
                    locations: Some(vec![ErrorLocation { line: 1, column: 1 }]),
                    path: None,
                },
                GraphqlErrorEntry {
                    message: "Unauthorized".to_string(),
                    locations: None,
                    path: None,
                },
            ],
            data: None,
        };

        let message = error.to_string();
        assert_eq!(
            message,
            "GraphQL errors (2): Track not found; Unauthorized"
        );
        let first = message.find("Track not found").unwrap();
        let second = message.find("Unauthorized").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_error_entry_deserializes_with_optional_fields() {
        let entry: GraphqlErrorEntry = serde_json::from_str(
            r#"{"message": "Track not found", "locations": [{"line": 1, "column": 1}]}"#,
        )
        .unwrap();
        assert_eq!(entry.message, "Track not found");
        assert_eq!(
            entry.locations,
            Some(vec![ErrorLocation { line: 1, column: 1 }])
        );
        assert!(entry.path.is_none());

        let bare: GraphqlErrorEntry =
            serde_json::from_str(r#"{"message": "Unauthorized"}"#).unwrap();
        assert!(bare.locations.is_none());
    }

    #[test]
    fn test_token_error_maps_to_invalid_response() {
        let token_error = crate::auth::AccessToken::parse("not-a-jwt").unwrap_err();
        let error: GraphqlError = token_error.into();
        assert!(matches!(error, GraphqlError::InvalidResponse(_)));
    }

    #[test]
    fn test_all_error_variants_implement_std_error() {
        let _: &dyn std::error::Error = &GraphqlError::Http(HttpResponseError {
            code: 400,
            body: "test".to_string(),
        });
        let _: &dyn std::error::Error =
            &GraphqlError::InvalidResponse(InvalidResponseError::new("test"));
    }
}
