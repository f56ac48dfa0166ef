//! Introspection query execution.
//!
//! The Pipe GraphQL endpoint answers introspection without authentication,
//! so this path deliberately bypasses the token-carrying transport and
//! talks to the endpoint directly.

use std::time::Duration;

use serde_json::Value;

use super::error::{IntrospectionError, Result};
use super::types::IntrospectionSchema;

/// Request timeout for introspection requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection timeout for introspection requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// The standard introspection query, with descriptions.
pub const INTROSPECTION_QUERY: &str = "\
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      ...FullType
    }
    directives {
      name
      description
      locations
      args {
        ...InputValue
      }
    }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args {
      ...InputValue
    }
    type {
      ...TypeRef
    }
    isDeprecated
    deprecationReason
  }
  inputFields {
    ...InputValue
  }
  interfaces {
    ...TypeRef
  }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
  possibleTypes {
    ...TypeRef
  }
}

fragment InputValue on __InputValue {
  name
  description
  type { ...TypeRef }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
              }
            }
          }
        }
      }
    }
  }
}";

/// Executes the introspection query against `url` and returns the parsed
/// schema.
///
/// # Errors
///
/// - [`IntrospectionError::Network`] if the request cannot be sent
/// - [`IntrospectionError::Http`] on a non-success status
/// - [`IntrospectionError::Parse`] if the body is not valid JSON
/// - [`IntrospectionError::Invalid`] if the response reports GraphQL errors
///   or lacks a `__schema` object
#[tracing::instrument]
pub async fn execute_introspection(url: &str) -> Result<IntrospectionSchema> {
    let json = execute_introspection_raw(url).await?;
    let schema = parse_introspection(json)?;
    tracing::info!(types = schema.types.len(), "Introspection successful");
    Ok(schema)
}

/// Executes the introspection query and returns the raw JSON response,
/// the full `{"data": {"__schema": ...}}` document.
///
/// Useful for saving an offline dump in the original response shape.
///
/// # Errors
///
/// Same conditions as [`execute_introspection`], minus the schema-shape
/// parse.
#[tracing::instrument]
pub async fn execute_introspection_raw(url: &str) -> Result<Value> {
    let client = reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(|err| IntrospectionError::Network(format!("failed to create HTTP client: {err}")))?;

    let body = serde_json::json!({ "query": INTROSPECTION_QUERY });

    tracing::info!("Sending introspection query");
    let response = client
        .post(url)
        .json(&body)
        .send()
        .await
        .map_err(|err| IntrospectionError::Network(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(IntrospectionError::Http(status.as_u16(), error_body));
    }

    let json: Value = response
        .json()
        .await
        .map_err(|err| IntrospectionError::Parse(err.to_string()))?;

    if let Some(errors) = json.get("errors") {
        return Err(IntrospectionError::Invalid(format!(
            "introspection reported errors: {errors}"
        )));
    }

    Ok(json)
}

/// Parses an introspection JSON document into the schema model.
///
/// Accepts either `{"__schema": ...}` directly or the full GraphQL response
/// shape `{"data": {"__schema": ...}}`, as found in older dumps.
///
/// # Errors
///
/// [`IntrospectionError::Invalid`] when no `__schema` object is present,
/// [`IntrospectionError::Parse`] when the object does not match the
/// introspection shape.
pub fn parse_introspection(mut document: Value) -> Result<IntrospectionSchema> {
    let wrapped = document
        .get("data")
        .and_then(|data| data.get("__schema"))
        .is_some();
    let inner = if wrapped {
        document["data"].take()
    } else {
        document
    };

    let Some(schema_value) = inner.get("__schema") else {
        return Err(IntrospectionError::Invalid(
            "document contains no '__schema' object".to_string(),
        ));
    };

    serde_json::from_value(schema_value.clone())
        .map_err(|err| IntrospectionError::Parse(err.to_string()))
}
