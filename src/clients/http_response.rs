//! Raw HTTP response type returned by [`PipeClient::execute`](crate::PipeClient::execute).
//!
//! The transport hands the raw exchange back to the caller layer;
//! interpreting the body (including GraphQL error triage) is the job of
//! [`PipeClient::get_data`](crate::PipeClient::get_data). The body is kept
//! as text rather than pre-parsed JSON because the upstream endpoints do
//! not always label JSON bodies correctly (the auth endpoint declares
//! `text/plain`), so content-type driven parsing cannot be trusted.

use std::collections::HashMap;

/// A raw HTTP response: status code, headers, and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased, with repeated headers folded into a list.
    pub headers: HashMap<String, Vec<String>>,
    /// The response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new response from its parts.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of the given header, if present.
    ///
    /// Lookup is by lowercased name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Folds a reqwest header map into the lowercased multi-value shape.
    pub(crate) fn collect_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(code: u16) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            vec!["text/plain".to_string()],
        );
        HttpResponse::new(code, headers, r#"{"jwt": "a.b.c"}"#.to_string())
    }

    #[test]
    fn test_is_ok_for_2xx_only() {
        assert!(make_response(200).is_ok());
        assert!(make_response(204).is_ok());
        assert!(!make_response(301).is_ok());
        assert!(!make_response(404).is_ok());
        assert!(!make_response(500).is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = make_response(200);
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("content-type"), Some("text/plain"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_body_is_preserved_verbatim() {
        let response = make_response(200);
        assert_eq!(response.body, r#"{"jwt": "a.b.c"}"#);
    }
}
