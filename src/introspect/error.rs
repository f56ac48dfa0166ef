//! Error types for schema introspection.

/// An error produced while fetching or converting an introspection result.
#[derive(Debug, thiserror::Error)]
pub enum IntrospectionError {
    /// The endpoint could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP {0}: {1}")]
    Http(u16, String),

    /// The response body could not be parsed as introspection JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response parsed but does not describe a usable schema.
    #[error("invalid introspection result: {0}")]
    Invalid(String),
}

/// Convenience alias used throughout the introspection module.
pub type Result<T> = std::result::Result<T, IntrospectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            IntrospectionError::Http(502, "bad gateway".into()).to_string(),
            "HTTP 502: bad gateway"
        );
        assert_eq!(
            IntrospectionError::Invalid("no __schema key".into()).to_string(),
            "invalid introspection result: no __schema key"
        );
    }
}
