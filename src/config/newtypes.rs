//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear
//! error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated Deezer ARL (the long-lived session credential).
///
/// This newtype ensures the ARL is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `Arl(*****)` instead of the actual credential. The ARL is never included
/// in any error message produced by this crate.
///
/// # Example
///
/// ```rust
/// use deezer_gql::Arl;
///
/// let arl = Arl::new("my-arl-cookie-value").unwrap();
/// assert_eq!(format!("{:?}", arl), "Arl(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Arl(String);

impl Arl {
    /// Creates a new validated ARL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyArl`] if the value is empty.
    pub fn new(arl: impl Into<String>) -> Result<Self, ConfigError> {
        let arl = arl.into();
        if arl.is_empty() {
            return Err(ConfigError::EmptyArl);
        }
        Ok(Self(arl))
    }
}

impl AsRef<str> for Arl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Arl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Arl(*****)")
    }
}

/// A validated endpoint URL.
///
/// This newtype validates that the URL has a scheme and a non-empty host,
/// and provides accessors for both. It is used for the auth and GraphQL
/// endpoints, which live on different hosts and must never be swapped.
///
/// # Example
///
/// ```rust
/// use deezer_gql::EndpointUrl;
///
/// let url = EndpointUrl::new("https://pipe.deezer.com/api").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("pipe.deezer.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl EndpointUrl {
    /// Creates a new validated endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().to_string();

        // Find scheme
        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidEndpointUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidEndpointUrl { url: url.clone() });
        }

        // Find host
        let host_start = scheme_end + 3; // Skip "://"
        if host_start >= url.len() {
            return Err(ConfigError::InvalidEndpointUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        let host = &url[host_start..host_end];
        if host.is_empty() {
            return Err(ConfigError::InvalidEndpointUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
