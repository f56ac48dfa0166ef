//! Access token handling for Pipe API authentication.
//!
//! This module provides the [`AccessToken`] type: a short-lived JWT returned
//! by the auth endpoint, together with the expiry parsed out of its payload
//! segment.
//!
//! # Token Structure
//!
//! The auth endpoint returns a standard three-segment JWT
//! (`header.payload.signature`). The client never verifies the signature;
//! that is the server's job. It only base64url-decodes the middle segment
//! to read the `exp` claim (Unix timestamp, seconds) that drives proactive
//! refresh.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while parsing an access token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token is not a three-segment dot-delimited JWT.
    #[error("Token is not a three-segment JWT.")]
    Malformed,

    /// The payload segment is not valid base64url.
    #[error("Token payload is not valid base64url: {0}")]
    PayloadEncoding(#[from] base64::DecodeError),

    /// The payload segment does not decode to a JSON object with an `exp` field.
    #[error("Token payload is not a valid claims object: {0}")]
    PayloadClaims(#[from] serde_json::Error),

    /// The `exp` claim is not representable as a timestamp.
    #[error("Token expiry timestamp {exp} is out of range.")]
    ExpiryOutOfRange {
        /// The out-of-range `exp` value.
        exp: f64,
    },
}

/// The claims the client cares about. Everything else in the payload is
/// ignored.
#[derive(Debug, Deserialize)]
struct Claims {
    /// Expiration time as a Unix timestamp in seconds (may be fractional).
    exp: f64,
}

/// A short-lived signed token for Pipe API calls, with its parsed expiry.
///
/// Tokens are owned exclusively by the transport's cache and mutated only by
/// the refresh operation. They have no existence before the first call
/// (lazily acquired).
///
/// # Example
///
/// ```rust
/// use deezer_gql::auth::AccessToken;
/// use std::time::Duration;
///
/// // A token whose payload is {"exp": 4102444800} (2100-01-01)
/// let jwt = "eyJhbGciOiJFUzI1NiJ9.eyJleHAiOiA0MTAyNDQ0ODAwfQ.sig";
/// let token = AccessToken::parse(jwt).unwrap();
/// assert!(!token.expires_within(Duration::from_secs(30)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Parses a JWT string, extracting the expiry from its payload segment.
    ///
    /// The payload decode is padding-tolerant: both padded and unpadded
    /// base64url are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] if the token is not a three-segment JWT, the
    /// payload is not base64url, or the decoded payload lacks a usable
    /// `exp` claim.
    pub fn parse(jwt: impl Into<String>) -> Result<Self, TokenError> {
        let jwt = jwt.into();

        let mut segments = jwt.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed);
        };

        let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        let claims: Claims = serde_json::from_slice(&decoded)?;

        let millis = (claims.exp * 1000.0).round();
        if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
            return Err(TokenError::ExpiryOutOfRange { exp: claims.exp });
        }
        #[allow(clippy::cast_possible_truncation)]
        let expires_at = DateTime::<Utc>::from_timestamp_millis(millis as i64)
            .ok_or(TokenError::ExpiryOutOfRange { exp: claims.exp })?;

        Ok(Self {
            token: jwt,
            expires_at,
        })
    }

    /// Returns the raw JWT string for use in an `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Returns the expiry parsed from the token payload.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns `true` if the token expires within the given safety margin.
    ///
    /// The margin boundary is inclusive: a token whose expiry is exactly
    /// `now + margin` counts as expiring and triggers a refresh. A cached
    /// token is valid only while `now < expiry - margin`.
    #[must_use]
    pub fn expires_within(&self, margin: Duration) -> bool {
        let margin = chrono::Duration::from_std(margin).unwrap_or(chrono::Duration::MAX);
        self.expires_at
            .checked_sub_signed(margin)
            .map_or(true, |threshold| Utc::now() >= threshold)
    }
}

// Verify AccessToken is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AccessToken>();
};
