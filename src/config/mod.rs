//! Configuration types for the Deezer Pipe GraphQL client.
//!
//! This module provides the core configuration types used to initialize
//! the client for communication with the Pipe API.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`DeezerConfig`]: The main configuration struct holding endpoint and
//!   refresh settings
//! - [`DeezerConfigBuilder`]: A builder for constructing [`DeezerConfig`]
//!   instances
//! - [`Arl`]: The validated session credential newtype with masked debug output
//! - [`EndpointUrl`]: A validated endpoint URL
//!
//! # Example
//!
//! ```rust
//! use deezer_gql::{DeezerConfig, EndpointUrl};
//! use std::time::Duration;
//!
//! // Defaults point at the production endpoints with a 30 second margin
//! let config = DeezerConfig::default();
//! assert_eq!(config.refresh_margin(), Duration::from_secs(30));
//!
//! // Everything is overridable
//! let config = DeezerConfig::builder()
//!     .pipe_url(EndpointUrl::new("https://pipe.staging.example.com/api").unwrap())
//!     .refresh_margin(Duration::from_secs(60))
//!     .build();
//! ```

mod newtypes;

pub use newtypes::{Arl, EndpointUrl};

use std::time::Duration;

/// Default auth endpoint: exchanges the ARL cookie for a JWT.
pub const DEFAULT_AUTH_URL: &str = "https://auth.deezer.com/login/arl";

/// Default GraphQL endpoint.
pub const DEFAULT_PIPE_URL: &str = "https://pipe.deezer.com/api";

/// Default safety margin before token expiry at which a refresh is triggered.
///
/// The 30 second value (like the ~6 minute token TTL) is an empirically
/// observed property of the upstream service, not a protocol guarantee,
/// which is why it is configuration rather than a constant baked into the
/// transport.
pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(30);

/// Configuration for the Deezer Pipe GraphQL client.
///
/// This struct holds the endpoint URLs and token refresh settings. The ARL
/// itself is not part of the configuration; it is supplied to
/// [`PipeClient::new`](crate::PipeClient::new) at construction.
///
/// # Thread Safety
///
/// `DeezerConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use deezer_gql::DeezerConfig;
///
/// let config = DeezerConfig::default();
/// assert_eq!(config.auth_url().as_ref(), "https://auth.deezer.com/login/arl");
/// assert_eq!(config.pipe_url().as_ref(), "https://pipe.deezer.com/api");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeezerConfig {
    auth_url: EndpointUrl,
    pipe_url: EndpointUrl,
    refresh_margin: Duration,
    user_agent_prefix: Option<String>,
}

impl DeezerConfig {
    /// Creates a new builder for constructing a `DeezerConfig`.
    #[must_use]
    pub fn builder() -> DeezerConfigBuilder {
        DeezerConfigBuilder::new()
    }

    /// Returns the auth endpoint URL.
    #[must_use]
    pub const fn auth_url(&self) -> &EndpointUrl {
        &self.auth_url
    }

    /// Returns the GraphQL endpoint URL.
    #[must_use]
    pub const fn pipe_url(&self) -> &EndpointUrl {
        &self.pipe_url
    }

    /// Returns the refresh safety margin.
    ///
    /// A cached token is considered valid only while `now < expiry - margin`.
    #[must_use]
    pub const fn refresh_margin(&self) -> Duration {
        self.refresh_margin
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for DeezerConfig {
    fn default() -> Self {
        DeezerConfigBuilder::new().build()
    }
}

// Verify DeezerConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DeezerConfig>();
};

/// Builder for constructing [`DeezerConfig`] instances.
///
/// All fields have production defaults, so `build()` is infallible.
///
/// # Defaults
///
/// - `auth_url`: [`DEFAULT_AUTH_URL`]
/// - `pipe_url`: [`DEFAULT_PIPE_URL`]
/// - `refresh_margin`: [`DEFAULT_REFRESH_MARGIN`] (30 seconds)
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use deezer_gql::{DeezerConfig, EndpointUrl};
/// use std::time::Duration;
///
/// let config = DeezerConfig::builder()
///     .auth_url(EndpointUrl::new("http://localhost:8080/login/arl").unwrap())
///     .pipe_url(EndpointUrl::new("http://localhost:8080/api").unwrap())
///     .refresh_margin(Duration::from_secs(5))
///     .user_agent_prefix("MyApp/1.0")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct DeezerConfigBuilder {
    auth_url: Option<EndpointUrl>,
    pipe_url: Option<EndpointUrl>,
    refresh_margin: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl DeezerConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the auth endpoint URL.
    #[must_use]
    pub fn auth_url(mut self, url: EndpointUrl) -> Self {
        self.auth_url = Some(url);
        self
    }

    /// Sets the GraphQL endpoint URL.
    #[must_use]
    pub fn pipe_url(mut self, url: EndpointUrl) -> Self {
        self.pipe_url = Some(url);
        self
    }

    /// Sets the refresh safety margin.
    #[must_use]
    pub const fn refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = Some(margin);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`DeezerConfig`].
    ///
    /// # Panics
    ///
    /// Never panics: the default endpoint constants are valid URLs.
    #[must_use]
    pub fn build(self) -> DeezerConfig {
        let auth_url = self.auth_url.unwrap_or_else(|| {
            EndpointUrl::new(DEFAULT_AUTH_URL).expect("default auth URL is valid")
        });
        let pipe_url = self.pipe_url.unwrap_or_else(|| {
            EndpointUrl::new(DEFAULT_PIPE_URL).expect("default pipe URL is valid")
        });

        DeezerConfig {
            auth_url,
            pipe_url,
            refresh_margin: self.refresh_margin.unwrap_or(DEFAULT_REFRESH_MARGIN),
            user_agent_prefix: self.user_agent_prefix,
        }
    }
}
