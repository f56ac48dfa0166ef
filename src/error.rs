//! Error types for client configuration.
//!
//! This module contains error types used for configuration and validation
//! errors raised before any network traffic happens.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use deezer_gql::{Arl, ConfigError};
//!
//! let result = Arl::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyArl)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message. None of the messages ever contain the ARL
/// itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// ARL cannot be empty.
    #[error("ARL cannot be empty. Copy the 'arl' cookie value from an authenticated Deezer web session.")]
    EmptyArl,

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://pipe.deezer.com/api').")]
    InvalidEndpointUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}
