//! HTTP transport for the Pipe API.
//!
//! This module provides the auth-refreshing GraphQL transport and its
//! supporting types:
//!
//! - [`PipeClient`]: the transport itself (`ensure_token`, `execute`,
//!   `get_data`, `run`)
//! - [`HttpResponse`]: the raw status/headers/body triple `execute` returns
//! - [`GraphqlError`] and friends: the four-way failure taxonomy
//!
//! # Retry Behavior
//!
//! There is none. Every failure is surfaced exactly once; callers own any
//! retry policy.

mod errors;
mod http_response;
mod pipe;

pub use errors::{
    ErrorLocation, GraphqlError, GraphqlErrorEntry, GraphqlMultiError, HttpResponseError,
    InvalidResponseError,
};
pub use http_response::HttpResponse;
pub use pipe::{PipeClient, SDK_VERSION};
