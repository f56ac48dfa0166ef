//! Authentication types for the Pipe API.
//!
//! The Pipe API authenticates with a short-lived JWT obtained by exchanging
//! the long-lived ARL cookie at a dedicated auth endpoint. This module holds
//! the token model; the exchange itself lives in the transport
//! ([`PipeClient::ensure_token`](crate::PipeClient::ensure_token)).

mod token;

pub use token::{AccessToken, TokenError};
