//! # Deezer Pipe GraphQL Client
//!
//! A Rust client for the Deezer Pipe GraphQL API, providing type-safe
//! configuration, transparent JWT refresh, and typed query accessors.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`DeezerConfig`] and [`DeezerConfigBuilder`]
//! - A validated, debug-masked newtype for the ARL session credential
//! - An auth-refreshing GraphQL transport via [`PipeClient`]: the long-lived
//!   ARL is exchanged for a short-lived JWT on first use and refreshed
//!   before expiry on every call
//! - Structured GraphQL error triage via [`PipeClient::get_data`]
//! - Typed accessors and response models for the common queries
//!   ([`PipeClient::get_track`], [`PipeClient::search`], ...)
//! - Schema introspection and SDL conversion via [`introspect`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deezer_gql::{Arl, PipeClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let arl = Arl::new(std::env::var("DEEZER_ARL")?)?;
//! let client = PipeClient::new(arl);
//!
//! // Typed accessor: token acquisition happens transparently
//! if let Some(track) = client.get_track("3135556").await? {
//!     println!("{} ({}s)", track.title, track.duration);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Ad-hoc Queries
//!
//! ```rust,no_run
//! use deezer_gql::{Arl, PipeClient};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let client = PipeClient::new(Arl::new("arl")?);
//! let data = client
//!     .run(
//!         "query GetMe { me { id } }",
//!         None,
//!     )
//!     .await?;
//! println!("{data}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure surfaces as a distinct [`GraphqlError`] variant:
//!
//! ```rust,no_run
//! use deezer_gql::{Arl, GraphqlError, PipeClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let client = PipeClient::new(Arl::new("arl")?);
//! match client.run("query Broken { nope }", None).await {
//!     Ok(data) => println!("{data}"),
//!     Err(GraphqlError::Graphql(multi)) => {
//!         for entry in &multi.errors {
//!             eprintln!("server error: {}", entry.message);
//!         }
//!     }
//!     Err(other) => eprintln!("transport failure: {other}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the token cache lives on the client instance
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Thread-safe**: all types are `Send + Sync`; concurrent calls share
//!   one refresh
//! - **Async-first**: designed for the Tokio runtime
//! - **The credential stays private**: the ARL is debug-masked, never
//!   logged, and only ever sent as a cookie to the auth endpoint

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod introspect;
pub mod models;
pub mod queries;

// Re-export public types at crate root for convenience
pub use auth::{AccessToken, TokenError};
pub use config::{
    Arl, DeezerConfig, DeezerConfigBuilder, EndpointUrl, DEFAULT_AUTH_URL, DEFAULT_PIPE_URL,
    DEFAULT_REFRESH_MARGIN,
};
pub use error::ConfigError;

// Re-export transport types
pub use clients::{
    ErrorLocation, GraphqlError, GraphqlErrorEntry, GraphqlMultiError, HttpResponse,
    HttpResponseError, InvalidResponseError, PipeClient, SDK_VERSION,
};
