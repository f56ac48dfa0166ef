//! Schema introspection and SDL conversion.
//!
//! The Pipe API's schema is discovered over standard GraphQL introspection,
//! which the endpoint answers without authentication. This module fetches
//! or parses an introspection result, repairs the gaps the endpoint is
//! known to leave ([`patch_schema`]), and renders SDL
//! ([`introspection_to_sdl`]) for downstream tooling.
//!
//! # Example
//!
//! ```no_run
//! use deezer_gql::introspect::{execute_introspection, introspection_to_sdl, patch_schema};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut schema = execute_introspection("https://pipe.deezer.com/api").await?;
//! patch_schema(&mut schema);
//! println!("{}", introspection_to_sdl(&schema));
//! # Ok(())
//! # }
//! ```

mod error;
mod query;
mod sdl;
mod types;

pub use error::{IntrospectionError, Result};
pub use query::{
    execute_introspection, execute_introspection_raw, parse_introspection, INTROSPECTION_QUERY,
};
pub use sdl::{introspection_to_sdl, patch_schema};
pub use types::{
    Directive, EnumValue, Field, FullType, InputValue, IntrospectionSchema, NamedTypeRef, TypeRef,
};
