//! pipe-schema - fetch and convert the Pipe GraphQL schema.
//!
//! Fetches the live introspection result (no auth required) or converts a
//! local introspection JSON dump, and writes the schema as SDL for
//! downstream codegen tooling.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use deezer_gql::introspect::{
    execute_introspection_raw, introspection_to_sdl, parse_introspection, patch_schema,
};
use deezer_gql::DEFAULT_PIPE_URL;

/// Fetch or convert the Pipe GraphQL schema to SDL.
#[derive(Parser, Debug)]
#[command(name = "pipe-schema")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Fetch live introspection from the endpoint (default: read the
    /// input file)
    #[arg(long)]
    fetch: bool,

    /// GraphQL endpoint to introspect with --fetch
    #[arg(long, default_value = DEFAULT_PIPE_URL)]
    url: String,

    /// Introspection JSON file to read, or to save when fetching
    #[arg(long, default_value = "schema.json")]
    input: PathBuf,

    /// SDL file to write
    #[arg(long, default_value = "schema.graphql")]
    output: PathBuf,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let document = if cli.fetch {
        println!("Fetching introspection from {}...", cli.url);
        let document = execute_introspection_raw(&cli.url).await?;
        fs::write(&cli.input, serde_json::to_string(&document)?)
            .with_context(|| format!("failed to write {}", cli.input.display()))?;
        println!("Saved introspection to {}", cli.input.display());
        document
    } else {
        let text = fs::read_to_string(&cli.input)
            .with_context(|| format!("failed to read {}", cli.input.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("{} is not valid JSON", cli.input.display()))?
    };

    let mut schema = parse_introspection(document)?;
    patch_schema(&mut schema);
    let sdl = introspection_to_sdl(&schema);

    fs::write(&cli.output, &sdl)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    println!(
        "Wrote {}: {} chars, {} lines",
        cli.output.display(),
        sdl.len(),
        sdl.lines().count()
    );

    Ok(())
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
