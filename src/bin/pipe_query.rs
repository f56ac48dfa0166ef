//! pipe-query - run ad-hoc GraphQL queries against the Pipe API.
//!
//! Reads `DEEZER_ARL` from the environment (or a `.env` file) and handles
//! JWT auth automatically via [`PipeClient`]. The raw JSON response is
//! printed, including any `errors`, so this tool is suitable for probing
//! the schema by hand.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use deezer_gql::{Arl, PipeClient};

/// Run GraphQL queries against the Deezer Pipe API.
#[derive(Parser, Debug)]
#[command(name = "pipe-query")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:\n  \
    pipe-query queries/get_me.graphql\n  \
    pipe-query -q '{ me { id } }'\n  \
    pipe-query -q 'query($id: String!) { track(trackId: $id) { title } }' -v '{\"id\": \"3135556\"}'")]
struct Cli {
    /// Path to a .graphql file to execute
    file: Option<PathBuf>,

    /// Inline GraphQL query string
    #[arg(short, long, conflicts_with = "file")]
    query: Option<String>,

    /// JSON string of query variables
    #[arg(short, long)]
    variables: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let query = match (&cli.file, &cli.query) {
        (Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, Some(inline)) => inline.clone(),
        (None, None) => bail!("provide a .graphql file or an inline query with -q"),
    };

    let variables = cli
        .variables
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .context("variables are not valid JSON")?;

    // .env is optional; a variable already in the environment wins
    let _ = dotenvy::dotenv();
    let arl = std::env::var("DEEZER_ARL")
        .context("DEEZER_ARL is not set; add it to .env or the environment")?;
    let client = PipeClient::new(Arl::new(arl)?);

    let response = client.execute(&query, variables, None).await?;

    // Print the raw JSON response, not just data, so errors stay visible
    let printable = serde_json::from_str::<serde_json::Value>(&response.body)
        .unwrap_or_else(|_| serde_json::json!({ "raw": response.body.as_str() }));
    println!("{}", serde_json::to_string_pretty(&printable)?);

    if !response.is_ok() {
        bail!("request failed with HTTP {}", response.code);
    }

    Ok(())
}
