//! Render command implementation

use overlay_registry::Params;

use super::Session;
use crate::cli::ManifestArgs;
use crate::error::{CliError, Result};

/// Parse `key=value` search parameters.
pub fn parse_query(pairs: &[String]) -> Result<Params> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| {
                    CliError::user(format!("Invalid query '{}': expected KEY=VALUE", pair))
                })
        })
        .collect()
}

/// Run the render command
pub fn run_render(args: &ManifestArgs, path: &str, query: &[String]) -> Result<()> {
    let search_params = parse_query(query)?;
    let session = Session::open(args)?;

    let node = session
        .registries
        .page_factory()
        .render_path(path, &search_params);
    tracing::debug!(path, "Rendered page");
    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}
