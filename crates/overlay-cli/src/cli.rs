//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Overlay - Inspect page and component override manifests
#[derive(Parser, Debug)]
#[command(name = "overlay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Manifest and environment shared by every command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ManifestArgs {
    /// Path to the override manifest (TOML)
    pub manifest: PathBuf,

    /// Runtime environment for `env` conditions
    #[arg(short, long, env = "OVERLAY_ENV")]
    pub env: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate a manifest
    ///
    /// Examples:
    ///   overlay check overrides.toml
    Check {
        #[command(flatten)]
        args: ManifestArgs,
    },

    /// Show how a path resolves
    ///
    /// Examples:
    ///   overlay resolve overrides.toml /services/42
    ///   overlay resolve overrides.toml /services/42 --json
    Resolve {
        #[command(flatten)]
        args: ManifestArgs,

        /// Concrete path to resolve
        path: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Render a path and print the tree as JSON
    ///
    /// Examples:
    ///   overlay render overrides.toml /services/42 -q tab=reviews
    Render {
        #[command(flatten)]
        args: ManifestArgs,

        /// Concrete path to render
        path: String,

        /// Search parameters as key=value
        #[arg(short, long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,
    },

    /// List component slots and their active candidate
    Slots {
        #[command(flatten)]
        args: ManifestArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::parse_from([
            "overlay",
            "resolve",
            "overrides.toml",
            "/services/42",
            "--env",
            "production",
            "--json",
        ]);
        assert_eq!(
            cli.command,
            Some(Commands::Resolve {
                args: ManifestArgs {
                    manifest: PathBuf::from("overrides.toml"),
                    env: Some("production".to_string()),
                },
                path: "/services/42".to_string(),
                json: true,
            })
        );
    }

    #[test]
    fn test_parse_render_queries() {
        let cli = Cli::parse_from(["overlay", "render", "m.toml", "/x", "-q", "a=1", "-q", "b=2"]);
        match cli.command {
            Some(Commands::Render { query, .. }) => assert_eq!(query, vec!["a=1", "b=2"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::parse_from(["overlay", "check", "m.toml", "-v"]);
        assert!(cli.verbose);
    }
}
