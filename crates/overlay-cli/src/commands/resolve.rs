//! Resolve command implementation

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use overlay_registry::{Component, PageConfig, PageMetadata, Params};

use super::Session;
use crate::cli::ManifestArgs;
use crate::error::{CliError, Result};

/// Resolution summary for one path
#[derive(Debug, Serialize)]
pub(crate) struct Resolution {
    pub path: String,
    pub pattern: String,
    pub params: Params,
    pub extensions: usize,
    pub component: Option<String>,
    pub layout: Option<String>,
    pub loading: Option<String>,
    pub error: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub metadata: Value,
}

fn name_of(component: &Option<Component>) -> Option<String> {
    component.as_ref().map(|c| c.name().to_string())
}

impl Resolution {
    fn new(
        path: &str,
        pattern: String,
        params: Params,
        extensions: usize,
        config: PageConfig,
    ) -> Self {
        let metadata = match &config.metadata {
            None => Value::Null,
            Some(PageMetadata::Static(m)) => Value::Object(m.as_map().clone()),
            Some(PageMetadata::Dynamic(_)) => Value::String("<dynamic>".to_string()),
        };
        Self {
            path: path.to_string(),
            pattern,
            params,
            extensions,
            component: name_of(&config.component),
            layout: name_of(&config.layout),
            loading: name_of(&config.loading),
            error: name_of(&config.error),
            permissions: config.permissions,
            features: config.features,
            metadata,
        }
    }
}

/// Resolve `path` against the session's page registry.
pub(crate) fn resolve(session: &Session, path: &str) -> Option<Resolution> {
    let pages = &session.registries.pages;
    let matched = pages.match_pattern(path)?;
    let config = pages.resolve_page(path)?;
    let extensions = pages.extensions(&matched.pattern).len();
    Some(Resolution::new(
        path,
        matched.pattern,
        matched.params,
        extensions,
        config,
    ))
}

fn list(values: &Option<Vec<String>>) -> String {
    match values {
        Some(values) if !values.is_empty() => values.join(", "),
        _ => "(none)".dimmed().to_string(),
    }
}

fn show(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "(none)".dimmed().to_string())
}

/// Run the resolve command
pub fn run_resolve(args: &ManifestArgs, path: &str, json: bool) -> Result<()> {
    let session = Session::open(args)?;
    let Some(resolution) = resolve(&session, path) else {
        return Err(CliError::user(format!("Page not found: {}", path)));
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    let params = resolution
        .params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>();

    println!("{} {}", "Path:".bold(), resolution.path);
    println!("{} {}", "Pattern:".bold(), resolution.pattern.cyan());
    if !params.is_empty() {
        println!("{} {}", "Params:".bold(), params.join(", "));
    }
    println!("{} {}", "Extensions:".bold(), resolution.extensions);
    println!("{} {}", "Component:".bold(), show(&resolution.component));
    println!("{} {}", "Layout:".bold(), show(&resolution.layout));
    println!("{} {}", "Permissions:".bold(), list(&resolution.permissions));
    println!("{} {}", "Features:".bold(), list(&resolution.features));
    if !resolution.metadata.is_null() {
        println!("{} {}", "Metadata:".bold(), resolution.metadata);
    }
    Ok(())
}
