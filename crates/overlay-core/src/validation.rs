//! Override validation
//!
//! Validation never fails: it reports problems so the caller can decide
//! whether to proceed, log, or abort.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use overlay_registry::route;

use crate::config::OverrideConfig;

static SEGMENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").unwrap());

/// Result of validating an override set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Problems with a single path pattern.
pub fn validate_path(path: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if path.trim().is_empty() {
        errors.push("Page path must not be empty".to_string());
        return errors;
    }
    if !path.starts_with('/') {
        errors.push(format!("Page path '{}' must start with '/'", path));
    }

    let mut names = HashSet::new();
    for segment in route::split_segments(path) {
        match route::dynamic_name(segment) {
            Some(name) if !SEGMENT_NAME.is_match(name) => {
                errors.push(format!(
                    "Invalid dynamic segment '{}' in '{}'",
                    segment, path
                ));
            }
            Some(name) if !names.insert(name) => {
                errors.push(format!(
                    "Duplicate dynamic segment '{}' in '{}'",
                    segment, path
                ));
            }
            Some(_) => {}
            None if segment.contains(['[', ']']) => {
                errors.push(format!(
                    "Malformed dynamic segment '{}' in '{}'",
                    segment, path
                ));
            }
            None => {}
        }
    }
    errors
}

/// Check an override set for structural problems.
pub fn validate_config(config: &OverrideConfig) -> ValidationReport {
    let mut errors = Vec::new();

    for (path, extensions) in &config.pages {
        errors.extend(validate_path(path));
        if extensions.is_empty() {
            errors.push(format!("No extensions given for page '{}'", path));
        }
        for extension in extensions {
            if let Some(extends) = &extension.extends {
                errors.extend(
                    validate_path(extends)
                        .into_iter()
                        .map(|e| format!("{} (extends of '{}')", e, path)),
                );
            }
        }
    }

    for (slot, items) in &config.components {
        if slot.trim().is_empty() {
            errors.push("Component slot name must not be empty".to_string());
        }
        if items.is_empty() {
            errors.push(format!("No candidates given for slot '{}'", slot));
        }
    }

    ValidationReport::from_errors(errors)
}
