//! Check command implementation
//!
//! Parses a manifest, binds its component names and validates the result.

use colored::Colorize;

use overlay_core::{ComponentCatalog, OverrideManifest, validate_config, validate_path};

use crate::cli::ManifestArgs;
use crate::error::{CliError, Result};

/// Run the check command
pub fn run_check(args: &ManifestArgs) -> Result<()> {
    let errors = check_errors(&OverrideManifest::load(&args.manifest)?)?;

    if errors.is_empty() {
        println!(
            "{} {} is valid",
            "OK".green().bold(),
            args.manifest.display()
        );
        return Ok(());
    }

    for error in &errors {
        println!("  {} {}", "x".red(), error);
    }
    Err(CliError::user(format!(
        "{} validation error(s) in {}",
        errors.len(),
        args.manifest.display()
    )))
}

/// Validation errors for a parsed manifest, base pages included.
pub(crate) fn check_errors(manifest: &OverrideManifest) -> Result<Vec<String>> {
    let catalog = ComponentCatalog::placeholders_for(manifest);
    let overrides = manifest.to_config(&catalog)?;

    let mut errors: Vec<String> = manifest
        .base
        .iter()
        .flat_map(|(path, entry)| {
            let mut errors = validate_path(path);
            if entry.component.is_none() {
                errors.push(format!("Base page '{}' has no component", path));
            }
            errors
        })
        .collect();
    errors.extend(validate_config(&overrides).errors);
    Ok(errors)
}
