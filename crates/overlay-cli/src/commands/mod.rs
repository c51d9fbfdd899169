//! Command implementations for overlay-cli

mod check;
mod render;
mod resolve;
mod slots;

pub use check::run_check;
#[cfg(test)]
pub(crate) use check::check_errors;
pub use render::run_render;
pub use resolve::run_resolve;
#[cfg(test)]
pub(crate) use resolve::resolve;
pub use slots::run_slots;
#[cfg(test)]
pub(crate) use slots::summarize;

use overlay_core::{ComponentCatalog, OverrideManifest, Registries, RuntimeSettings, bootstrap};

use crate::cli::ManifestArgs;
use crate::error::Result;

/// A manifest bootstrapped into registries with placeholder components.
pub(crate) struct Session {
    pub registries: Registries,
}

impl Session {
    /// Load the manifest and bootstrap it.
    pub fn open(args: &ManifestArgs) -> Result<Self> {
        let manifest = OverrideManifest::load(&args.manifest)?;
        let settings = match &args.env {
            Some(env) => RuntimeSettings::default().with_environment(env.clone()),
            None => RuntimeSettings::from_env(),
        };

        let catalog = ComponentCatalog::placeholders_for(&manifest);
        let base = manifest.to_base(&catalog)?;
        let overrides = manifest.to_config(&catalog)?;
        let registries = bootstrap(&settings, &base, overrides)?;

        Ok(Self { registries })
    }
}
