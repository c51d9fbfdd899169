//! Bootstrap, configuration and override manifests for Overlay.
//!
//! The [`ConfigProvider`] registers a base application and one override
//! set, then freezes the registries into shared, read-only [`Registries`]
//! for render-time code. Override sets can be built in code or loaded
//! from TOML manifests.

pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod provider;
pub mod settings;
pub mod validation;

pub use config::OverrideConfig;
pub use error::{Error, Result};
pub use manifest::{
    ComponentCatalog, ComponentEntry, DeclaredBase, OneOrMany, OverrideManifest, PageEntry,
};
pub use provider::{BaseLayer, ConfigProvider, EmptyBase, Registries, bootstrap};
pub use settings::RuntimeSettings;
pub use validation::{ValidationReport, validate_config, validate_path};
