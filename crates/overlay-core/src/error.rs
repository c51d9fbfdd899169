//! Error types for overlay-core

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Registry error: {0}")]
    Registry(#[from] overlay_registry::Error),

    #[error("Render error: {0}")]
    Render(#[from] overlay_render::Error),

    #[error("failed to parse override manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    #[error("override manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A manifest entry names a component the catalog does not know.
    #[error("unknown component '{name}' referenced by '{path}'")]
    UnknownComponent { name: String, path: String },

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}
