//! Error types for overlay-registry

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A base page was registered without a component to render.
    #[error("base page '{path}' has no component")]
    MissingComponent { path: String },
}
