//! Error types for overlay-render

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Nothing is registered or active at a required slot and no fallback
    /// was supplied. Indicates a missing bootstrap registration.
    #[error("no component resolved for '{path}' and no fallback given")]
    ComponentNotFound { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_not_found_display() {
        let err = Error::ComponentNotFound {
            path: "/header".to_string(),
        };
        assert!(err.to_string().contains("/header"));
        assert!(err.to_string().contains("no fallback"));
    }
}
