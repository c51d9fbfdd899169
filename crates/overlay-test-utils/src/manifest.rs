//! [`TestManifest`] for tests that load override manifests from disk.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a single `overrides.toml`.
///
/// # Example
///
/// ```rust,no_run
/// use overlay_test_utils::TestManifest;
///
/// let manifest = TestManifest::new("[pages.\"/\"]\ncomponent = \"Home\"\n");
/// assert!(manifest.path().ends_with("overrides.toml"));
/// ```
pub struct TestManifest {
    temp_dir: TempDir,
    path: PathBuf,
}

impl TestManifest {
    /// Write `content` to a fresh manifest file.
    pub fn new(content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("overrides.toml");
        fs::write(&path, content).unwrap();
        Self { temp_dir, path }
    }

    /// Path of the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the manifest.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}
