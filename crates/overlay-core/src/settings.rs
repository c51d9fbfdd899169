//! Runtime settings
//!
//! The runtime environment decides which `env`-conditioned component
//! candidates are active. It is read once at startup.

use serde::{Deserialize, Serialize};

use overlay_registry::DEFAULT_ENVIRONMENT;

/// Primary variable naming the runtime environment.
pub const ENV_VAR: &str = "OVERLAY_ENV";
/// Fallback variable, shared with the surrounding application.
pub const FALLBACK_ENV_VAR: &str = "APP_ENV";

/// Settings the registries are built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeSettings {
    /// Environment name, e.g. "development" or "production"
    pub environment: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

impl RuntimeSettings {
    /// Read settings from the process environment.
    ///
    /// `OVERLAY_ENV` wins over `APP_ENV`; blank values are ignored and the
    /// environment defaults to "development".
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = [ENV_VAR, FALLBACK_ENV_VAR]
            .into_iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());

        match environment {
            Some(environment) => {
                tracing::debug!(%environment, "Runtime environment from process env");
                Self { environment }
            }
            None => Self::default(),
        }
    }

    /// Override the environment name.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Check if running in production.
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
