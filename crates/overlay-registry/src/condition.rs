//! Activation conditions for injection candidates
//!
//! Evaluation never fails outright. A custom predicate that errors or
//! panics produces [`ConditionOutcome::Failed`], which the registry logs
//! and treats as "skip this candidate".

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Error raised by a custom predicate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ConditionError(pub String);

impl ConditionError {
    /// Create a condition error with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Zero-argument predicate deciding whether a candidate is active.
pub type CustomCondition = Arc<dyn Fn() -> Result<bool, ConditionError> + Send + Sync>;

/// Which check turned a candidate down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Current environment is not in the candidate's `env` list
    Environment,
    /// A declared feature flag is disabled
    Features,
    /// The custom predicate returned false
    Custom,
}

/// Result of evaluating a candidate's conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionOutcome {
    Passed,
    Rejected(Rejection),
    /// The custom predicate errored or panicked
    Failed(String),
}

impl ConditionOutcome {
    /// Check if the candidate qualifies.
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Conditions gating an injection candidate. Absent checks always pass.
#[derive(Clone, Default)]
pub struct Conditions {
    /// Environments in which the candidate is active
    pub env: Option<Vec<String>>,
    /// Feature flags the candidate asks for. Not enforced yet.
    pub features: Option<Vec<String>>,
    pub custom: Option<CustomCondition>,
}

impl Conditions {
    /// Create conditions that always pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given environments.
    pub fn with_env<I, S>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.env = Some(env.into_iter().map(Into::into).collect());
        self
    }

    /// Declare required feature flags.
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    /// Infallible custom predicate.
    pub fn with_custom<F>(self, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.with_fallible(move || Ok(predicate()))
    }

    /// Custom predicate that may fail.
    pub fn with_fallible<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> Result<bool, ConditionError> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(predicate));
        self
    }

    /// Evaluate against the current runtime environment.
    ///
    /// Checks run in order `env`, `features`, `custom`; the first that
    /// does not pass decides the outcome.
    pub fn evaluate(&self, environment: &str) -> ConditionOutcome {
        if let Some(envs) = &self.env
            && !envs.iter().any(|e| e == environment)
        {
            return ConditionOutcome::Rejected(Rejection::Environment);
        }

        if !self.features_enabled() {
            return ConditionOutcome::Rejected(Rejection::Features);
        }

        match &self.custom {
            None => ConditionOutcome::Passed,
            Some(predicate) => match panic::catch_unwind(AssertUnwindSafe(|| predicate())) {
                Ok(Ok(true)) => ConditionOutcome::Passed,
                Ok(Ok(false)) => ConditionOutcome::Rejected(Rejection::Custom),
                Ok(Err(e)) => ConditionOutcome::Failed(e.to_string()),
                Err(payload) => ConditionOutcome::Failed(panic_message(payload.as_ref())),
            },
        }
    }

    // Feature-flag gating is a placeholder: declared features never block a
    // candidate until a flag source exists.
    fn features_enabled(&self) -> bool {
        true
    }
}

impl fmt::Debug for Conditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conditions")
            .field("env", &self.env)
            .field("features", &self.features)
            .field("custom", &self.custom.as_ref().map(|_| ".."))
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "custom condition panicked".to_string()
    }
}
