//! Component injection registry
//!
//! Each injection point ("slot") holds candidates sorted by descending
//! priority. Resolution picks the first candidate whose conditions pass
//! in the registry's runtime environment.

use indexmap::IndexMap;

use crate::DEFAULT_ENVIRONMENT;
use crate::component::Component;
use crate::condition::{ConditionOutcome, Conditions};

/// A candidate implementation for a slot.
#[derive(Debug, Clone)]
pub struct InjectionItem {
    pub component: Component,
    /// Higher wins
    pub priority: i32,
    pub conditions: Option<Conditions>,
    /// Whether the candidate replaces the default outright. Informational;
    /// resolution ignores it.
    pub replace: bool,
}

impl InjectionItem {
    /// Create a candidate with priority 0 and no conditions.
    pub fn new(component: Component) -> Self {
        Self {
            component,
            priority: 0,
            conditions: None,
            replace: false,
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Attach runtime conditions.
    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Mark the candidate as a replacement.
    pub fn replacing(mut self) -> Self {
        self.replace = true;
        self
    }

    /// Evaluate this candidate's conditions in `environment`.
    pub fn evaluate(&self, environment: &str) -> ConditionOutcome {
        match &self.conditions {
            Some(conditions) => conditions.evaluate(environment),
            None => ConditionOutcome::Passed,
        }
    }
}

/// Registry of overridable component slots.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    environment: String,
    slots: IndexMap<String, Vec<InjectionItem>>,
}

impl ComponentRegistry {
    /// Create an empty registry evaluating `env` conditions against
    /// `environment`.
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            slots: IndexMap::new(),
        }
    }

    /// The runtime environment used for `env` conditions.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Add a candidate to a slot.
    ///
    /// Candidates are kept sorted by descending priority; equal priorities
    /// keep registration order.
    pub fn register(&mut self, path: impl Into<String>, item: InjectionItem) {
        let path = path.into();
        tracing::debug!(
            slot = %path,
            component = item.component.name(),
            priority = item.priority,
            "Registering injection candidate"
        );
        let candidates = self.slots.entry(path).or_default();
        candidates.push(item);
        candidates.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// The active candidate for a slot, if any qualifies.
    pub fn resolve_item(&self, path: &str) -> Option<&InjectionItem> {
        let candidates = self.slots.get(path)?;
        for item in candidates {
            match item.evaluate(&self.environment) {
                ConditionOutcome::Passed => return Some(item),
                ConditionOutcome::Rejected(reason) => {
                    tracing::trace!(
                        slot = path,
                        component = item.component.name(),
                        ?reason,
                        "Candidate rejected"
                    );
                }
                ConditionOutcome::Failed(error) => {
                    tracing::warn!(
                        slot = path,
                        component = item.component.name(),
                        %error,
                        "Custom condition failed; skipping candidate"
                    );
                }
            }
        }
        None
    }

    /// The component of the active candidate for a slot.
    pub fn resolve(&self, path: &str) -> Option<Component> {
        self.resolve_item(path).map(|item| item.component.clone())
    }

    /// All candidates of a slot, highest priority first.
    pub fn get_all(&self, path: &str) -> &[InjectionItem] {
        self.slots.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any candidate is registered at a slot.
    pub fn contains(&self, path: &str) -> bool {
        self.slots.get(path).is_some_and(|c| !c.is_empty())
    }

    /// Slot names in registration order.
    pub fn slots(&self) -> Vec<&str> {
        self.slots.keys().map(String::as_str).collect()
    }

    /// Number of slots with candidates.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Remove every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ENVIRONMENT)
    }
}
