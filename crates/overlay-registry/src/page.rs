//! Page configuration types
//!
//! A [`PageConfig`] is what the page registry resolves to. A
//! [`PageExtension`] is a partial override folded over it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::component::Component;
use crate::route::Params;

/// Title used when a page declares no metadata.
pub const DEFAULT_TITLE: &str = "Page";
/// Description used when a page declares no metadata.
pub const DEFAULT_DESCRIPTION: &str = "Page description";

/// Document metadata record (title, description, and anything else).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// The generic record returned for pages without metadata.
    pub fn generic() -> Self {
        Self::new()
            .with("title", DEFAULT_TITLE)
            .with("description", DEFAULT_DESCRIPTION)
    }

    /// Set a key (builder pattern).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `title` entry, if it is a string.
    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    /// The `description` entry, if it is a string.
    pub fn description(&self) -> Option<&str> {
        self.get("description").and_then(Value::as_str)
    }

    /// Union with `overlay`; keys from `overlay` win.
    pub fn merge(&mut self, overlay: &Metadata) {
        for (key, value) in &overlay.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Deferred metadata computation.
pub type MetadataFuture = Pin<Box<dyn Future<Output = Metadata> + Send>>;

/// Metadata computed from the page's route params.
pub type MetadataFn = Arc<dyn Fn(&Params) -> MetadataFuture + Send + Sync>;

/// Page metadata: either a static record or a function of the route params.
#[derive(Clone)]
pub enum PageMetadata {
    Static(Metadata),
    Dynamic(MetadataFn),
}

impl PageMetadata {
    /// Metadata produced by an async function of the params.
    pub fn dynamic<F, Fut>(f: F) -> Self
    where
        F: Fn(&Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Metadata> + Send + 'static,
    {
        Self::Dynamic(Arc::new(move |params: &Params| -> MetadataFuture {
            Box::pin(f(params))
        }))
    }

    /// Metadata produced synchronously from the params.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Params) -> Metadata + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(move |params: &Params| -> MetadataFuture {
            Box::pin(std::future::ready(f(params)))
        }))
    }

    /// The static record, if this metadata does not depend on params.
    pub fn as_static(&self) -> Option<&Metadata> {
        match self {
            Self::Static(m) => Some(m),
            Self::Dynamic(_) => None,
        }
    }

    /// Check if the metadata is computed from params.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }

    /// Start evaluating against `params`. The returned future owns
    /// everything it needs.
    pub fn evaluate(&self, params: &Params) -> MetadataFuture {
        match self {
            Self::Static(m) => Box::pin(std::future::ready(m.clone())),
            Self::Dynamic(f) => f(params),
        }
    }

    /// Union with `overlay`, keys from `overlay` winning.
    ///
    /// Two static records merge eagerly. If either side is a function the
    /// result is a function that evaluates both and merges the outputs.
    pub fn merge(self, overlay: PageMetadata) -> PageMetadata {
        match (self, overlay) {
            (Self::Static(mut base), Self::Static(top)) => {
                base.merge(&top);
                Self::Static(base)
            }
            (base, top) => Self::Dynamic(Arc::new(move |params: &Params| -> MetadataFuture {
                let base = base.evaluate(params);
                let top = top.evaluate(params);
                Box::pin(async move {
                    let mut merged = base.await;
                    merged.merge(&top.await);
                    merged
                })
            })),
        }
    }
}

impl From<Metadata> for PageMetadata {
    fn from(metadata: Metadata) -> Self {
        Self::Static(metadata)
    }
}

impl fmt::Debug for PageMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(m) => f.debug_tuple("Static").field(m).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

fn strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

/// Resolved, renderable description of a page.
#[derive(Debug, Clone, Default)]
pub struct PageConfig {
    /// The page itself. Always present on base registrations.
    pub component: Option<Component>,
    /// Wrapper rendered around `component`
    pub layout: Option<Component>,
    pub metadata: Option<PageMetadata>,
    /// Capabilities of which the user needs at least one
    pub permissions: Option<Vec<String>>,
    /// Feature flags that must all be enabled
    pub features: Option<Vec<String>>,
    pub loading: Option<Component>,
    pub error: Option<Component>,
}

impl PageConfig {
    /// Create a base config rendering `component`.
    pub fn new(component: Component) -> Self {
        Self {
            component: Some(component),
            ..Self::default()
        }
    }

    /// Set the layout.
    pub fn with_layout(mut self, layout: Component) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Set the metadata.
    pub fn with_metadata(mut self, metadata: impl Into<PageMetadata>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    /// Set the permissions, any of which grants access.
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = Some(strings(permissions));
        self
    }

    /// Set the feature flags, all of which are required.
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(strings(features));
        self
    }

    /// Set the loading view.
    pub fn with_loading(mut self, loading: Component) -> Self {
        self.loading = Some(loading);
        self
    }

    /// Set the error view.
    pub fn with_error(mut self, error: Component) -> Self {
        self.error = Some(error);
        self
    }

    /// Declared permissions, empty when none are declared.
    pub fn required_permissions(&self) -> &[String] {
        self.permissions.as_deref().unwrap_or(&[])
    }

    /// Declared features, empty when none are declared.
    pub fn required_features(&self) -> &[String] {
        self.features.as_deref().unwrap_or(&[])
    }

    /// Fold one extension into this config.
    ///
    /// Present fields overwrite. Metadata is merged with the extension's
    /// keys winning. Permissions and features are replaced wholesale.
    pub fn apply(&mut self, extension: &PageExtension) {
        if let Some(component) = &extension.component {
            self.component = Some(component.clone());
        }
        if let Some(layout) = &extension.layout {
            self.layout = Some(layout.clone());
        }
        if let Some(metadata) = &extension.metadata {
            self.metadata = Some(match self.metadata.take() {
                Some(current) => current.merge(metadata.clone()),
                None => metadata.clone(),
            });
        }
        if let Some(permissions) = &extension.permissions {
            self.permissions = Some(permissions.clone());
        }
        if let Some(features) = &extension.features {
            self.features = Some(features.clone());
        }
        if let Some(loading) = &extension.loading {
            self.loading = Some(loading.clone());
        }
        if let Some(error) = &extension.error {
            self.error = Some(error.clone());
        }
    }
}

/// Partial, priority-ranked override for one path pattern.
#[derive(Debug, Clone, Default)]
pub struct PageExtension {
    pub component: Option<Component>,
    pub layout: Option<Component>,
    pub metadata: Option<PageMetadata>,
    pub permissions: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub loading: Option<Component>,
    pub error: Option<Component>,
    /// Higher priority wins on conflicting fields
    pub priority: i32,
    /// Pattern this extension augments. Informational only; extensions
    /// are looked up by the key they are registered under.
    pub extends: Option<String>,
}

impl PageExtension {
    /// Create an extension that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the page component.
    pub fn with_component(mut self, component: Component) -> Self {
        self.component = Some(component);
        self
    }

    /// Replace the layout.
    pub fn with_layout(mut self, layout: Component) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Merge metadata over the current record.
    pub fn with_metadata(mut self, metadata: impl Into<PageMetadata>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    /// Replace the permission list.
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = Some(strings(permissions));
        self
    }

    /// Replace the feature list.
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(strings(features));
        self
    }

    /// Replace the loading view.
    pub fn with_loading(mut self, loading: Component) -> Self {
        self.loading = Some(loading);
        self
    }

    /// Replace the error view.
    pub fn with_error(mut self, error: Component) -> Self {
        self.error = Some(error);
        self
    }

    /// Set the fold priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Record the pattern this extension augments.
    pub fn extending(mut self, pattern: impl Into<String>) -> Self {
        self.extends = Some(pattern.into());
        self
    }

    /// Whether the extension overrides nothing.
    pub fn is_empty(&self) -> bool {
        self.component.is_none()
            && self.layout.is_none()
            && self.metadata.is_none()
            && self.permissions.is_none()
            && self.features.is_none()
            && self.loading.is_none()
            && self.error.is_none()
    }
}
