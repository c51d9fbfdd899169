//! The override set applied on top of the base application.

use indexmap::IndexMap;

use overlay_registry::{InjectionItem, PageExtension};

/// Overrides supplied by a customization layer.
///
/// `pages` feed the page registry's extensions; `components` feed the
/// component registry's slots. Both keep declaration order.
#[derive(Debug, Clone, Default)]
pub struct OverrideConfig {
    pub pages: IndexMap<String, Vec<PageExtension>>,
    pub components: IndexMap<String, Vec<InjectionItem>>,
}

impl OverrideConfig {
    /// Create an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page extension (builder pattern).
    pub fn page(mut self, path: impl Into<String>, extension: PageExtension) -> Self {
        self.pages.entry(path.into()).or_default().push(extension);
        self
    }

    /// Add a component candidate (builder pattern).
    pub fn component(mut self, path: impl Into<String>, item: InjectionItem) -> Self {
        self.components.entry(path.into()).or_default().push(item);
        self
    }

    /// Check if the set contains no pages and no slots.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.components.is_empty()
    }
}
