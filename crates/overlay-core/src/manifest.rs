//! Declarative override manifests
//!
//! A manifest is a TOML file naming components by string. Names are bound
//! to real components through a [`ComponentCatalog`] when the manifest is
//! turned into an [`OverrideConfig`].
//!
//! ```toml
//! [base."/services/[id]"]
//! component = "ServiceDetail"
//!
//! [pages."/services/[id]"]
//! priority = 10
//! layout = "Shell"
//! permissions = ["services:read"]
//! [pages."/services/[id]".metadata]
//! title = "Service"
//!
//! [[components."/header"]]
//! component = "BrandHeader"
//! priority = 5
//! env = ["production"]
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use overlay_registry::{
    Component, Conditions, InjectionItem, Metadata, PageConfig, PageExtension, PageRegistry,
};

use crate::config::OverrideConfig;
use crate::error::{Error, Result};
use crate::provider::BaseLayer;

/// Either a single table or an array of tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// All entries as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(item) => std::slice::from_ref(item),
            Self::Many(items) => items,
        }
    }
}

/// A page declared in a manifest, either as a base page or an extension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageEntry {
    pub component: Option<String>,
    pub layout: Option<String>,
    pub loading: Option<String>,
    pub error: Option<String>,
    pub metadata: Option<Map<String, Value>>,
    pub permissions: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub priority: i32,
    pub extends: Option<String>,
}

/// A component candidate declared in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentEntry {
    pub component: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub replace: bool,
    pub env: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
}

/// Parsed override manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideManifest {
    /// Base pages, keyed by pattern
    #[serde(default)]
    pub base: IndexMap<String, PageEntry>,
    /// Page extensions, keyed by pattern
    #[serde(default)]
    pub pages: IndexMap<String, OneOrMany<PageEntry>>,
    /// Component candidates, keyed by slot
    #[serde(default)]
    pub components: IndexMap<String, OneOrMany<ComponentEntry>>,
}

impl OverrideManifest {
    /// Parse a manifest from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ManifestNotFound(path.to_path_buf()));
        }
        tracing::debug!(?path, "Loading override manifest");
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Every component name the manifest references, sorted.
    pub fn component_names(&self) -> Vec<&str> {
        let page_names = self
            .base
            .values()
            .chain(self.pages.values().flat_map(OneOrMany::as_slice))
            .flat_map(|entry| {
                [&entry.component, &entry.layout, &entry.loading, &entry.error]
                    .into_iter()
                    .flatten()
            })
            .map(String::as_str);
        let slot_names = self
            .components
            .values()
            .flat_map(OneOrMany::as_slice)
            .map(|entry| entry.component.as_str());

        page_names
            .chain(slot_names)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Bind names and build the override set.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownComponent`] for names missing from
    /// `catalog`.
    pub fn to_config(&self, catalog: &ComponentCatalog) -> Result<OverrideConfig> {
        let mut config = OverrideConfig::new();
        for (path, entries) in &self.pages {
            let extensions = entries
                .as_slice()
                .iter()
                .map(|entry| extension_from(entry, path, catalog))
                .collect::<Result<Vec<_>>>()?;
            config.pages.insert(path.clone(), extensions);
        }
        for (slot, entries) in &self.components {
            let items = entries
                .as_slice()
                .iter()
                .map(|entry| item_from(entry, slot, catalog))
                .collect::<Result<Vec<_>>>()?;
            config.components.insert(slot.clone(), items);
        }
        Ok(config)
    }

    /// Bind names and build the manifest's base layer.
    pub fn to_base(&self, catalog: &ComponentCatalog) -> Result<DeclaredBase> {
        let pages = self
            .base
            .iter()
            .map(|(path, entry)| Ok((path.clone(), base_from(entry, path, catalog)?)))
            .collect::<Result<IndexMap<_, _>>>()?;
        Ok(DeclaredBase { pages })
    }
}

/// Named components available to manifests.
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    components: IndexMap<String, Component>,
}

impl ComponentCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog binding every name `manifest` references to an element
    /// component of the same name.
    pub fn placeholders_for(manifest: &OverrideManifest) -> Self {
        let mut catalog = Self::new();
        for name in manifest.component_names() {
            catalog.register(name, Component::element(name));
        }
        catalog
    }

    /// Bind `name` to `component`, replacing any earlier binding.
    pub fn register(&mut self, name: impl Into<String>, component: Component) {
        self.components.insert(name.into(), component);
    }

    /// Register a component (builder pattern).
    pub fn with(mut self, name: impl Into<String>, component: Component) -> Self {
        self.register(name, component);
        self
    }

    /// Get the component bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Get the number of bound names.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    fn lookup(&self, name: &str, path: &str) -> Result<Component> {
        self.get(name).cloned().ok_or_else(|| Error::UnknownComponent {
            name: name.to_string(),
            path: path.to_string(),
        })
    }

    fn lookup_opt(&self, name: Option<&String>, path: &str) -> Result<Option<Component>> {
        name.map(|n| self.lookup(n, path)).transpose()
    }
}

fn base_from(entry: &PageEntry, path: &str, catalog: &ComponentCatalog) -> Result<PageConfig> {
    Ok(PageConfig {
        component: catalog.lookup_opt(entry.component.as_ref(), path)?,
        layout: catalog.lookup_opt(entry.layout.as_ref(), path)?,
        metadata: entry.metadata.clone().map(|m| Metadata::from(m).into()),
        permissions: entry.permissions.clone(),
        features: entry.features.clone(),
        loading: catalog.lookup_opt(entry.loading.as_ref(), path)?,
        error: catalog.lookup_opt(entry.error.as_ref(), path)?,
    })
}

fn extension_from(
    entry: &PageEntry,
    path: &str,
    catalog: &ComponentCatalog,
) -> Result<PageExtension> {
    let page = base_from(entry, path, catalog)?;
    Ok(PageExtension {
        component: page.component,
        layout: page.layout,
        metadata: page.metadata,
        permissions: page.permissions,
        features: page.features,
        loading: page.loading,
        error: page.error,
        priority: entry.priority,
        extends: entry.extends.clone(),
    })
}

fn item_from(
    entry: &ComponentEntry,
    slot: &str,
    catalog: &ComponentCatalog,
) -> Result<InjectionItem> {
    let mut item =
        InjectionItem::new(catalog.lookup(&entry.component, slot)?).with_priority(entry.priority);
    item.replace = entry.replace;
    if entry.env.is_some() || entry.features.is_some() {
        item.conditions = Some(Conditions {
            env: entry.env.clone(),
            features: entry.features.clone(),
            custom: None,
        });
    }
    Ok(item)
}

/// Base pages declared in a manifest's `[base]` table.
#[derive(Debug, Clone, Default)]
pub struct DeclaredBase {
    pages: IndexMap<String, PageConfig>,
}

impl BaseLayer for DeclaredBase {
    fn register_pages(&self, pages: &mut PageRegistry) -> overlay_registry::Result<()> {
        for (path, config) in &self.pages {
            pages.register_base_page(path.clone(), config.clone())?;
        }
        Ok(())
    }
}
