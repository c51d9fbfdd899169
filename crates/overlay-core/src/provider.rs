//! Registry bootstrap
//!
//! The [`ConfigProvider`] is the only writer of the registries in normal
//! operation. It registers the base application's pages and components,
//! applies one override set on top, and then hands the registries out as
//! read-only shared [`Registries`].

use std::sync::Arc;

use overlay_registry::{Component, ComponentRegistry, PageConfig, PageRegistry};
use overlay_render::{PageFactory, injectable};

use crate::Result;
use crate::config::OverrideConfig;
use crate::settings::RuntimeSettings;
use crate::validation::validate_config;

/// The base application's default registrations.
pub trait BaseLayer {
    /// Register default pages.
    fn register_pages(&self, pages: &mut PageRegistry) -> overlay_registry::Result<()>;

    /// Register default component candidates.
    fn register_components(&self, _components: &mut ComponentRegistry) {}
}

/// A base layer with no registrations.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyBase;

impl BaseLayer for EmptyBase {
    fn register_pages(&self, _pages: &mut PageRegistry) -> overlay_registry::Result<()> {
        Ok(())
    }
}

/// Owns the registries while they are being populated.
#[derive(Debug)]
pub struct ConfigProvider {
    pages: PageRegistry,
    components: ComponentRegistry,
    initialized: bool,
}

impl ConfigProvider {
    /// Create a provider with empty registries.
    pub fn new(settings: &RuntimeSettings) -> Self {
        Self {
            pages: PageRegistry::new(),
            components: ComponentRegistry::new(settings.environment.clone()),
            initialized: false,
        }
    }

    /// Register the base layer, then `overrides`.
    ///
    /// Runs once. Later calls log a warning and change nothing. Validation
    /// problems in `overrides` are logged; the overrides are applied
    /// regardless, so call [`validate_config`] first to reject them.
    ///
    /// # Errors
    ///
    /// Fails if the base layer registers a page without a component. The
    /// provider is then left empty and may be initialized again.
    pub fn initialize(&mut self, base: &dyn BaseLayer, overrides: OverrideConfig) -> Result<()> {
        if self.initialized {
            tracing::warn!("Registries already initialized; ignoring repeated initialization");
            return Ok(());
        }

        let report = validate_config(&overrides);
        for error in &report.errors {
            tracing::warn!(%error, "Override validation problem");
        }

        let mut pages = PageRegistry::new();
        base.register_pages(&mut pages)?;
        self.pages = pages;
        base.register_components(&mut self.components);
        self.apply_overrides(overrides);
        self.initialized = true;

        tracing::info!(
            pages = self.pages.len(),
            slots = self.components.len(),
            environment = self.components.environment(),
            "Registries initialized"
        );
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: OverrideConfig) {
        self.pages.register_extensions(overrides.pages);
        for (slot, items) in overrides.components {
            for item in items {
                self.components.register(slot.clone(), item);
            }
        }
    }

    /// Check if `initialize` has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The page registry being populated.
    pub fn pages(&self) -> &PageRegistry {
        &self.pages
    }

    /// The component registry being populated.
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Resolved config for `path`.
    pub fn get_page_config(&self, path: &str) -> Option<PageConfig> {
        self.pages.resolve_page(path)
    }

    /// Whether some registered pattern serves `path`.
    pub fn has_page_config(&self, path: &str) -> bool {
        self.pages.has_page(path)
    }

    /// Empty both registries and allow initialization again.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.components.clear();
        self.initialized = false;
    }

    /// Freeze the registries for render-time use.
    pub fn into_registries(self) -> Registries {
        Registries {
            pages: Arc::new(self.pages),
            components: Arc::new(self.components),
        }
    }
}

/// Read-only registries shared with render-time code.
#[derive(Debug, Clone)]
pub struct Registries {
    pub pages: Arc<PageRegistry>,
    pub components: Arc<ComponentRegistry>,
}

impl Registries {
    /// A page factory over the shared page registry.
    pub fn page_factory(&self) -> PageFactory<'_> {
        PageFactory::new(&self.pages)
    }

    /// Resolve a slot, falling back to `fallback`.
    ///
    /// # Errors
    ///
    /// Fails when nothing resolves and no fallback is given.
    pub fn get_component(&self, path: &str, fallback: Option<&Component>) -> Result<Component> {
        Ok(overlay_render::get_component(&self.components, path, fallback)?)
    }

    /// Check if some candidate at `path` currently resolves.
    pub fn is_injected(&self, path: &str) -> bool {
        overlay_render::is_injected(&self.components, path)
    }

    /// Make `original` injectable at `path`.
    pub fn injectable(&self, path: impl Into<String>, original: Component) -> Component {
        injectable(Arc::clone(&self.components), path, original)
    }
}

/// Bootstrap registries in one call.
pub fn bootstrap(
    settings: &RuntimeSettings,
    base: &dyn BaseLayer,
    overrides: OverrideConfig,
) -> Result<Registries> {
    let mut provider = ConfigProvider::new(settings);
    provider.initialize(base, overrides)?;
    Ok(provider.into_registries())
}
