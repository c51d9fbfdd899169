//! Render-time access to injected components
//!
//! [`get_component`] is the per-render lookup used by code that owns a
//! slot. [`Injectable`] turns an existing component into one whose
//! implementation can be swapped through the registry.

use std::sync::Arc;

use overlay_registry::{Component, ComponentRegistry, Node, Props, Render};

use crate::error::{Error, Result};

/// Resolve a slot, falling back to `fallback` when nothing qualifies.
///
/// # Errors
///
/// Returns [`Error::ComponentNotFound`] when the slot resolves to nothing
/// and no fallback was supplied.
pub fn get_component(
    registry: &ComponentRegistry,
    path: &str,
    fallback: Option<&Component>,
) -> Result<Component> {
    registry
        .resolve(path)
        .or_else(|| fallback.cloned())
        .ok_or_else(|| Error::ComponentNotFound {
            path: path.to_string(),
        })
}

/// Whether a slot currently resolves to an injected component.
pub fn is_injected(registry: &ComponentRegistry, path: &str) -> bool {
    registry.resolve(path).is_some()
}

/// A component whose implementation is looked up on every render.
///
/// Renders whatever the slot resolves to, or the wrapped original when
/// nothing qualifies. Props and children are forwarded unchanged.
pub struct Injectable {
    path: String,
    original: Component,
    registry: Arc<ComponentRegistry>,
}

impl Injectable {
    /// Wrap `original` so it resolves through `path` on each render.
    pub fn new(
        registry: Arc<ComponentRegistry>,
        path: impl Into<String>,
        original: Component,
    ) -> Self {
        Self {
            path: path.into(),
            original,
            registry,
        }
    }

    /// The slot this wrapper reads.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The component that would render right now.
    pub fn current(&self) -> Component {
        self.registry
            .resolve(&self.path)
            .unwrap_or_else(|| self.original.clone())
    }
}

impl Render for Injectable {
    fn name(&self) -> &str {
        self.original.name()
    }

    fn render(&self, props: &Props, children: Vec<Node>) -> Node {
        self.current().render(props, children)
    }
}

/// Make `original` injectable at `path`.
pub fn injectable(
    registry: Arc<ComponentRegistry>,
    path: impl Into<String>,
    original: Component,
) -> Component {
    Component::new(Injectable::new(registry, path, original))
}
