//! Renderable units and the render tree they produce.
//!
//! A [`Component`] is an identity-comparable handle over anything that
//! implements [`Render`]. Two handles are equal only when they point at the
//! same registered unit, which is what resolution and tests compare on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Properties handed to a renderable unit.
pub type Props = Map<String, Value>;

/// A rendered tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// A named element with props and children
    Element {
        name: String,
        #[serde(default, skip_serializing_if = "Map::is_empty")]
        props: Props,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Node>,
    },
    /// Plain text
    Text { text: String },
    /// Error view with a user-visible message
    Error { message: String },
    /// Renders nothing
    Empty,
}

impl Node {
    /// Create an element with no props and no children.
    pub fn element(name: impl Into<String>) -> Self {
        Self::Element {
            name: name.into(),
            props: Props::new(),
            children: Vec::new(),
        }
    }

    /// A text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// An error view carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Element name, if this node is an element.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Element props, if this node is an element.
    pub fn props(&self) -> Option<&Props> {
        match self {
            Self::Element { props, .. } => Some(props),
            _ => None,
        }
    }

    /// Child nodes. Non-element nodes have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Error message, if this node is an error view.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Anything that can turn props and children into a [`Node`].
pub trait Render: Send + Sync {
    /// Display name, used in logs and debug output.
    fn name(&self) -> &str;

    fn render(&self, props: &Props, children: Vec<Node>) -> Node;
}

struct FnRender<F> {
    name: String,
    f: F,
}

impl<F> Render for FnRender<F>
where
    F: Fn(&Props, Vec<Node>) -> Node + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, props: &Props, children: Vec<Node>) -> Node {
        (self.f)(props, children)
    }
}

/// Shared handle to a renderable unit.
#[derive(Clone)]
pub struct Component {
    inner: Arc<dyn Render>,
}

impl Component {
    /// Wrap a renderable unit in a new handle.
    pub fn new<R: Render + 'static>(render: R) -> Self {
        Self {
            inner: Arc::new(render),
        }
    }

    /// Build a component from a closure.
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Props, Vec<Node>) -> Node + Send + Sync + 'static,
    {
        Self::new(FnRender {
            name: name.into(),
            f,
        })
    }

    /// A component that renders an element named `name`, carrying the props
    /// and children it was given.
    pub fn element(name: impl Into<String>) -> Self {
        let name = name.into();
        let element_name = name.clone();
        Self::from_fn(name, move |props, children| Node::Element {
            name: element_name.clone(),
            props: props.clone(),
            children,
        })
    }

    /// The component's display name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Render with `props` and `children`.
    pub fn render(&self, props: &Props, children: Vec<Node>) -> Node {
        self.inner.render(props, children)
    }

    /// Whether both handles refer to the same registered unit.
    pub fn ptr_eq(&self, other: &Component) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Component {}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.name()).finish()
    }
}

/// Convert a string map into props, one string value per key.
pub fn props_from_pairs<'a, I>(pairs: I) -> Props
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect()
}
