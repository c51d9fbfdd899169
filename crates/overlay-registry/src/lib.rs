//! Page and component override registries for Overlay.
//!
//! A base application registers default pages and components; a
//! customization layer registers priority-ranked overrides for specific
//! paths. Both registries resolve deterministically and never perform I/O.

pub mod component;
pub mod condition;
pub mod error;
pub mod page;
pub mod pages;
pub mod route;
pub mod slots;

/// Environment assumed when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "development";

pub use component::{Component, Node, Props, Render, props_from_pairs};
pub use condition::{ConditionError, ConditionOutcome, Conditions, CustomCondition, Rejection};
pub use error::{Error, Result};
pub use page::{Metadata, MetadataFn, MetadataFuture, PageConfig, PageExtension, PageMetadata};
pub use pages::PageRegistry;
pub use route::{Params, RouteMatch};
pub use slots::{ComponentRegistry, InjectionItem};
