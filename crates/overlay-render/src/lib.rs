//! Page composition and component injection for Overlay.
//!
//! This crate reads the registries built by `overlay-registry`: the
//! [`PageFactory`] renders pages and answers access questions, and the
//! injection helpers resolve overridable component slots at render time.

pub mod error;
pub mod factory;
pub mod inject;

pub use error::{Error, Result};
pub use factory::{
    AccessDecision, PageFactory, REASON_FEATURES, REASON_NOT_FOUND, REASON_PERMISSIONS,
    features_enabled, permits,
};
pub use inject::{Injectable, get_component, injectable, is_injected};
