//! Shared test utilities for the overlay workspace.
//!
//! This crate provides fixtures used across crate test suites. It is a
//! dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`fixtures`] - component, props and params builders plus a sample
//!   page registry
//! - [`manifest`] - [`TestManifest`] for tests that read override
//!   manifests from disk

pub mod fixtures;
pub mod manifest;

pub use fixtures::{marker, params, props, storefront_pages};
pub use manifest::TestManifest;
