//! Component, props and params builders.

use overlay_registry::{Component, Metadata, PageConfig, PageRegistry, Params, Props};
use serde_json::Value;

/// A component rendering an element named `name` with the props and
/// children it receives.
pub fn marker(name: &str) -> Component {
    Component::element(name)
}

/// Build string-valued props.
pub fn props(pairs: &[(&str, &str)]) -> Props {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

/// Build route params.
pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A page registry shaped like the marketplace base application:
///
/// - `/` home page
/// - `/services/[id]` service detail with metadata
/// - `/admin/settings` behind the `admin` permission and `settings` feature
pub fn storefront_pages() -> PageRegistry {
    let mut pages = PageRegistry::new();
    pages
        .register_base_page("/", PageConfig::new(marker("Home")))
        .expect("home page has a component");
    pages
        .register_base_page(
            "/services/[id]",
            PageConfig::new(marker("ServiceDetail"))
                .with_layout(marker("MarketLayout"))
                .with_metadata(
                    Metadata::new()
                        .with("title", "Service")
                        .with("description", "Service detail"),
                ),
        )
        .expect("service page has a component");
    pages
        .register_base_page(
            "/admin/settings",
            PageConfig::new(marker("Settings"))
                .with_permissions(["admin"])
                .with_features(["settings"]),
        )
        .expect("settings page has a component");
    pages
}
