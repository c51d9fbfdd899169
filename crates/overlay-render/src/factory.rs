//! Page composition
//!
//! The `PageFactory` turns a resolved [`PageConfig`] into a render tree
//! and answers metadata and access questions for a path. Every operation
//! is a pure function of the registry contents and its arguments.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use overlay_registry::{
    Component, Metadata, Node, PageConfig, PageRegistry, Params, Props, props_from_pairs,
};

/// Reason given when no pattern serves a path.
pub const REASON_NOT_FOUND: &str = "Page not found";
/// Reason given when the user holds none of the declared permissions.
pub const REASON_PERMISSIONS: &str = "Insufficient permissions";
/// Reason given when a declared feature is disabled.
pub const REASON_FEATURES: &str = "Required features not enabled";

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    pub can_access: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AccessDecision {
    /// Access granted.
    pub fn allowed() -> Self {
        Self {
            can_access: true,
            reason: None,
        }
    }

    /// Access refused for `reason`.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            can_access: false,
            reason: Some(reason.into()),
        }
    }
}

/// Any-of check: true when nothing is declared or the user holds at least
/// one declared permission.
pub fn permits<S: AsRef<str>>(declared: &[String], granted: &[S]) -> bool {
    declared.is_empty()
        || declared
            .iter()
            .any(|p| granted.iter().any(|g| g.as_ref() == p))
}

/// All-of check: true when nothing is declared or every declared feature
/// is enabled.
pub fn features_enabled<S: AsRef<str>>(declared: &[String], enabled: &[S]) -> bool {
    declared
        .iter()
        .all(|f| enabled.iter().any(|e| e.as_ref() == f))
}

fn params_value(params: &Params) -> Value {
    Value::Object(props_from_pairs(params))
}

/// Composes pages from a [`PageRegistry`].
#[derive(Debug, Clone)]
pub struct PageFactory<'a> {
    pages: &'a PageRegistry,
    fallback: Option<Component>,
}

impl<'a> PageFactory<'a> {
    /// Create a factory over `pages`.
    pub fn new(pages: &'a PageRegistry) -> Self {
        Self {
            pages,
            fallback: None,
        }
    }

    /// Render `fallback` instead of the default error view for unknown paths.
    pub fn with_fallback(mut self, fallback: Component) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// The resolved config for `path`.
    pub fn page_config(&self, path: &str) -> Option<PageConfig> {
        self.pages.resolve_page(path)
    }

    /// Render the page serving `path`.
    ///
    /// `params` and `search_params` reach the page component unmodified as
    /// the `params` and `searchParams` props. A layout, when configured,
    /// wraps the page and receives the rendered page as its only child.
    pub fn render(&self, path: &str, params: &Params, search_params: &Params) -> Node {
        let Some(config) = self.pages.resolve_page(path) else {
            tracing::debug!(path, "No page registered; rendering fallback");
            return match &self.fallback {
                Some(fallback) => fallback.render(&Props::new(), Vec::new()),
                None => Node::error(format!("Page not found: {}", path)),
            };
        };

        let Some(component) = &config.component else {
            tracing::warn!(path, "Resolved page has no component");
            return match &config.error {
                Some(error) => error.render(&Props::new(), Vec::new()),
                None => Node::error(format!("Page has no component: {}", path)),
            };
        };

        let mut props = Props::new();
        props.insert("params".to_string(), params_value(params));
        props.insert("searchParams".to_string(), params_value(search_params));
        let page = component.render(&props, Vec::new());

        match &config.layout {
            Some(layout) => {
                let mut layout_props = Props::new();
                layout_props.insert("params".to_string(), params_value(params));
                layout.render(&layout_props, vec![page])
            }
            None => page,
        }
    }

    /// Render `path` with params captured from its matched pattern.
    pub fn render_path(&self, path: &str, search_params: &Params) -> Node {
        let params = self
            .pages
            .match_pattern(path)
            .map(|m| m.params)
            .unwrap_or_default();
        self.render(path, &params, search_params)
    }

    /// The page's loading view, if it declares one.
    pub fn render_loading(&self, path: &str) -> Option<Node> {
        let config = self.pages.resolve_page(path)?;
        config
            .loading
            .map(|loading| loading.render(&Props::new(), Vec::new()))
    }

    /// Document metadata for `path`.
    ///
    /// Pages without metadata (and unknown paths) get the generic record.
    /// Function metadata is invoked with `params` and awaited.
    pub async fn generate_metadata(&self, path: &str, params: &Params) -> Metadata {
        match self.pages.resolve_page(path).and_then(|c| c.metadata) {
            Some(metadata) => metadata.evaluate(params).await,
            None => Metadata::generic(),
        }
    }

    /// Whether the user may open `path` (any-of). Unknown paths are denied.
    pub fn check_page_permissions<S: AsRef<str>>(
        &self,
        path: &str,
        user_permissions: &[S],
    ) -> bool {
        self.pages
            .resolve_page(path)
            .is_some_and(|c| permits(c.required_permissions(), user_permissions))
    }

    /// Whether every feature `path` needs is enabled (all-of). Unknown paths
    /// are denied.
    pub fn check_page_features<S: AsRef<str>>(
        &self,
        path: &str,
        enabled_features: &[S],
    ) -> bool {
        self.pages
            .resolve_page(path)
            .is_some_and(|c| features_enabled(c.required_features(), enabled_features))
    }

    /// Combined access check: existence, then permissions, then features.
    pub fn validate_page_access<P, F>(
        &self,
        path: &str,
        user_permissions: &[P],
        enabled_features: &[F],
    ) -> AccessDecision
    where
        P: AsRef<str>,
        F: AsRef<str>,
    {
        let Some(config) = self.pages.resolve_page(path) else {
            return AccessDecision::denied(REASON_NOT_FOUND);
        };
        if !permits(config.required_permissions(), user_permissions) {
            return AccessDecision::denied(REASON_PERMISSIONS);
        }
        if !features_enabled(config.required_features(), enabled_features) {
            return AccessDecision::denied(REASON_FEATURES);
        }
        AccessDecision::allowed()
    }
}
