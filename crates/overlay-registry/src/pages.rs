//! Page registry
//!
//! Base pages are keyed by an exact path pattern. Extensions are stacked
//! per pattern, kept in descending priority order, and folded over the
//! base at resolution time. Where extensions set the same field the
//! higher priority wins; among equal priorities the earlier registration
//! wins.
//!
//! Both stores keep insertion order. When two distinct patterns match the
//! same concrete path, the one registered first wins; there is no
//! "most specific pattern" rule.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::page::{PageConfig, PageExtension};
use crate::route::{self, Params, RouteMatch};

/// Registry of base pages and their extensions.
#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    pages: IndexMap<String, PageConfig>,
    extensions: IndexMap<String, Vec<PageExtension>>,
}

impl PageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) the base page for a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingComponent`] if `config` has no component.
    pub fn register_base_page(
        &mut self,
        path: impl Into<String>,
        config: PageConfig,
    ) -> Result<()> {
        let path = path.into();
        if config.component.is_none() {
            return Err(Error::MissingComponent { path });
        }
        tracing::debug!(pattern = %path, "Registering base page");
        self.pages.insert(path, config);
        Ok(())
    }

    /// Append extensions, keeping each pattern's list sorted by descending
    /// priority. Equal priorities keep registration order.
    pub fn register_extensions<I, K>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = (K, Vec<PageExtension>)>,
        K: Into<String>,
    {
        for (path, list) in extensions {
            let path = path.into();
            // An empty list must not make the pattern resolvable
            if list.is_empty() {
                tracing::debug!(pattern = %path, "Skipping empty extension list");
                continue;
            }
            tracing::debug!(pattern = %path, count = list.len(), "Registering page extensions");
            let stack = self.extensions.entry(path).or_default();
            stack.extend(list);
            stack.sort_by(|a, b| b.priority.cmp(&a.priority));
        }
    }

    /// Append a single extension.
    pub fn register_extension(&mut self, path: impl Into<String>, extension: PageExtension) {
        self.register_extensions([(path.into(), vec![extension])]);
    }

    /// Find the registered pattern serving `path`.
    ///
    /// An exact key wins. Otherwise patterns are scanned in registration
    /// order (base pages first, then patterns that only carry extensions)
    /// and the first structural match is taken.
    pub fn match_pattern(&self, path: &str) -> Option<RouteMatch> {
        if self.pages.contains_key(path) || self.extensions.contains_key(path) {
            return Some(RouteMatch {
                pattern: path.to_string(),
                params: Params::new(),
            });
        }

        let segments = route::split_segments(path);
        self.patterns().into_iter().find_map(|pattern| {
            route::match_segments(&route::split_segments(pattern), &segments).map(|params| {
                RouteMatch {
                    pattern: pattern.to_string(),
                    params,
                }
            })
        })
    }

    /// Resolve the effective config for a concrete path.
    pub fn resolve_page(&self, path: &str) -> Option<PageConfig> {
        let matched = self.match_pattern(path)?;
        Some(self.fold(&matched.pattern))
    }

    /// Resolve every registered pattern, in registration order.
    pub fn get_all_pages(&self) -> IndexMap<String, PageConfig> {
        self.patterns()
            .into_iter()
            .map(|pattern| (pattern.to_string(), self.fold(pattern)))
            .collect()
    }

    /// Whether some registered pattern serves `path`.
    pub fn has_page(&self, path: &str) -> bool {
        self.match_pattern(path).is_some()
    }

    /// The base page registered under an exact pattern.
    pub fn base_page(&self, pattern: &str) -> Option<&PageConfig> {
        self.pages.get(pattern)
    }

    /// Extensions registered under an exact pattern, highest priority first.
    pub fn extensions(&self, pattern: &str) -> &[PageExtension] {
        self.extensions
            .get(pattern)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every registered pattern: base pages first, then extension-only
    /// patterns, each in registration order.
    pub fn patterns(&self) -> Vec<&str> {
        self.pages
            .keys()
            .chain(
                self.extensions
                    .keys()
                    .filter(|k| !self.pages.contains_key(k.as_str())),
            )
            .map(String::as_str)
            .collect()
    }

    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.patterns().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.extensions.is_empty()
    }

    /// Remove all base pages and extensions.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.extensions.clear();
    }

    fn fold(&self, pattern: &str) -> PageConfig {
        let mut config = self.pages.get(pattern).cloned().unwrap_or_default();
        // Apply lowest priority first so higher priorities overwrite.
        for extension in self.extensions(pattern).iter().rev() {
            config.apply(extension);
        }
        config
    }
}
