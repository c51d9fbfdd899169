//! Registry scenarios
//!
//! End-to-end behavior of page resolution, slot resolution and page
//! access, driven through the public APIs of the registry and render
//! crates.

use overlay_registry::{
    ComponentRegistry, ConditionError, Conditions, InjectionItem, Metadata, PageConfig,
    PageExtension, PageRegistry,
};
use overlay_render::{PageFactory, get_component, is_injected};
use overlay_test_utils::{marker, params, storefront_pages};
use pretty_assertions::assert_eq;

// =============================================================================
// Page resolution
// =============================================================================

#[test]
fn dynamic_base_page_serves_concrete_path() {
    let service = marker("ServiceDetail");
    let mut pages = PageRegistry::new();
    pages
        .register_base_page("/srv/[id]", PageConfig::new(service.clone()))
        .unwrap();

    assert_eq!(pages.resolve_page("/srv/42").unwrap().component, Some(service));
    assert!(pages.has_page("/srv/anything"));
    assert!(!pages.has_page("/srv/a/b"));
    assert!(!pages.has_page("/srv"));
}

#[test]
fn extension_replaces_base_component() {
    let base = marker("Base");
    let replacement = marker("Override");
    let mut pages = PageRegistry::new();
    pages.register_base_page("/a", PageConfig::new(base)).unwrap();
    pages.register_extensions([(
        "/a",
        vec![PageExtension::new()
            .with_component(replacement.clone())
            .with_priority(1)],
    )]);

    assert_eq!(pages.resolve_page("/a").unwrap().component, Some(replacement));
}

#[test]
fn metadata_conflicts_go_to_higher_priority() {
    let high = PageExtension::new()
        .with_metadata(Metadata::new().with("title", "A"))
        .with_priority(10);
    let low = PageExtension::new()
        .with_metadata(Metadata::new().with("title", "B").with("description", "D"))
        .with_priority(5);

    for order in [vec![high.clone(), low.clone()], vec![low, high]] {
        let mut pages = PageRegistry::new();
        pages
            .register_base_page("/p", PageConfig::new(marker("Page")))
            .unwrap();
        pages.register_extensions([("/p", order)]);

        let resolved = pages.resolve_page("/p").unwrap();
        let metadata = resolved.metadata.unwrap();
        let metadata = metadata.as_static().unwrap();
        assert_eq!(metadata.title(), Some("A"));
        assert_eq!(metadata.description(), Some("D"));
    }
}

#[test]
fn extension_only_pattern_resolves_without_base() {
    let mut pages = PageRegistry::new();
    pages.register_extension(
        "/promo/[code]",
        PageExtension::new().with_component(marker("Promo")),
    );

    let resolved = pages.resolve_page("/promo/SPRING").unwrap();
    assert_eq!(resolved.component.unwrap().name(), "Promo");
    assert_eq!(pages.match_pattern("/promo/SPRING").unwrap().params["code"], "SPRING");
}

#[test]
fn overlapping_patterns_resolve_in_registration_order() {
    let mut pages = PageRegistry::new();
    pages
        .register_base_page("/items/[id]", PageConfig::new(marker("Item")))
        .unwrap();
    pages
        .register_base_page("/items/featured", PageConfig::new(marker("Featured")))
        .unwrap();

    // Exact keys win before any pattern scan
    assert_eq!(
        pages.resolve_page("/items/featured").unwrap().component.unwrap().name(),
        "Featured"
    );
    assert_eq!(
        pages.match_pattern("/items/7").unwrap().pattern,
        "/items/[id]"
    );
}

#[test]
fn missing_page_and_clear() {
    let mut pages = PageRegistry::new();
    assert!(pages.resolve_page("/missing").is_none());
    assert!(!pages.has_page("/missing"));

    pages.register_base_page("/a", PageConfig::new(marker("A"))).unwrap();
    pages.register_extension("/b/[id]", PageExtension::new().with_priority(3));
    assert!(pages.has_page("/a"));
    assert!(pages.has_page("/b/1"));

    pages.clear();
    assert!(!pages.has_page("/a"));
    assert!(!pages.has_page("/b/1"));
    assert!(pages.get_all_pages().is_empty());
}

// =============================================================================
// Component slots
// =============================================================================

#[test]
fn environment_condition_skips_candidate() {
    let c2 = marker("C2");
    let mut components = ComponentRegistry::new("development");
    components.register(
        "/X",
        InjectionItem::new(marker("C1"))
            .with_priority(5)
            .with_conditions(Conditions::new().with_env(["production"])),
    );
    components.register("/X", InjectionItem::new(c2.clone()).with_priority(1));

    assert_eq!(components.resolve("/X"), Some(c2));
}

#[test]
fn highest_priority_unconditioned_candidate_wins() {
    let winner = marker("Winner");
    let mut components = ComponentRegistry::default();
    for (name, priority) in [("Low", -3), ("Mid", 4)] {
        components.register("/slot", InjectionItem::new(marker(name)).with_priority(priority));
    }
    components.register("/slot", InjectionItem::new(winner.clone()).with_priority(9));

    assert_eq!(components.resolve("/slot"), Some(winner));
    assert_eq!(components.get_all("/slot").len(), 3);
}

#[test]
fn failing_predicate_falls_through() {
    let fallback = marker("Fallback");
    let mut components = ComponentRegistry::default();
    components.register(
        "/checkout",
        InjectionItem::new(marker("Broken"))
            .with_priority(10)
            .with_conditions(
                Conditions::new().with_fallible(|| Err(ConditionError::new("flag service down"))),
            ),
    );
    components.register(
        "/checkout",
        InjectionItem::new(marker("Panicky"))
            .with_priority(8)
            .with_conditions(Conditions::new().with_custom(|| panic!("predicate bug"))),
    );
    components.register("/checkout", InjectionItem::new(fallback.clone()));

    assert_eq!(components.resolve("/checkout"), Some(fallback));
}

#[test]
fn all_candidates_failing_resolves_to_none() {
    let mut components = ComponentRegistry::default();
    components.register(
        "/only",
        InjectionItem::new(marker("Broken"))
            .with_conditions(Conditions::new().with_fallible(|| Err(ConditionError::new("boom")))),
    );

    assert_eq!(components.resolve("/only"), None);
    assert!(!is_injected(&components, "/only"));
    assert!(get_component(&components, "/only", None).is_err());
    let default = marker("Default");
    assert_eq!(
        get_component(&components, "/only", Some(&default)).unwrap(),
        default
    );
}

#[test]
fn feature_condition_does_not_filter() {
    let gated = marker("Gated");
    let mut components = ComponentRegistry::default();
    components.register(
        "/beta",
        InjectionItem::new(gated.clone())
            .with_conditions(Conditions::new().with_features(["beta"])),
    );

    assert_eq!(components.resolve("/beta"), Some(gated));
}

#[test]
fn cleared_slots_are_not_injected() {
    let mut components = ComponentRegistry::default();
    components.register("/header", InjectionItem::new(marker("Header")));
    assert!(is_injected(&components, "/header"));

    components.clear();
    assert!(!is_injected(&components, "/header"));
    assert!(components.is_empty());
}

// =============================================================================
// Page access
// =============================================================================

#[test]
fn access_checks_follow_any_and_all_rules() {
    let mut pages = PageRegistry::new();
    pages
        .register_base_page(
            "/reports",
            PageConfig::new(marker("Reports"))
                .with_permissions(["a", "b"])
                .with_features(["a", "b"]),
        )
        .unwrap();
    let factory = PageFactory::new(&pages);

    assert!(factory.check_page_permissions("/reports", &["b"]));
    assert!(!factory.check_page_permissions("/reports", &["c"]));
    assert!(!factory.check_page_features("/reports", &["a"]));
    assert!(factory.check_page_features("/reports", &["b", "a"]));
}

#[test]
fn validate_page_access_reports_first_failure() {
    let pages = storefront_pages();
    let factory = PageFactory::new(&pages);

    let missing = factory.validate_page_access("/nowhere", &["admin"], &["settings"]);
    assert!(!missing.can_access);
    assert_eq!(missing.reason.as_deref(), Some("Page not found"));

    let no_perm = factory.validate_page_access::<&str, &str>("/admin/settings", &[], &[]);
    assert_eq!(no_perm.reason.as_deref(), Some("Insufficient permissions"));

    let no_feature = factory.validate_page_access::<_, &str>("/admin/settings", &["admin"], &[]);
    assert_eq!(no_feature.reason.as_deref(), Some("Required features not enabled"));

    let ok = factory.validate_page_access("/admin/settings", &["admin"], &["settings"]);
    assert!(ok.can_access);
    assert_eq!(ok.reason, None);

    assert!(factory.validate_page_access::<&str, &str>("/", &[], &[]).can_access);
}

#[test]
fn render_passes_params_to_page_inside_layout() {
    let pages = storefront_pages();
    let node = PageFactory::new(&pages).render(
        "/services/9",
        &params(&[("id", "9")]),
        &params(&[("ref", "mail")]),
    );

    assert_eq!(node.name(), Some("MarketLayout"));
    let page = &node.children()[0];
    assert_eq!(page.name(), Some("ServiceDetail"));
    assert_eq!(page.props().unwrap()["params"]["id"], "9");
    assert_eq!(page.props().unwrap()["searchParams"]["ref"], "mail");
}

#[test]
fn render_unknown_path_uses_fallback() {
    let pages = storefront_pages();
    let factory = PageFactory::new(&pages);
    assert_eq!(
        factory.render_path("/nowhere", &params(&[])).error_message(),
        Some("Page not found: /nowhere")
    );

    let with_fallback = PageFactory::new(&pages).with_fallback(marker("NotFound"));
    assert_eq!(
        with_fallback.render_path("/nowhere", &params(&[])).name(),
        Some("NotFound")
    );
}

#[tokio::test]
async fn metadata_defaults_and_dynamic_values() {
    let mut pages = storefront_pages();
    pages.register_extension(
        "/services/[id]",
        PageExtension::new().with_metadata(overlay_registry::PageMetadata::from_fn(|params| {
            Metadata::new().with("title", format!("Service {}", params["id"]))
        })),
    );
    let factory = PageFactory::new(&pages);

    let generic = factory.generate_metadata("/", &params(&[])).await;
    assert_eq!(generic.title(), Some("Page"));
    assert_eq!(generic.description(), Some("Page description"));

    let service = factory
        .generate_metadata("/services/5", &params(&[("id", "5")]))
        .await;
    assert_eq!(service.title(), Some("Service 5"));
    assert_eq!(service.description(), Some("Service detail"));
}
