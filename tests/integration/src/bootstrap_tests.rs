//! Bootstrap tests
//!
//! A base application plus one override set, loaded from code and from
//! TOML manifests, then read through the frozen registries.

use overlay_core::{
    BaseLayer, ComponentCatalog, ConfigProvider, OverrideConfig, OverrideManifest,
    RuntimeSettings, bootstrap, validate_config,
};
use overlay_registry::{
    ComponentRegistry, Conditions, InjectionItem, Metadata, PageConfig, PageExtension,
    PageMetadata, PageRegistry, Props,
};
use overlay_test_utils::{TestManifest, marker, params};
use pretty_assertions::assert_eq;

/// The marketplace base application
struct Marketplace;

impl BaseLayer for Marketplace {
    fn register_pages(&self, pages: &mut PageRegistry) -> overlay_registry::Result<()> {
        pages.register_base_page("/", PageConfig::new(marker("Home")))?;
        pages.register_base_page(
            "/services/[id]",
            PageConfig::new(marker("ServiceDetail"))
                .with_layout(marker("MarketLayout"))
                .with_metadata(PageMetadata::dynamic(|params| {
                    let id = params.get("id").cloned().unwrap_or_default();
                    async move { Metadata::new().with("title", format!("Service #{}", id)) }
                })),
        )?;
        pages.register_base_page(
            "/dashboard",
            PageConfig::new(marker("Dashboard")).with_permissions(["member"]),
        )
    }

    fn register_components(&self, components: &mut ComponentRegistry) {
        components.register("/header", InjectionItem::new(marker("Header")));
        components.register("/footer", InjectionItem::new(marker("Footer")));
    }
}

fn catalog() -> ComponentCatalog {
    ComponentCatalog::new()
        .with("BrandHeader", marker("BrandHeader"))
        .with("BrandService", marker("BrandService"))
        .with("ProdFooter", marker("ProdFooter"))
        .with("Careers", marker("Careers"))
}

const OVERRIDES: &str = r#"
[pages."/services/[id]"]
component = "BrandService"
metadata = { description = "Branded service" }
priority = 2

[pages."/careers"]
component = "Careers"
features = ["hiring"]

[[components."/header"]]
component = "BrandHeader"
priority = 10

[[components."/footer"]]
component = "ProdFooter"
priority = 5
env = ["production"]
"#;

#[tokio::test]
async fn manifest_overrides_base_application() {
    let manifest = TestManifest::new(OVERRIDES);
    let overrides = OverrideManifest::load(manifest.path())
        .unwrap()
        .to_config(&catalog())
        .unwrap();
    assert!(validate_config(&overrides).is_valid);

    let registries = bootstrap(&RuntimeSettings::default(), &Marketplace, overrides).unwrap();
    let factory = registries.page_factory();

    let node = factory.render_path("/services/12", &params(&[]));
    assert_eq!(node.name(), Some("MarketLayout"));
    assert_eq!(node.children()[0].name(), Some("BrandService"));

    let metadata = factory
        .generate_metadata("/services/12", &params(&[("id", "12")]))
        .await;
    assert_eq!(metadata.title(), Some("Service #12"));
    assert_eq!(metadata.description(), Some("Branded service"));

    assert!(factory.check_page_features("/careers", &["hiring"]));
    assert!(!factory.check_page_features::<&str>("/careers", &[]));
    assert!(registries.pages.has_page("/careers"));
}

#[test]
fn slot_resolution_depends_on_environment() {
    let load = |environment: &str| {
        let overrides = OverrideManifest::parse(OVERRIDES)
            .unwrap()
            .to_config(&catalog())
            .unwrap();
        let settings = RuntimeSettings::default().with_environment(environment);
        bootstrap(&settings, &Marketplace, overrides).unwrap()
    };

    let dev = load("development");
    assert_eq!(dev.get_component("/header", None).unwrap().name(), "BrandHeader");
    assert_eq!(dev.get_component("/footer", None).unwrap().name(), "Footer");

    let prod = load("production");
    assert_eq!(prod.get_component("/footer", None).unwrap().name(), "ProdFooter");
}

#[test]
fn injectable_reads_shared_registry() {
    let overrides = OverrideConfig::new().component(
        "/card",
        InjectionItem::new(marker("BrandCard"))
            .with_conditions(Conditions::new().with_custom(|| true)),
    );
    let registries = bootstrap(&RuntimeSettings::default(), &Marketplace, overrides).unwrap();

    let card = registries.injectable("/card", marker("Card"));
    let rendered = card.render(&Props::new(), vec![]);
    assert_eq!(rendered.name(), Some("BrandCard"));

    let plain = registries.injectable("/nothing-here", marker("Plain"));
    assert_eq!(plain.render(&Props::new(), vec![]).name(), Some("Plain"));
    assert!(registries.is_injected("/card"));
    assert!(!registries.is_injected("/nothing-here"));
}

#[test]
fn provider_lifecycle() {
    let mut provider = ConfigProvider::new(&RuntimeSettings::default());
    provider
        .initialize(
            &Marketplace,
            OverrideConfig::new().page(
                "/dashboard",
                PageExtension::new().with_permissions(["member", "staff"]),
            ),
        )
        .unwrap();

    let dashboard = provider.get_page_config("/dashboard").unwrap();
    assert_eq!(
        dashboard.permissions,
        Some(vec!["member".to_string(), "staff".to_string()])
    );
    assert_eq!(dashboard.component.unwrap().name(), "Dashboard");
    assert!(provider.get_page_config("/missing").is_none());
    assert!(!provider.has_page_config("/missing"));

    provider.clear();
    for path in ["/", "/services/1", "/dashboard"] {
        assert!(!provider.has_page_config(path), "{} still registered", path);
    }
    assert!(!provider.components().contains("/header"));
}

#[test]
fn declared_base_from_manifest() {
    let manifest = OverrideManifest::parse(
        r#"
[base."/"]
component = "Home"

[base."/docs/[slug]"]
component = "Doc"
permissions = ["reader"]

[pages."/docs/[slug]"]
component = "BrandDoc"
"#,
    )
    .unwrap();
    let catalog = ComponentCatalog::placeholders_for(&manifest);
    let base = manifest.to_base(&catalog).unwrap();
    let overrides = manifest.to_config(&catalog).unwrap();

    let registries = bootstrap(&RuntimeSettings::default(), &base, overrides).unwrap();
    let factory = registries.page_factory();

    let decision = factory.validate_page_access::<_, &str>("/docs/intro", &["reader"], &[]);
    assert!(decision.can_access);
    assert_eq!(
        serde_json::to_value(&decision).unwrap(),
        serde_json::json!({ "canAccess": true })
    );
    assert_eq!(
        factory.render_path("/docs/intro", &params(&[])).name(),
        Some("BrandDoc")
    );
}

#[test]
fn unknown_component_name_is_rejected() {
    let manifest = OverrideManifest::parse(
        r#"
[pages."/x"]
component = "Nobody"
"#,
    )
    .unwrap();
    let err = manifest.to_config(&ComponentCatalog::new()).unwrap_err();
    assert!(err.to_string().contains("Nobody"));
}
