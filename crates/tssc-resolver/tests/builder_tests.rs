//! End-to-end topology builds over in-memory and on-disk charts.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tssc_chartfs::{Chart, ChartFs};
use tssc_config::{Config, Product};
use tssc_integrations::{IntegrationRegistry, StaticIntegrations};
use tssc_resolver::{AnnotationKeys, Error, TopologyBuilder, disable_superseded_products};
use tssc_test_utils::{ChartSpec, SAMPLE_CONFIG, TestInstaller, charts};

fn integrations(configured: &[&str]) -> StaticIntegrations {
    StaticIntegrations::new(IntegrationRegistry::with_builtins(), configured.to_vec()).unwrap()
}

fn config() -> Config {
    Config::new(
        "tssc",
        vec![
            Product::new("ACS").with_namespace("tssc-acs"),
            Product::new("Developer Hub").with_namespace("tssc-dh"),
        ],
    )
}

fn openshift() -> ChartSpec {
    ChartSpec::new("tssc-openshift")
}

fn acs() -> ChartSpec {
    ChartSpec::new("tssc-acs")
        .product("ACS")
        .depends_on(&["tssc-openshift"])
        .use_product_namespace()
        .provides(&["acs"])
}

fn dh(requires: &str) -> ChartSpec {
    ChartSpec::new("tssc-dh")
        .product("Developer Hub")
        .depends_on(&["tssc-openshift"])
        .requires(requires)
}

#[test]
fn test_build_orders_and_places_charts() {
    let builder = TopologyBuilder::new(
        charts(&[dh("acs").depends_on(&["tssc-acs"]), acs(), openshift()]),
        integrations(&[]),
    );
    let topology = builder.build(&config()).unwrap();

    assert_eq!(topology.names(), vec!["tssc-openshift", "tssc-acs", "tssc-dh"]);
    assert_eq!(
        topology.get_dependency("tssc-acs").unwrap().namespace(),
        Some("tssc-acs")
    );
    assert_eq!(
        topology.get_dependency("tssc-openshift").unwrap().namespace(),
        Some("tssc")
    );
    assert_eq!(
        topology.get_dependency("tssc-dh").unwrap().namespace(),
        Some("tssc")
    );
}

#[test]
fn test_missing_integrations() {
    let builder = TopologyBuilder::new(
        charts(&[openshift(), acs(), dh("acs && github")]),
        integrations(&[]),
    );
    let err = builder.build(&config()).unwrap_err();

    match &err {
        Error::MissingIntegrations {
            dependency,
            product,
            missing,
            ..
        } => {
            assert_eq!(dependency, "tssc-dh");
            assert_eq!(product.as_deref(), Some("Developer Hub"));
            assert_eq!(missing, &vec!["github".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_integration_error());
}

#[test]
fn test_configured_integration_satisfies_requirement() {
    let builder = TopologyBuilder::new(
        charts(&[openshift(), acs(), dh("acs && (github || gitlab)")]),
        integrations(&["gitlab"]),
    );
    let topology = builder.build(&config()).unwrap();
    assert_eq!(topology.len(), 3);
}

#[test]
fn test_prerequisite_integration() {
    // No edge to tssc-acs and a heavier weight: it lands after tssc-dh.
    let builder = TopologyBuilder::new(
        charts(&[openshift(), acs().weight(10), dh("acs")]),
        integrations(&[]),
    );
    let err = builder.build(&config()).unwrap_err();

    match &err {
        Error::PrerequisiteIntegration {
            dependency,
            providers,
            ..
        } => {
            assert_eq!(dependency, "tssc-dh");
            assert_eq!(
                providers,
                &vec![("acs".to_string(), "tssc-acs".to_string())]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_integration_error());
}

#[test]
fn test_disabled_provider_means_missing() {
    let mut config = config();
    config.set_product_enabled("ACS", false).unwrap();
    let builder = TopologyBuilder::new(
        charts(&[openshift(), acs(), dh("acs")]),
        integrations(&[]),
    );
    let err = builder.build(&config).unwrap_err();
    assert!(
        matches!(&err, Error::MissingIntegrations { missing, .. } if missing == &vec!["acs".to_string()]),
        "got: {err}"
    );
}

#[test]
fn test_configured_integration_conflicts_with_provider() {
    let builder = TopologyBuilder::new(charts(&[openshift(), acs()]), integrations(&["acs"]));
    let err = builder.build(&config()).unwrap_err();
    assert!(
        matches!(&err, Error::ConfiguredIntegration { integration, dependency, .. }
            if integration == "acs" && dependency == "tssc-acs"),
        "got: {err}"
    );
}

#[test]
fn test_superseded_product_is_disabled_before_build() {
    let builder = TopologyBuilder::new(
        charts(&[openshift(), acs(), dh("acs")]),
        integrations(&["acs"]),
    );
    let mut config = config();
    let disabled =
        disable_superseded_products(builder.collection().unwrap(), &mut config, &["acs"]).unwrap();
    assert_eq!(disabled, vec!["ACS"]);

    let topology = builder.build(&config).unwrap();
    assert_eq!(topology.names(), vec!["tssc-openshift", "tssc-dh"]);
}

#[rstest]
#[case::dangling_operator(dh("acs &&"))]
#[case::unbalanced(dh("(acs || quay"))]
#[case::unknown_in_expression(dh("acs || konflux"))]
#[case::unknown_provided(openshift().provides(&["konflux"]))]
fn test_expression_errors(#[case] broken: ChartSpec) {
    let mut specs = vec![openshift(), acs()];
    specs.retain(|s| s.name() != broken.name());
    specs.push(broken);
    let builder = TopologyBuilder::new(charts(&specs), integrations(&[]));

    let err = builder.build(&config()).unwrap_err();
    assert!(err.is_expression_error(), "got: {err}");
}

#[test]
fn test_dependency_errors_precede_integration_checks() {
    let builder = TopologyBuilder::new(
        charts(&[
            openshift(),
            dh("github").depends_on(&["tssc-openshift", "tssc-gitops"]),
        ]),
        integrations(&[]),
    );
    let err = builder.build(&config()).unwrap_err();
    assert!(
        matches!(&err, Error::DependencyNotFound { name, .. } if name == "tssc-gitops"),
        "got: {err}"
    );
    assert!(err.is_dependency_error());
}

#[test]
fn test_builds_are_repeatable() {
    let builder = TopologyBuilder::new(
        charts(&[openshift(), acs(), dh("acs")]),
        integrations(&[]),
    );
    let first = builder.build(&config()).unwrap();
    let second = builder.build(&config()).unwrap();
    assert_eq!(first, second);

    let collection = builder.collection().unwrap();
    assert!(std::ptr::eq(collection, builder.collection().unwrap()));
    assert_eq!(collection.len(), 3);
}

#[test]
fn test_build_from_installer_directory() {
    let installer = TestInstaller::new()
        .with_config(SAMPLE_CONFIG)
        .with_charts(&[
            openshift(),
            ChartSpec::new("tssc-acs")
                .product("Advanced Cluster Security")
                .depends_on(&["tssc-openshift"])
                .use_product_namespace()
                .provides(&["acs"]),
            ChartSpec::new("tssc-quay")
                .product("Quay")
                .use_product_namespace()
                .provides(&["quay"]),
            dh("acs && (quay || github)").depends_on(&["tssc-openshift", "tssc-acs"]),
        ]);
    let config = Config::from_file(installer.config_path()).unwrap();
    let chart_fs = ChartFs::new(installer.root());

    let err = TopologyBuilder::new(&chart_fs, integrations(&[]))
        .build(&config)
        .unwrap_err();
    assert!(
        matches!(&err, Error::MissingIntegrations { missing, .. }
            if missing == &vec!["github".to_string(), "quay".to_string()]),
        "got: {err}"
    );

    let topology = TopologyBuilder::new(&chart_fs, integrations(&["github"]))
        .build(&config)
        .unwrap();
    assert_eq!(
        topology.names(),
        vec!["tssc-openshift", "tssc-acs", "tssc-dh"]
    );
    assert_eq!(
        topology.get_dependency("tssc-acs").unwrap().namespace(),
        Some("tssc-acs")
    );
}

#[test]
fn test_invalid_chart_annotation_on_disk() {
    let installer = TestInstaller::new().with_charts(&[
        openshift(),
        ChartSpec::new("tssc-acs").annotate("weight", "heavy"),
    ]);
    let builder = TopologyBuilder::new(ChartFs::new(installer.root()), integrations(&[]));

    let err = builder.build(&config()).unwrap_err();
    assert!(
        matches!(&err, Error::InvalidCollection { chart, .. } if chart == "tssc-acs"),
        "got: {err}"
    );
    assert!(err.is_dependency_error());
}

#[test]
fn test_custom_annotation_prefix() {
    let keys = AnnotationKeys::new("rhtap", "redhat-appstudio", "github.com");
    let charts = vec![
        Chart::new("a-late").with_annotation(keys.depends_on(), "b-early"),
        Chart::new("b-early").with_annotation(keys.weight(), "-1"),
    ];

    let default_keys = TopologyBuilder::new(charts.clone(), integrations(&[]));
    assert_eq!(
        default_keys.build(&config()).unwrap().names(),
        vec!["a-late", "b-early"]
    );

    let custom_keys = TopologyBuilder::new(charts, integrations(&[])).with_annotation_keys(keys);
    assert_eq!(
        custom_keys.build(&config()).unwrap().names(),
        vec!["b-early", "a-late"]
    );
}
