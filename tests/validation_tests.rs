use clustermap_rs::core::{AnalysisResult, Argument, Cluster, VisualizationConfig};
use clustermap_rs::error::{VizError, VizResult};
use clustermap_rs::plugins::{
    ChartMode, ChartPlugin, PluginManifest, PluginRegistry, RenderContext, register_builtins,
};
use clustermap_rs::render::ChartScene;
use clustermap_rs::validation::{
    IssueCode, validate_manifest, validate_plugin, validate_result_data,
    validate_visualization_config,
};

fn builtin_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    register_builtins(&mut registry).expect("builtins register");
    registry
}

#[test]
fn complete_manifest_passes() {
    let manifest = PluginManifest::new("p", "Plugin", "1.2.3", "activity")
        .with_mode(ChartMode::new("m", "Mode", "activity"));
    let report = validate_manifest(&manifest);
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
    assert_eq!(report.format(), "✓ Validation passed");
}

#[test]
fn missing_manifest_fields_report_stable_codes() {
    let manifest = PluginManifest::new("", "", "1.0.0", "");
    let report = validate_manifest(&manifest);

    assert!(!report.is_valid());
    assert!(report.has_code(IssueCode::ManifestMissingId));
    assert!(report.has_code(IssueCode::ManifestMissingName));
    assert!(report.has_code(IssueCode::ManifestMissingIcon));
    // No modes is tolerated as a warning.
    assert!(report.has_code(IssueCode::ManifestNoModes));
}

#[test]
fn loose_semver_is_a_warning_not_an_error() {
    let manifest = PluginManifest::new("p", "Plugin", "one-point-oh", "activity")
        .with_mode(ChartMode::new("m", "Mode", "activity"));
    let report = validate_manifest(&manifest);

    assert!(report.is_valid());
    assert!(report.has_code(IssueCode::ManifestInvalidVersionFormat));

    let prerelease = PluginManifest::new("p", "Plugin", "1.2.3-beta.1", "activity")
        .with_mode(ChartMode::new("m", "Mode", "activity"));
    assert!(!validate_manifest(&prerelease).has_code(IssueCode::ManifestInvalidVersionFormat));
}

#[test]
fn duplicate_mode_ids_are_an_error() {
    let manifest = PluginManifest::new("p", "Plugin", "1.0.0", "activity")
        .with_mode(ChartMode::new("dup", "First", "activity"))
        .with_mode(ChartMode::new("dup", "Second", "activity"));
    let report = validate_manifest(&manifest);

    assert!(!report.is_valid());
    assert!(report.has_code(IssueCode::ManifestDuplicateModeIds));
}

#[test]
fn mode_without_id_is_an_error() {
    let manifest = PluginManifest::new("p", "Plugin", "1.0.0", "activity")
        .with_mode(ChartMode::new("", "Nameless", "activity"));
    let report = validate_manifest(&manifest);

    assert!(!report.is_valid());
    assert!(report.has_code(IssueCode::ModeMissingId));
}

struct MisdeclaredPlugin;

impl ChartPlugin for MisdeclaredPlugin {
    fn manifest(&self) -> PluginManifest {
        PluginManifest::new("mis", "Misdeclared", "1.0.0", "activity")
            .with_mode(ChartMode::new("served", "Served", "activity"))
            .with_mode(ChartMode::new("unserved", "Unserved", "activity"))
    }

    fn can_handle(&self, mode_id: &str) -> VizResult<bool> {
        Ok(mode_id == "served")
    }

    fn render(&self, context: &RenderContext<'_>) -> VizResult<ChartScene> {
        Ok(ChartScene::new(context.selected_mode))
    }
}

struct FailingProbePlugin;

impl ChartPlugin for FailingProbePlugin {
    fn manifest(&self) -> PluginManifest {
        PluginManifest::new("failing", "Failing probe", "1.0.0", "activity")
            .with_mode(ChartMode::new("m", "Mode", "activity"))
    }

    fn can_handle(&self, _mode_id: &str) -> VizResult<bool> {
        Err(VizError::InvalidData("probe exploded".to_owned()))
    }

    fn render(&self, context: &RenderContext<'_>) -> VizResult<ChartScene> {
        Ok(ChartScene::new(context.selected_mode))
    }
}

#[test]
fn undeclared_capability_and_failed_probe_use_distinct_codes() {
    let mismatch = validate_plugin(&MisdeclaredPlugin);
    assert!(!mismatch.is_valid());
    assert!(mismatch.has_code(IssueCode::PluginCanHandleMismatch));
    assert!(!mismatch.has_code(IssueCode::PluginCanHandleFailed));

    let failed = validate_plugin(&FailingProbePlugin);
    assert!(!failed.is_valid());
    assert!(failed.has_code(IssueCode::PluginCanHandleFailed));
}

#[test]
fn every_builtin_plugin_validates_cleanly() {
    let registry = builtin_registry();
    for plugin in registry.all() {
        let report = validate_plugin(plugin.as_ref());
        assert!(report.is_valid(), "{}", report.format());
    }
}

#[test]
fn absent_config_is_always_valid() {
    let registry = builtin_registry();
    let report = validate_visualization_config(None, &registry);
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
}

#[test]
fn unknown_enabled_chart_is_an_error() {
    let registry = builtin_registry();
    let config = VisualizationConfig {
        enabled_charts: vec!["scatterAll".to_owned(), "unknownX".to_owned()],
        ..VisualizationConfig::default()
    };
    let report = validate_visualization_config(Some(&config), &registry);

    assert!(!report.is_valid());
    assert!(report.has_code(IssueCode::ConfigUnknownChartType));
}

#[test]
fn default_chart_must_be_enabled() {
    let registry = builtin_registry();
    let config = VisualizationConfig {
        enabled_charts: vec!["scatterAll".to_owned()],
        default_chart: Some("treemap".to_owned()),
        ..VisualizationConfig::default()
    };
    let report = validate_visualization_config(Some(&config), &registry);

    assert!(!report.is_valid());
    assert!(report.has_code(IssueCode::ConfigDefaultNotInEnabled));
}

#[test]
fn duplicate_and_unordered_enabled_charts_warn() {
    let registry = builtin_registry();
    let config = VisualizationConfig {
        enabled_charts: vec![
            "scatterAll".to_owned(),
            "scatterAll".to_owned(),
            "treemap".to_owned(),
        ],
        chart_order: Some(vec!["scatterAll".to_owned()]),
        ..VisualizationConfig::default()
    };
    let report = validate_visualization_config(Some(&config), &registry);

    assert!(report.is_valid());
    assert!(report.has_code(IssueCode::ConfigDuplicateEnabledCharts));
    assert!(report.has_code(IssueCode::ConfigEnabledNotInOrder));
}

#[test]
fn empty_enabled_charts_warn() {
    let registry = builtin_registry();
    let config = VisualizationConfig::default();
    let report = validate_visualization_config(Some(&config), &registry);

    assert!(report.is_valid());
    assert!(report.has_code(IssueCode::ConfigEmptyEnabledCharts));
}

#[test]
fn missing_result_is_an_error() {
    let report = validate_result_data(None);
    assert!(!report.is_valid());
    assert!(report.has_code(IssueCode::ResultMissing));
}

#[test]
fn structural_slips_in_result_data_warn() {
    let result = AnalysisResult::new(
        vec![Argument::new(
            "a1",
            "text",
            0.0,
            0.0,
            vec!["c1".to_owned(), "ghost".to_owned()],
        )],
        vec![
            Cluster::new("c1", 2, "Orphan level", 1.0).with_parent("nowhere"),
        ],
    );
    let report = validate_result_data(Some(&result));

    assert!(report.is_valid());
    assert!(report.has_code(IssueCode::ClusterParentUnknown));
    assert!(report.has_code(IssueCode::ArgumentUnknownCluster));
}

#[test]
fn cluster_without_id_is_an_error() {
    let result = AnalysisResult::new(vec![], vec![Cluster::new("", 1, "Anonymous", 1.0)]);
    let report = validate_result_data(Some(&result));

    assert!(!report.is_valid());
    assert!(report.has_code(IssueCode::ClusterMissingId));
}

#[test]
fn empty_cluster_set_warns() {
    let result = AnalysisResult::new(vec![], vec![]);
    let report = validate_result_data(Some(&result));

    assert!(report.is_valid());
    assert!(report.has_code(IssueCode::ResultNoClusters));
}

#[test]
fn report_format_lists_counts_then_codes() {
    let registry = builtin_registry();
    let config = VisualizationConfig {
        enabled_charts: vec!["unknownX".to_owned(), "unknownX".to_owned()],
        ..VisualizationConfig::default()
    };
    let report = validate_visualization_config(Some(&config), &registry);
    let text = report.format();

    assert!(text.starts_with("2 error(s), 1 warning(s)"));
    assert!(text.contains("[CONFIG_UNKNOWN_CHART_TYPE]"));
    assert!(text.contains("[CONFIG_DUPLICATE_ENABLED_CHARTS]"));

    let err = report
        .ensure_valid("visualization config")
        .expect_err("errors must fail ensure_valid");
    assert!(matches!(err, VizError::ValidationFailed { .. }));
    assert!(err.to_string().contains("visualization config"));
}
