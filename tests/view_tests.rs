use clustermap_rs::api::ChartView;
use clustermap_rs::core::{
    AnalysisResult, Argument, AttributeKind, AttributeValue, Cluster, FilterParams, ReportConfig,
    VisualizationConfig,
};
use clustermap_rs::plugins::{
    HIERARCHY_LIST_MODE, PluginRegistry, SCATTER_ALL_MODE, SCATTER_DENSITY_MODE, TREEMAP_MODE,
    register_builtins,
};

fn builtin_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    register_builtins(&mut registry).expect("builtins register");
    registry
}

fn sample_result() -> AnalysisResult {
    let clusters = vec![
        Cluster::new("top1", 1, "Transport", 5.0),
        Cluster::new("top2", 1, "Environment", 1.0),
        Cluster::new("c1", 2, "Cycling", 4.0)
            .with_parent("top1")
            .with_density_rank(0.1),
        Cluster::new("c2", 2, "Parking", 1.0)
            .with_parent("top1")
            .with_density_rank(0.6),
        Cluster::new("c3", 2, "Parks", 1.0)
            .with_parent("top2")
            .with_density_rank(0.9),
    ];
    let arguments = vec![
        Argument::new("a1", "Bike lanes", 0.0, 0.0, vec!["top1".into(), "c1".into()]),
        Argument::new("a2", "Bike parking", 1.0, 0.0, vec!["top1".into(), "c1".into()]),
        Argument::new("a3", "Bike sharing", 1.0, 1.0, vec!["top1".into(), "c1".into()]),
        Argument::new("a4", "Bike repair shops", 0.6, 0.3, vec!["top1".into(), "c1".into()]),
        Argument::new("a5", "Car parking fees", -1.0, 0.5, vec!["top1".into(), "c2".into()]),
        Argument::new("a6", "River park", -0.5, -1.0, vec!["top2".into(), "c3".into()]),
    ];
    AnalysisResult::new(arguments, clusters)
}

fn with_visualization(result: AnalysisResult, visualization: VisualizationConfig) -> AnalysisResult {
    result.with_config(ReportConfig {
        visualization: Some(visualization),
        ..ReportConfig::default()
    })
}

#[test]
fn view_applies_config_lineup_order_and_default() {
    let result = with_visualization(
        sample_result(),
        VisualizationConfig {
            enabled_charts: vec![TREEMAP_MODE.to_owned(), SCATTER_ALL_MODE.to_owned()],
            default_chart: Some(SCATTER_ALL_MODE.to_owned()),
            chart_order: Some(vec![SCATTER_ALL_MODE.to_owned(), TREEMAP_MODE.to_owned()]),
            ..VisualizationConfig::default()
        },
    );
    let registry = builtin_registry();
    let view = ChartView::new(result, &registry).expect("view builds");

    assert_eq!(
        view.enabled_modes(),
        &[SCATTER_ALL_MODE.to_owned(), TREEMAP_MODE.to_owned()]
    );
    assert_eq!(view.selected_mode(), SCATTER_ALL_MODE);
}

#[test]
fn view_without_config_enables_every_registered_mode() {
    let registry = builtin_registry();
    let view = ChartView::new(sample_result(), &registry).expect("view builds");

    assert_eq!(
        view.enabled_modes(),
        &[
            SCATTER_ALL_MODE.to_owned(),
            SCATTER_DENSITY_MODE.to_owned(),
            TREEMAP_MODE.to_owned(),
            HIERARCHY_LIST_MODE.to_owned(),
        ]
    );
    assert_eq!(view.selected_mode(), SCATTER_ALL_MODE);
}

#[test]
fn invalid_config_falls_back_to_all_modes() {
    let result = with_visualization(
        sample_result(),
        VisualizationConfig {
            enabled_charts: vec!["ghostChart".to_owned()],
            ..VisualizationConfig::default()
        },
    );
    let registry = builtin_registry();
    let view = ChartView::new(result, &registry).expect("view builds");

    assert_eq!(view.enabled_modes().len(), 4);
    assert_eq!(view.selected_mode(), SCATTER_ALL_MODE);
}

#[test]
fn select_mode_ignores_unknown_ids() {
    let registry = builtin_registry();
    let mut view = ChartView::new(sample_result(), &registry).expect("view builds");

    assert!(view.select_mode(TREEMAP_MODE));
    assert_eq!(view.selected_mode(), TREEMAP_MODE);

    assert!(!view.select_mode("ghostChart"));
    assert_eq!(view.selected_mode(), TREEMAP_MODE);
}

#[test]
fn filter_state_flows_through_summary_and_cluster_status() {
    let registry = builtin_registry();
    let mut view = ChartView::new(sample_result(), &registry).expect("view builds");

    assert_eq!(view.filtered_argument_ids(), None);
    assert!(!view.is_all_filtered("c3"));

    view.set_filter(FilterParams::new().with_text_search("bike"));
    let ids = view.filtered_argument_ids().expect("active filter");
    assert_eq!(ids.len(), 4);

    let summary = view.filter_summary();
    assert_eq!(summary.matched, 4);
    assert_eq!(summary.total, 6);

    assert!(!view.is_all_filtered("c1"));
    assert!(view.is_all_filtered("c2"));
    assert!(view.is_all_filtered("c3"));

    view.clear_filter();
    assert_eq!(view.filtered_argument_ids(), None);
    assert!(!view.is_all_filtered("c2"));
}

#[test]
fn attribute_summaries_describe_the_loaded_arguments() {
    let result = AnalysisResult::new(
        vec![
            Argument::new("a1", "first", 0.0, 0.0, vec!["c1".to_owned()])
                .with_attribute("stance", AttributeValue::Text("agree".to_owned()))
                .with_attribute("age", AttributeValue::Number(34.0)),
            Argument::new("a2", "second", 1.0, 1.0, vec!["c1".to_owned()])
                .with_attribute("stance", AttributeValue::Text("disagree".to_owned())),
        ],
        vec![Cluster::new("c1", 1, "Only", 2.0)],
    );
    let registry = builtin_registry();
    let view = ChartView::new(result, &registry).expect("view builds");

    let summaries = view.attribute_summaries();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].name, "stance");
    assert_eq!(summaries[0].kind, AttributeKind::Categorical);
    assert_eq!(
        summaries[0].distinct_values,
        vec!["agree".to_owned(), "disagree".to_owned()]
    );
    assert_eq!(summaries[1].name, "age");
    assert_eq!(summaries[1].numeric_range, Some((34.0, 34.0)));
    assert_eq!(summaries[1].missing_count, 1);
}

#[test]
fn render_scene_uses_the_selected_mode() {
    let registry = builtin_registry();
    let mut view = ChartView::new(sample_result(), &registry).expect("view builds");

    let scene = view.render_scene(&registry).expect("scene renders");
    assert_eq!(scene.mode_id, SCATTER_ALL_MODE);
    assert_eq!(scene.points.len(), 6);

    view.select_mode(TREEMAP_MODE);
    let scene = view.render_scene(&registry).expect("scene renders");
    assert_eq!(scene.mode_id, TREEMAP_MODE);
    assert_eq!(scene.cells.len(), 5);
}

#[test]
fn missing_plugin_renders_an_empty_scene() {
    let registry = builtin_registry();
    let view = ChartView::new(sample_result(), &registry).expect("view builds");

    let bare = PluginRegistry::new();
    let scene = view.render_scene(&bare).expect("empty scene");
    assert_eq!(scene.mode_id, SCATTER_ALL_MODE);
    assert!(scene.is_empty());
}

#[test]
fn render_applies_the_view_filter() {
    let registry = builtin_registry();
    let mut view = ChartView::new(sample_result(), &registry).expect("view builds");
    view.set_filter(FilterParams::new().with_text_search("river"));

    let scene = view.render_scene(&registry).expect("scene renders");
    let lit: Vec<&str> = scene
        .points
        .iter()
        .filter(|point| !point.dimmed)
        .map(|point| point.argument_id.as_str())
        .collect();
    assert_eq!(lit, vec!["a6"]);
}

#[test]
fn hull_cache_serves_repeat_lookups() {
    let registry = builtin_registry();
    let mut view = ChartView::new(sample_result(), &registry).expect("view builds");

    let first = view.cluster_hull("c1").expect("hull computed");
    assert_eq!(first.len(), 3);
    let second = view.cluster_hull("c1").expect("hull cached");
    assert_eq!(first, second);

    let stats = view.hull_cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.size, 1);

    assert!(view.cluster_hull("ghost").is_none());
}

#[test]
fn hover_resolves_nearest_visible_argument() {
    let registry = builtin_registry();
    let mut view = ChartView::new(sample_result(), &registry).expect("view builds");

    let hit = view.hover_argument(0.05, 0.05, 0.5).expect("near a1");
    assert_eq!(hit.arg_id, "a1");

    assert!(view.hover_argument(10.0, 10.0, 0.5).is_none());

    // Filter down to a6; a1's position no longer resolves.
    view.set_filter(FilterParams::new().with_text_search("river"));
    assert!(view.hover_argument(0.05, 0.05, 0.5).is_none());
    let hit = view.hover_argument(-0.5, -1.0, 0.1).expect("a6 visible");
    assert_eq!(hit.arg_id, "a6");
}

#[test]
fn treemap_zoom_validates_the_target() {
    let registry = builtin_registry();
    let mut view = ChartView::new(sample_result(), &registry).expect("view builds");

    view.zoom_treemap(Some("top1"));
    assert_eq!(view.treemap_zoom(), Some("top1"));

    view.zoom_treemap(Some("ghost"));
    assert_eq!(view.treemap_zoom(), None);

    view.zoom_treemap(Some("top2"));
    view.zoom_treemap(None);
    assert_eq!(view.treemap_zoom(), None);
}

#[test]
fn mode_catalog_reports_availability_and_selection() {
    let registry = builtin_registry();
    let view = ChartView::new(sample_result(), &registry).expect("view builds");

    let catalog = view.mode_catalog(&registry);
    assert_eq!(catalog.len(), 4);

    let entry = |id: &str| {
        catalog
            .iter()
            .find(|status| status.id == id)
            .expect("mode listed")
    };
    assert!(entry(SCATTER_ALL_MODE).enabled);
    assert!(entry(SCATTER_ALL_MODE).selected);
    assert!(entry(TREEMAP_MODE).enabled);
    assert!(!entry(TREEMAP_MODE).selected);

    // No deepest cluster meets the default density cut, so the dense view
    // is offered but disabled, with an explanation.
    let dense = entry(SCATTER_DENSITY_MODE);
    assert!(!dense.enabled);
    assert!(dense.tooltip.is_some());
}

#[test]
fn mode_catalog_keeps_vanished_plugins_listed_but_disabled() {
    let registry = builtin_registry();
    let view = ChartView::new(sample_result(), &registry).expect("view builds");

    let bare = PluginRegistry::new();
    let catalog = view.mode_catalog(&bare);
    assert_eq!(catalog.len(), 4);
    assert!(catalog.iter().all(|status| !status.enabled));
    assert!(catalog.iter().all(|status| status.tooltip.is_some()));
}

#[test]
fn load_result_resets_data_derived_state() {
    let registry = builtin_registry();
    let mut view = ChartView::new(sample_result(), &registry).expect("view builds");

    view.set_filter(FilterParams::new().with_text_search("bike"));
    view.zoom_treemap(Some("top1"));
    let _ = view.cluster_hull("c1");

    let replacement = with_visualization(
        sample_result(),
        VisualizationConfig {
            enabled_charts: vec![HIERARCHY_LIST_MODE.to_owned()],
            default_chart: Some(HIERARCHY_LIST_MODE.to_owned()),
            ..VisualizationConfig::default()
        },
    );
    view.load_result(replacement, &registry).expect("reload");

    assert_eq!(view.selected_mode(), HIERARCHY_LIST_MODE);
    assert_eq!(view.enabled_modes(), &[HIERARCHY_LIST_MODE.to_owned()]);
    assert_eq!(view.filtered_argument_ids(), None);
    assert_eq!(view.treemap_zoom(), None);
    assert_eq!(view.hull_cache_stats().size, 0);
}

#[test]
fn view_rejects_a_result_with_missing_cluster_ids() {
    let registry = builtin_registry();
    let broken = AnalysisResult::new(vec![], vec![Cluster::new("", 1, "Anonymous", 1.0)]);
    assert!(ChartView::new(broken, &registry).is_err());
}
