use tracing::warn;

use crate::core::VisualizationConfig;
use crate::plugins::PluginRegistry;
use crate::validation::validate_visualization_config;

/// Resolves the mode lineup for a view from an optional embedded config.
///
/// Returns `(enabled mode ids, default mode)`. A missing config and an
/// invalid config both resolve to every registered mode (the latter with a
/// logged fallback), so a bad report file can never blank the chart picker.
pub(super) fn resolve_enabled_modes(
    config: Option<&VisualizationConfig>,
    registry: &PluginRegistry,
) -> (Vec<String>, Option<String>) {
    let report = validate_visualization_config(config, registry);
    for issue in &report.warnings {
        warn!(code = %issue.code, "visualization config warning: {}", issue.message);
    }
    if !report.is_valid() {
        warn!(
            "visualization config rejected; falling back to all registered modes:\n{}",
            report.format()
        );
        return (registry.mode_ids(), None);
    }

    let Some(config) = config else {
        return (registry.mode_ids(), None);
    };

    let mut enabled: Vec<String> = Vec::with_capacity(config.enabled_charts.len());
    for chart in &config.enabled_charts {
        if !enabled.iter().any(|existing| existing == chart) {
            enabled.push(chart.clone());
        }
    }

    if let Some(order) = &config.chart_order {
        let position = |mode: &String| {
            order
                .iter()
                .position(|entry| entry == mode)
                .unwrap_or(usize::MAX)
        };
        enabled.sort_by_key(position);
    }

    if enabled.is_empty() {
        return (registry.mode_ids(), None);
    }

    (enabled, config.default_chart.clone())
}
