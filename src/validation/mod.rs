//! Structural validation for plugins, configuration, and analysis data.
//!
//! Every rule reports through [`ValidationReport`] with a stable
//! [`IssueCode`]; nothing in this module panics or short-circuits, so a
//! single pass collects every finding at once.

mod report;

pub use report::{IssueCode, Severity, ValidationIssue, ValidationReport};

use std::collections::HashSet;

use crate::core::{AnalysisResult, VisualizationConfig};
use crate::plugins::{ChartMode, ChartPlugin, PluginManifest, PluginRegistry};

/// Loose semver shape: three dot-separated fields, numeric except for an
/// optional pre-release suffix on the last.
fn looks_like_semver(version: &str) -> bool {
    let mut fields = version.splitn(3, '.');
    let (Some(major), Some(minor), Some(patch)) = (fields.next(), fields.next(), fields.next())
    else {
        return false;
    };
    let numeric = |field: &str| !field.is_empty() && field.chars().all(|c| c.is_ascii_digit());
    numeric(major) && numeric(minor) && patch.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Checks a single chart mode declaration.
#[must_use]
pub fn validate_mode(mode: &ChartMode) -> ValidationReport {
    let mut out = ValidationReport::new();
    if mode.id.trim().is_empty() {
        out.push(ValidationIssue::error(
            IssueCode::ModeMissingId,
            format!("chart mode `{}` declares no id", mode.label),
        ));
    }
    out
}

/// Checks a plugin manifest for required fields and internal consistency.
#[must_use]
pub fn validate_manifest(manifest: &PluginManifest) -> ValidationReport {
    let mut out = ValidationReport::new();

    if manifest.id.trim().is_empty() {
        out.push(ValidationIssue::error(
            IssueCode::ManifestMissingId,
            "manifest declares no plugin id",
        ));
    }
    if manifest.name.trim().is_empty() {
        out.push(ValidationIssue::error(
            IssueCode::ManifestMissingName,
            format!("plugin `{}` declares no display name", manifest.id),
        ));
    }
    if manifest.icon.trim().is_empty() {
        out.push(ValidationIssue::error(
            IssueCode::ManifestMissingIcon,
            format!("plugin `{}` declares no icon", manifest.id),
        ));
    }
    if !looks_like_semver(&manifest.version) {
        out.push(ValidationIssue::warning(
            IssueCode::ManifestInvalidVersionFormat,
            format!(
                "plugin `{}` version `{}` is not semver-shaped",
                manifest.id, manifest.version
            ),
        ));
    }

    if manifest.modes.is_empty() {
        out.push(ValidationIssue::warning(
            IssueCode::ManifestNoModes,
            format!("plugin `{}` declares no chart modes", manifest.id),
        ));
    }

    let mut seen = HashSet::new();
    for mode in &manifest.modes {
        out.merge(validate_mode(mode));
        if !mode.id.trim().is_empty() && !seen.insert(mode.id.as_str()) {
            out.push(ValidationIssue::error(
                IssueCode::ManifestDuplicateModeIds,
                format!(
                    "plugin `{}` declares mode id `{}` more than once",
                    manifest.id, mode.id
                ),
            ));
        }
    }

    out
}

/// Full admission check for a plugin: manifest rules plus a `can_handle`
/// probe for every declared mode.
///
/// A plugin that answers `false` for its own mode is misdeclared; a probe
/// that fails outright is reported under its own code so the two situations
/// stay distinguishable.
#[must_use]
pub fn validate_plugin(plugin: &dyn ChartPlugin) -> ValidationReport {
    let manifest = plugin.manifest();
    let mut out = validate_manifest(&manifest);

    for mode in &manifest.modes {
        match plugin.can_handle(&mode.id) {
            Ok(true) => {}
            Ok(false) => out.push(ValidationIssue::error(
                IssueCode::PluginCanHandleMismatch,
                format!(
                    "plugin `{}` does not handle its declared mode `{}`",
                    manifest.id, mode.id
                ),
            )),
            Err(err) => out.push(ValidationIssue::error(
                IssueCode::PluginCanHandleFailed,
                format!(
                    "plugin `{}` can_handle probe failed for mode `{}`: {err}",
                    manifest.id, mode.id
                ),
            )),
        }
    }

    out
}

/// Checks a visualization config against the modes a registry actually
/// serves. An absent config is always valid; defaults take over downstream.
#[must_use]
pub fn validate_visualization_config(
    config: Option<&VisualizationConfig>,
    registry: &PluginRegistry,
) -> ValidationReport {
    let mut out = ValidationReport::new();
    let Some(config) = config else {
        return out;
    };

    if config.enabled_charts.is_empty() {
        out.push(ValidationIssue::warning(
            IssueCode::ConfigEmptyEnabledCharts,
            "enabled chart list is empty",
        ));
    }

    let mut seen = HashSet::new();
    for chart in &config.enabled_charts {
        if !registry.has_mode(chart) {
            out.push(ValidationIssue::error(
                IssueCode::ConfigUnknownChartType,
                format!("enabled chart `{chart}` matches no registered mode"),
            ));
        }
        if !seen.insert(chart.as_str()) {
            out.push(ValidationIssue::warning(
                IssueCode::ConfigDuplicateEnabledCharts,
                format!("enabled chart `{chart}` appears more than once"),
            ));
        }
    }

    if let Some(default_chart) = &config.default_chart {
        if !config.enabled_charts.iter().any(|c| c == default_chart) {
            out.push(ValidationIssue::error(
                IssueCode::ConfigDefaultNotInEnabled,
                format!("default chart `{default_chart}` is not in the enabled chart list"),
            ));
        }
    }

    if let Some(order) = &config.chart_order {
        for chart in &config.enabled_charts {
            if !order.iter().any(|o| o == chart) {
                out.push(ValidationIssue::warning(
                    IssueCode::ConfigEnabledNotInOrder,
                    format!("enabled chart `{chart}` is missing from the chart order"),
                ));
            }
        }
    }

    out
}

/// Checks an analysis result for the structural shape plugins rely on.
///
/// `None` is the load-failed sentinel and is an error in its own right;
/// referential slips (unknown parents, unknown cluster memberships) degrade
/// rendering but do not block it, so they stay warnings.
#[must_use]
pub fn validate_result_data(result: Option<&AnalysisResult>) -> ValidationReport {
    let mut out = ValidationReport::new();
    let Some(result) = result else {
        out.push(ValidationIssue::error(
            IssueCode::ResultMissing,
            "no analysis result is loaded",
        ));
        return out;
    };

    if result.clusters.is_empty() {
        out.push(ValidationIssue::warning(
            IssueCode::ResultNoClusters,
            "analysis result contains no clusters",
        ));
    }

    for (index, cluster) in result.clusters.iter().enumerate() {
        if cluster.id.trim().is_empty() {
            out.push(ValidationIssue::error(
                IssueCode::ClusterMissingId,
                format!("cluster at index {index} has no id"),
            ));
        }
    }

    let known: HashSet<&str> = result.clusters.iter().map(|c| c.id.as_str()).collect();

    for cluster in &result.clusters {
        let Some(parent_id) = &cluster.parent else {
            continue;
        };
        match result.cluster(parent_id) {
            None => out.push(ValidationIssue::warning(
                IssueCode::ClusterParentUnknown,
                format!(
                    "cluster `{}` references unknown parent `{parent_id}`",
                    cluster.id
                ),
            )),
            Some(parent) if parent.level + 1 != cluster.level => {
                out.push(ValidationIssue::warning(
                    IssueCode::ClusterParentUnknown,
                    format!(
                        "cluster `{}` at level {} has parent `{parent_id}` at level {}",
                        cluster.id, cluster.level, parent.level
                    ),
                ));
            }
            Some(_) => {}
        }
    }

    for argument in &result.arguments {
        let unknown: Vec<&str> = argument
            .cluster_ids
            .iter()
            .map(String::as_str)
            .filter(|id| !known.contains(id))
            .collect();
        if !unknown.is_empty() {
            out.push(ValidationIssue::warning(
                IssueCode::ArgumentUnknownCluster,
                format!(
                    "argument `{}` references unknown cluster(s): {}",
                    argument.arg_id,
                    unknown.join(", ")
                ),
            ));
        }
    }

    out
}
