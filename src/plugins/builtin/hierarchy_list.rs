use std::collections::HashSet;

use crate::core::{AnalysisResult, Cluster, ClusterId};
use crate::error::{VizError, VizResult};
use crate::plugins::builtin::{TEXT_COLOR, matched_clusters};
use crate::plugins::{ChartMode, ChartPlugin, PluginManifest, RenderContext};
use crate::render::{ChartScene, LabelMark};

pub const HIERARCHY_LIST_MODE: &str = "hierarchyList";

const ROW_HEIGHT_PX: f64 = 28.0;
const INDENT_PX: f64 = 24.0;
const TOP_FONT_PX: f64 = 15.0;
const ROW_FONT_PX: f64 = 13.0;
const TAKEAWAY_FONT_PX: f64 = 11.0;

/// Depth-first text listing of the cluster hierarchy.
///
/// Each cluster becomes one indented row (plus a takeaway row when one is
/// set); rows whose cluster lost every argument to the active filter render
/// dimmed instead of disappearing, so the tree shape stays stable.
#[derive(Debug, Default)]
pub struct HierarchyListPlugin;

impl ChartPlugin for HierarchyListPlugin {
    fn manifest(&self) -> PluginManifest {
        PluginManifest::new(
            "builtin.hierarchy-list",
            "Hierarchy list",
            env!("CARGO_PKG_VERSION"),
            "list",
        )
        .with_description("Indented text listing of every cluster with its takeaway")
        .with_mode(ChartMode::new(HIERARCHY_LIST_MODE, "Hierarchy list", "list"))
    }

    fn can_handle(&self, mode_id: &str) -> VizResult<bool> {
        Ok(mode_id == HIERARCHY_LIST_MODE)
    }

    fn render(&self, context: &RenderContext<'_>) -> VizResult<ChartScene> {
        if context.selected_mode != HIERARCHY_LIST_MODE {
            return Err(VizError::InvalidData(format!(
                "hierarchy list plugin cannot render mode `{}`",
                context.selected_mode
            )));
        }

        let result = context.result;
        let matched = matched_clusters(context);
        let mut scene = ChartScene::new(HIERARCHY_LIST_MODE);
        let mut row = 0usize;

        for root in result.clusters.iter().filter(|c| c.is_root()) {
            walk(result, root, 0, matched.as_ref(), &mut row, &mut scene);
        }

        Ok(scene)
    }
}

fn walk(
    result: &AnalysisResult,
    cluster: &Cluster,
    depth: usize,
    matched: Option<&HashSet<ClusterId>>,
    row: &mut usize,
    scene: &mut ChartScene,
) {
    let dimmed = matched.is_some_and(|set| !set.contains(cluster.id.as_str()));
    let x = depth as f64 * INDENT_PX;

    scene.labels.push(LabelMark {
        text: format!("{} ({})", cluster.label, format_count(cluster.value)),
        x,
        y: *row as f64 * ROW_HEIGHT_PX,
        font_size_px: if depth == 0 { TOP_FONT_PX } else { ROW_FONT_PX },
        color: TEXT_COLOR,
        dimmed,
    });
    *row += 1;

    if !cluster.takeaway.is_empty() {
        scene.labels.push(LabelMark {
            text: cluster.takeaway.clone(),
            x: x + INDENT_PX,
            y: *row as f64 * ROW_HEIGHT_PX,
            font_size_px: TAKEAWAY_FONT_PX,
            color: TEXT_COLOR,
            dimmed,
        });
        *row += 1;
    }

    for child in result.children_of(&cluster.id) {
        walk(result, child, depth + 1, matched, row, scene);
    }
}

fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
