//! Built-in chart modes: scatter (all and dense), treemap, hierarchy list.

mod hierarchy_list;
mod scatter;
mod treemap;

pub use hierarchy_list::{HIERARCHY_LIST_MODE, HierarchyListPlugin};
pub use scatter::{SCATTER_ALL_MODE, SCATTER_DENSITY_MODE, ScatterPlugin};
pub use treemap::{TREEMAP_MODE, TreemapPlugin};

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::core::{AnalysisResult, ClusterId, Point, clusters_with_matches};
use crate::plugins::RenderContext;
use crate::render::Color;

pub(crate) const TEXT_COLOR: Color = Color::rgb(0.15, 0.16, 0.18);

/// Clusters that still hold at least one visible argument, or `None` when no
/// filter is active. Shared dimming input for every built-in mode.
pub(crate) fn matched_clusters(context: &RenderContext<'_>) -> Option<HashSet<ClusterId>> {
    context
        .filtered_argument_ids
        .map(|ids| clusters_with_matches(&context.result.arguments, ids))
}

/// Argument coordinates grouped by deepest-level cluster, keyed in cluster
/// input order. The key index doubles as the palette index, so the same
/// cluster keeps its color across modes. Empty when there are no clusters.
pub(crate) fn group_points_at_deepest(result: &AnalysisResult) -> IndexMap<ClusterId, Vec<Point>> {
    let Some(deepest) = result.deepest_level() else {
        return IndexMap::new();
    };
    let mut groups: IndexMap<ClusterId, Vec<Point>> = result
        .clusters_at_level(deepest)
        .map(|cluster| (cluster.id.clone(), Vec::new()))
        .collect();
    for argument in &result.arguments {
        for cluster_id in &argument.cluster_ids {
            if let Some(points) = groups.get_mut(cluster_id) {
                points.push(Point::new(argument.x, argument.y));
            }
        }
    }
    groups
}

/// Mean position of a point set. Callers skip empty groups first.
pub(crate) fn centroid(points: &[Point]) -> Point {
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}
