use std::collections::HashSet;

use tracing::warn;

use crate::core::{AnalysisResult, Cluster, ClusterId};
use crate::error::{VizError, VizResult};
use crate::plugins::builtin::matched_clusters;
use crate::plugins::{ChartMode, ChartPlugin, PluginManifest, RenderContext};
use crate::render::{CellMark, ChartScene, cluster_color};

pub const TREEMAP_MODE: &str = "treemap";

/// Slice-and-dice treemap over the cluster hierarchy in the unit square.
///
/// Cell area is proportional to cluster value; the split axis alternates per
/// depth. An optional zoom root narrows the scene to one subtree, and every
/// cell keeps the color of its top-level ancestor so zooming never recolors
/// a family.
#[derive(Debug, Default)]
pub struct TreemapPlugin;

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

const UNIT: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1.0,
    height: 1.0,
};

impl ChartPlugin for TreemapPlugin {
    fn manifest(&self) -> PluginManifest {
        PluginManifest::new(
            "builtin.treemap",
            "Treemap",
            env!("CARGO_PKG_VERSION"),
            "grid-view",
        )
        .with_description("Cluster hierarchy as nested cells sized by value, zoomable per subtree")
        .with_mode(ChartMode::new(TREEMAP_MODE, "Treemap", "grid-view"))
    }

    fn can_handle(&self, mode_id: &str) -> VizResult<bool> {
        Ok(mode_id == TREEMAP_MODE)
    }

    fn render(&self, context: &RenderContext<'_>) -> VizResult<ChartScene> {
        if context.selected_mode != TREEMAP_MODE {
            return Err(VizError::InvalidData(format!(
                "treemap plugin cannot render mode `{}`",
                context.selected_mode
            )));
        }

        let result = context.result;
        let roots: Vec<&Cluster> = result.clusters.iter().filter(|c| c.is_root()).collect();
        let layout = TreemapLayout {
            result,
            matched: matched_clusters(context),
            show_labels: context.show_cluster_labels,
        };
        let mut scene = ChartScene::new(TREEMAP_MODE);

        let zoom = context.treemap_zoom.and_then(|id| match result.cluster(id) {
            Some(cluster) => Some(cluster),
            None => {
                warn!(cluster_id = id, "treemap zoom target not found; showing full hierarchy");
                None
            }
        });

        match zoom {
            Some(root) => {
                let palette_index = root_ancestor_index(result, &roots, root);
                layout.emit(root, UNIT, palette_index, &mut scene);
                let children: Vec<&Cluster> = result.children_of(&root.id).collect();
                layout.walk(&children, UNIT, 1, Some(palette_index), &mut scene);
            }
            None => layout.walk(&roots, UNIT, 0, None, &mut scene),
        }

        Ok(scene)
    }
}

struct TreemapLayout<'a> {
    result: &'a AnalysisResult,
    matched: Option<HashSet<ClusterId>>,
    show_labels: bool,
}

impl TreemapLayout<'_> {
    /// Splits `region` among `nodes` by value share, then recurses into each
    /// node's children with the axis flipped. Parents are emitted before
    /// their children so painters-order rendering stacks correctly.
    fn walk(
        &self,
        nodes: &[&Cluster],
        region: Rect,
        depth: usize,
        inherited: Option<usize>,
        scene: &mut ChartScene,
    ) {
        if nodes.is_empty() || region.width <= 0.0 || region.height <= 0.0 {
            return;
        }
        let total: f64 = nodes.iter().map(|node| node.value.max(0.0)).sum();
        let horizontal = depth % 2 == 0;
        let mut offset = 0.0;

        for (position, node) in nodes.iter().enumerate() {
            let fraction = if total > 0.0 {
                node.value.max(0.0) / total
            } else {
                1.0 / nodes.len() as f64
            };
            let cell = if horizontal {
                Rect {
                    x: region.x + offset * region.width,
                    y: region.y,
                    width: fraction * region.width,
                    height: region.height,
                }
            } else {
                Rect {
                    x: region.x,
                    y: region.y + offset * region.height,
                    width: region.width,
                    height: fraction * region.height,
                }
            };
            offset += fraction;

            let palette_index = inherited.unwrap_or(position);
            self.emit(node, cell, palette_index, scene);

            let children: Vec<&Cluster> = self.result.children_of(&node.id).collect();
            if !children.is_empty() {
                self.walk(&children, cell, depth + 1, Some(palette_index), scene);
            }
        }
    }

    fn emit(&self, node: &Cluster, cell: Rect, palette_index: usize, scene: &mut ChartScene) {
        scene.cells.push(CellMark {
            x: cell.x,
            y: cell.y,
            width: cell.width,
            height: cell.height,
            color: cluster_color(palette_index),
            dimmed: self
                .matched
                .as_ref()
                .is_some_and(|set| !set.contains(node.id.as_str())),
            cluster_id: node.id.clone(),
            label: self.show_labels.then(|| node.label.clone()),
        });
    }
}

/// Index of the top-level ancestor among the root clusters; color anchor for
/// a whole family. Broken parent links fall back to the first palette slot.
fn root_ancestor_index(result: &AnalysisResult, roots: &[&Cluster], cluster: &Cluster) -> usize {
    let mut current = cluster;
    while let Some(parent_id) = &current.parent {
        match result.cluster(parent_id) {
            Some(parent) => current = parent,
            None => break,
        }
    }
    roots
        .iter()
        .position(|root| root.id == current.id)
        .unwrap_or(0)
}
