use std::collections::HashSet;

use crate::core::{DensityFilter, convex_hull, select_dense_clusters};
use crate::error::{VizError, VizResult};
use crate::plugins::builtin::{TEXT_COLOR, centroid, group_points_at_deepest, matched_clusters};
use crate::plugins::{ChartMode, ChartPlugin, ModeAvailability, PluginManifest, RenderContext};
use crate::render::{ChartScene, LabelMark, PointMark, PolygonMark, cluster_color};

pub const SCATTER_ALL_MODE: &str = "scatterAll";
pub const SCATTER_DENSITY_MODE: &str = "scatterDensity";

const POINT_RADIUS_PX: f64 = 4.0;
const FULLSCREEN_POINT_RADIUS_PX: f64 = 6.0;
const HULL_STROKE_WIDTH_PX: f64 = 1.5;
const HULL_FILL_ALPHA: f64 = 0.08;
const LABEL_FONT_PX: f64 = 12.0;
const FULLSCREEN_LABEL_FONT_PX: f64 = 14.0;

/// Scatter chart over argument positions, one color per deepest-level
/// cluster. Serves the full view and a dense-groups-only view.
#[derive(Debug, Default)]
pub struct ScatterPlugin;

impl ChartPlugin for ScatterPlugin {
    fn manifest(&self) -> PluginManifest {
        PluginManifest::new(
            "builtin.scatter",
            "Scatter",
            env!("CARGO_PKG_VERSION"),
            "scatter-plot",
        )
        .with_description("Arguments at their analysis positions, colored by deepest-level group")
        .with_mode(ChartMode::new(SCATTER_ALL_MODE, "Scatter (all)", "scatter-plot"))
        .with_mode(
            ChartMode::new(SCATTER_DENSITY_MODE, "Scatter (dense groups)", "blur-on")
                .with_availability(ModeAvailability::conditionally_disabled(
                    |result| {
                        Ok(select_dense_clusters(&result.clusters, DensityFilter::default())
                            .deepest_level_empty)
                    },
                    "No group at the deepest level passes the density filter",
                )),
        )
    }

    fn can_handle(&self, mode_id: &str) -> VizResult<bool> {
        Ok(matches!(mode_id, SCATTER_ALL_MODE | SCATTER_DENSITY_MODE))
    }

    fn render(&self, context: &RenderContext<'_>) -> VizResult<ChartScene> {
        match context.selected_mode {
            SCATTER_ALL_MODE => Ok(scatter_scene(context, SCATTER_ALL_MODE, None)),
            SCATTER_DENSITY_MODE => {
                let selection =
                    select_dense_clusters(&context.result.clusters, context.density_filter);
                let deepest = context.result.deepest_level();
                let dense: HashSet<&str> = selection
                    .clusters
                    .iter()
                    .filter(|cluster| Some(cluster.level) == deepest)
                    .map(|cluster| cluster.id.as_str())
                    .collect();
                Ok(scatter_scene(context, SCATTER_DENSITY_MODE, Some(&dense)))
            }
            other => Err(VizError::InvalidData(format!(
                "scatter plugin cannot render mode `{other}`"
            ))),
        }
    }
}

/// Builds the scatter scene, optionally restricted to a subset of
/// deepest-level clusters. Points keep their full-view colors either way.
fn scatter_scene(
    context: &RenderContext<'_>,
    mode_id: &str,
    keep: Option<&HashSet<&str>>,
) -> ChartScene {
    let result = context.result;
    let groups = group_points_at_deepest(result);
    let visible = context.visible_set();
    let radius = if context.fullscreen {
        FULLSCREEN_POINT_RADIUS_PX
    } else {
        POINT_RADIUS_PX
    };

    let mut scene = ChartScene::new(mode_id);

    for argument in &result.arguments {
        let Some((group_index, cluster_id)) = argument
            .cluster_ids
            .iter()
            .find_map(|id| groups.get_index_of(id).map(|index| (index, id)))
        else {
            continue;
        };
        if keep.is_some_and(|dense| !dense.contains(cluster_id.as_str())) {
            continue;
        }
        scene.points.push(PointMark {
            x: argument.x,
            y: argument.y,
            radius_px: radius,
            color: cluster_color(group_index),
            dimmed: visible
                .as_ref()
                .is_some_and(|set| !set.contains(argument.arg_id.as_str())),
            argument_id: argument.arg_id.clone(),
        });
    }

    let matched = matched_clusters(context);
    for (group_index, (cluster_id, points)) in groups.iter().enumerate() {
        if keep.is_some_and(|dense| !dense.contains(cluster_id.as_str())) {
            continue;
        }
        if points.is_empty() {
            continue;
        }

        if context.show_hulls {
            let hull = convex_hull(points);
            if hull.len() >= 3 {
                scene.polygons.push(PolygonMark {
                    points: hull,
                    stroke_width_px: HULL_STROKE_WIDTH_PX,
                    color: cluster_color(group_index),
                    fill_alpha: HULL_FILL_ALPHA,
                    cluster_id: cluster_id.clone(),
                });
            }
        }

        if context.show_cluster_labels {
            let Some(cluster) = result.cluster(cluster_id) else {
                continue;
            };
            let center = centroid(points);
            scene.labels.push(LabelMark {
                text: cluster.label.clone(),
                x: center.x,
                y: center.y,
                font_size_px: if context.fullscreen {
                    FULLSCREEN_LABEL_FONT_PX
                } else {
                    LABEL_FONT_PX
                },
                color: TEXT_COLOR,
                dimmed: matched
                    .as_ref()
                    .is_some_and(|set| !set.contains(cluster_id.as_str())),
            });
        }
    }

    scene
}
