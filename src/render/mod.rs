mod null_renderer;
mod primitives;
mod scene;

pub use null_renderer::NullRenderer;
pub use primitives::{
    CLUSTER_PALETTE, CellMark, Color, LabelMark, PointMark, PolygonMark, cluster_color,
};
pub use scene::ChartScene;

use crate::error::VizResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `ChartScene` so
/// drawing code remains isolated from chart domain and filtering logic.
pub trait SceneRenderer {
    fn render(&mut self, scene: &ChartScene) -> VizResult<()>;
}
