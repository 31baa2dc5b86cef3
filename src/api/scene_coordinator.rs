use tracing::warn;

use crate::error::VizResult;
use crate::plugins::{PluginRegistry, RenderContext};
use crate::render::ChartScene;

use super::ChartView;

impl ChartView {
    /// Renders the selected mode through its plugin and validates the
    /// resulting scene.
    ///
    /// A selection no plugin serves yields an empty scene with a logged
    /// warning rather than an error; the host keeps its frame loop alive
    /// and the picker shows the mode as disabled.
    pub fn render_scene(&self, registry: &PluginRegistry) -> VizResult<ChartScene> {
        let Some(plugin) = registry.get_by_mode(&self.selected_mode) else {
            warn!(
                mode_id = %self.selected_mode,
                "no plugin serves the selected mode; rendering empty scene"
            );
            return Ok(ChartScene::new(self.selected_mode.clone()));
        };

        let context = RenderContext {
            result: &self.result,
            selected_mode: &self.selected_mode,
            fullscreen: self.fullscreen,
            filtered_argument_ids: self.filtered_ids.as_deref(),
            show_cluster_labels: self.show_cluster_labels,
            show_hulls: self.show_hulls,
            treemap_zoom: self.treemap_zoom.as_deref(),
            density_filter: self.density_filter,
        };

        let scene = plugin.render(&context)?;
        scene.validate()?;
        Ok(scene)
    }
}
