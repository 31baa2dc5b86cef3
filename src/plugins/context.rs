use std::collections::HashSet;

use crate::core::{AnalysisResult, ArgumentId, DensityFilter};
use crate::error::VizResult;
use crate::plugins::PluginManifest;
use crate::render::ChartScene;

/// Read-only snapshot of everything a plugin may consult while rendering.
///
/// `filtered_argument_ids` uses `None` for "no filter active": every
/// argument is visible and plugins skip dimming entirely.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub result: &'a AnalysisResult,
    pub selected_mode: &'a str,
    pub fullscreen: bool,
    pub filtered_argument_ids: Option<&'a [ArgumentId]>,
    pub show_cluster_labels: bool,
    pub show_hulls: bool,
    pub treemap_zoom: Option<&'a str>,
    pub density_filter: DensityFilter,
}

impl<'a> RenderContext<'a> {
    #[must_use]
    pub fn new(result: &'a AnalysisResult, selected_mode: &'a str) -> Self {
        Self {
            result,
            selected_mode,
            fullscreen: false,
            filtered_argument_ids: None,
            show_cluster_labels: true,
            show_hulls: false,
            treemap_zoom: None,
            density_filter: DensityFilter::default(),
        }
    }

    /// Visible-argument set for dimming, or `None` when no filter is active.
    ///
    /// Built once per render so per-mark visibility checks stay O(1).
    #[must_use]
    pub fn visible_set(&self) -> Option<HashSet<&'a str>> {
        self.filtered_argument_ids
            .map(|ids| ids.iter().map(String::as_str).collect())
    }

    #[must_use]
    pub fn filter_active(&self) -> bool {
        self.filtered_argument_ids.is_some()
    }
}

/// Render extension interface.
///
/// Implementations are stateless with respect to calls: `render` derives the
/// whole scene from the context snapshot, so the same context always yields
/// the same scene.
pub trait ChartPlugin: Send + Sync {
    fn manifest(&self) -> PluginManifest;

    /// Whether this plugin serves `mode_id`. Failures are reported as
    /// admission errors rather than treated as "no".
    fn can_handle(&self, mode_id: &str) -> VizResult<bool>;

    fn render(&self, context: &RenderContext<'_>) -> VizResult<ChartScene>;
}
