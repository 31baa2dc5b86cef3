//! High-level visualization facade.
//!
//! [`ChartView`] owns the loaded analysis result and all per-view state
//! (selected mode, filters, display toggles) and resolves every read
//! through plugins and the core engines. Derived state is recomputed
//! eagerly on each mutation, so reads never observe a stale filter pass.

mod config_resolver;
mod filter_controller;
mod hover_resolver;
mod hull_cache;
mod mode_catalog;
mod scene_coordinator;

pub use hull_cache::HullCacheStats;
pub use mode_catalog::ModeStatus;

use std::collections::HashSet;

use tracing::warn;

use crate::core::{AnalysisResult, ArgumentId, ClusterId, DensityFilter, FilterParams};
use crate::error::VizResult;
use crate::plugins::PluginRegistry;
use crate::validation::validate_result_data;

use config_resolver::resolve_enabled_modes;
use hull_cache::HullCache;

/// One loaded result plus the view state a host mutates around it.
#[derive(Debug)]
pub struct ChartView {
    result: AnalysisResult,
    enabled_modes: Vec<String>,
    selected_mode: String,
    filter: FilterParams,
    density_filter: DensityFilter,
    fullscreen: bool,
    show_cluster_labels: bool,
    show_hulls: bool,
    treemap_zoom: Option<String>,
    filtered_ids: Option<Vec<ArgumentId>>,
    live_clusters: Option<HashSet<ClusterId>>,
    hull_cache: HullCache,
}

impl ChartView {
    /// Validates the result, resolves the mode lineup from its embedded
    /// visualization config, and starts on the default mode with no filter.
    ///
    /// Structural warnings in the result are logged and tolerated; errors
    /// fail construction.
    pub fn new(result: AnalysisResult, registry: &PluginRegistry) -> VizResult<Self> {
        let report = validate_result_data(Some(&result));
        for issue in &report.warnings {
            warn!(code = %issue.code, "analysis result warning: {}", issue.message);
        }
        report.ensure_valid("analysis result")?;

        let (enabled_modes, default_mode) =
            resolve_enabled_modes(result.config.visualization.as_ref(), registry);
        let selected_mode = default_mode
            .or_else(|| enabled_modes.first().cloned())
            .unwrap_or_default();

        let mut view = Self {
            result,
            enabled_modes,
            selected_mode,
            filter: FilterParams::default(),
            density_filter: DensityFilter::default(),
            fullscreen: false,
            show_cluster_labels: true,
            show_hulls: false,
            treemap_zoom: None,
            filtered_ids: None,
            live_clusters: None,
            hull_cache: HullCache::default(),
        };
        view.refresh_filter_state();
        Ok(view)
    }

    /// Swaps in a new result, re-resolving modes and dropping all
    /// data-derived state (filter, zoom, hulls).
    pub fn load_result(
        &mut self,
        result: AnalysisResult,
        registry: &PluginRegistry,
    ) -> VizResult<()> {
        let report = validate_result_data(Some(&result));
        for issue in &report.warnings {
            warn!(code = %issue.code, "analysis result warning: {}", issue.message);
        }
        report.ensure_valid("analysis result")?;

        let (enabled_modes, default_mode) =
            resolve_enabled_modes(result.config.visualization.as_ref(), registry);
        self.result = result;
        self.enabled_modes = enabled_modes;
        self.selected_mode = default_mode
            .or_else(|| self.enabled_modes.first().cloned())
            .unwrap_or_default();
        self.filter = FilterParams::default();
        self.treemap_zoom = None;
        self.hull_cache.invalidate();
        self.refresh_filter_state();
        Ok(())
    }

    #[must_use]
    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    #[must_use]
    pub fn selected_mode(&self) -> &str {
        &self.selected_mode
    }

    #[must_use]
    pub fn enabled_modes(&self) -> &[String] {
        &self.enabled_modes
    }

    #[must_use]
    pub fn density_filter(&self) -> DensityFilter {
        self.density_filter
    }

    pub fn set_density_filter(&mut self, filter: DensityFilter) {
        self.density_filter = filter;
    }

    #[must_use]
    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    #[must_use]
    pub fn show_cluster_labels(&self) -> bool {
        self.show_cluster_labels
    }

    pub fn set_show_cluster_labels(&mut self, show: bool) {
        self.show_cluster_labels = show;
    }

    #[must_use]
    pub fn show_hulls(&self) -> bool {
        self.show_hulls
    }

    pub fn set_show_hulls(&mut self, show: bool) {
        self.show_hulls = show;
    }

    #[must_use]
    pub fn treemap_zoom(&self) -> Option<&str> {
        self.treemap_zoom.as_deref()
    }

    /// Zooms the treemap into a cluster subtree; `None` or an unknown id
    /// resets to the full hierarchy.
    pub fn zoom_treemap(&mut self, cluster_id: Option<&str>) {
        match cluster_id {
            Some(id) if self.result.cluster(id).is_none() => {
                warn!(cluster_id = id, "treemap zoom target not found; resetting to root");
                self.treemap_zoom = None;
            }
            Some(id) => self.treemap_zoom = Some(id.to_owned()),
            None => self.treemap_zoom = None,
        }
    }
}
