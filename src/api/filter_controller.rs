use crate::core::{
    AttributeSummary, FilterParams, FilterSummary, clusters_with_matches, filter_summary,
    filtered_argument_ids, summarize_attributes,
};

use super::ChartView;

impl ChartView {
    /// Applies new filter parameters and recomputes the visible-argument
    /// pass and the live-cluster set in one step.
    pub fn set_filter(&mut self, filter: FilterParams) {
        self.filter = filter;
        self.refresh_filter_state();
    }

    /// Drops every active criterion; all arguments become visible again.
    pub fn clear_filter(&mut self) {
        self.set_filter(FilterParams::default());
    }

    #[must_use]
    pub fn filter(&self) -> &FilterParams {
        &self.filter
    }

    /// Ids of arguments surviving the active filter, in argument input
    /// order. `None` while no filter is active.
    #[must_use]
    pub fn filtered_argument_ids(&self) -> Option<&[String]> {
        self.filtered_ids.as_deref()
    }

    #[must_use]
    pub fn filter_summary(&self) -> FilterSummary {
        filter_summary(&self.result.arguments, self.filtered_ids.as_deref())
    }

    /// Per-attribute digests of the loaded arguments, for building filter
    /// controls. Independent of the active filter.
    #[must_use]
    pub fn attribute_summaries(&self) -> Vec<AttributeSummary> {
        summarize_attributes(&self.result.arguments)
    }

    /// Whether a cluster lost every argument to the active filter. Always
    /// `false` when no filter is active.
    #[must_use]
    pub fn is_all_filtered(&self, cluster_id: &str) -> bool {
        self.live_clusters
            .as_ref()
            .is_some_and(|live| !live.contains(cluster_id))
    }

    pub(super) fn refresh_filter_state(&mut self) {
        self.filtered_ids = filtered_argument_ids(&self.result.arguments, &self.filter);
        self.live_clusters = self
            .filtered_ids
            .as_deref()
            .map(|ids| clusters_with_matches(&self.result.arguments, ids));
    }
}
