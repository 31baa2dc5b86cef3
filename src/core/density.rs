use serde::{Deserialize, Serialize};

use crate::core::report::Cluster;

/// Thresholds for the dense-cluster subset view.
///
/// `max_density` is a percentile ceiling on `density_rank_percentile`
/// (low rank = distinctive cluster), `min_value` a floor on cluster size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityFilter {
    pub max_density: f64,
    pub min_value: f64,
}

impl Default for DensityFilter {
    fn default() -> Self {
        Self {
            max_density: 0.2,
            min_value: 5.0,
        }
    }
}

impl DensityFilter {
    #[must_use]
    pub fn new(max_density: f64, min_value: f64) -> Self {
        Self {
            max_density,
            min_value,
        }
    }
}

/// Output of [`select_dense_clusters`].
#[derive(Debug, Clone, PartialEq)]
pub struct DensitySelection {
    /// Shallower levels unchanged plus the retained deepest-level clusters,
    /// in input order.
    pub clusters: Vec<Cluster>,
    /// True when the cut removed every deepest-level cluster; callers disable
    /// the dense display mode instead of rendering a blank chart.
    pub deepest_level_empty: bool,
}

/// Applies the density/value cut to the deepest hierarchy level only.
///
/// Clusters at all shallower levels pass through untouched; a deepest-level
/// cluster is retained iff `density_rank_percentile <= max_density` and
/// `value >= min_value`.
#[must_use]
pub fn select_dense_clusters(clusters: &[Cluster], filter: DensityFilter) -> DensitySelection {
    let Some(deepest) = clusters.iter().map(|cluster| cluster.level).max() else {
        return DensitySelection {
            clusters: Vec::new(),
            deepest_level_empty: true,
        };
    };

    let mut retained_deepest = 0usize;
    let mut selected = Vec::with_capacity(clusters.len());
    for cluster in clusters {
        if cluster.level < deepest {
            selected.push(cluster.clone());
            continue;
        }
        if cluster.density_rank_percentile <= filter.max_density && cluster.value >= filter.min_value
        {
            retained_deepest += 1;
            selected.push(cluster.clone());
        }
    }

    DensitySelection {
        clusters: selected,
        deepest_level_empty: retained_deepest == 0,
    }
}
