use std::collections::HashMap;

use crate::core::{Point, convex_hull};

use super::ChartView;

/// Runtime metrics exposed by the per-view hull cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HullCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

#[derive(Debug, Default)]
pub(super) struct HullCache {
    entries: HashMap<String, Vec<Point>>,
    hits: u64,
    misses: u64,
}

impl HullCache {
    const MAX_ENTRIES: usize = 1024;

    fn get(&mut self, cluster_id: &str) -> Option<Vec<Point>> {
        let value = self.entries.get(cluster_id).cloned();
        if value.is_some() {
            self.hits = self.hits.saturating_add(1);
        }
        value
    }

    fn insert(&mut self, cluster_id: &str, hull: Vec<Point>) {
        self.misses = self.misses.saturating_add(1);
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.clear();
        }
        self.entries.insert(cluster_id.to_owned(), hull);
    }

    pub(super) fn invalidate(&mut self) {
        self.entries.clear();
    }

    fn stats(&self) -> HullCacheStats {
        HullCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}

impl ChartView {
    /// Convex hull of a cluster's member arguments, cached per cluster and
    /// dropped wholesale on the next result load.
    ///
    /// Unknown clusters resolve to `None`; clusters with fewer than three
    /// member points yield their points unchanged.
    pub fn cluster_hull(&mut self, cluster_id: &str) -> Option<Vec<Point>> {
        self.result.cluster(cluster_id)?;
        if let Some(hull) = self.hull_cache.get(cluster_id) {
            return Some(hull);
        }
        let points: Vec<Point> = self
            .result
            .arguments
            .iter()
            .filter(|argument| argument.cluster_ids.iter().any(|id| id == cluster_id))
            .map(|argument| Point::new(argument.x, argument.y))
            .collect();
        let hull = convex_hull(&points);
        self.hull_cache.insert(cluster_id, hull.clone());
        Some(hull)
    }

    #[must_use]
    pub fn hull_cache_stats(&self) -> HullCacheStats {
        self.hull_cache.stats()
    }
}
