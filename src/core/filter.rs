use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[cfg(feature = "parallel-filter")]
use rayon::prelude::*;

use crate::core::report::{Argument, ArgumentId, AttributeValue, ClusterId};

/// Inclusive numeric window over one attribute.
///
/// Participates in filtering only while `enabled`; values that do not parse
/// as numbers pass only when `include_missing` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRangeFilter {
    pub min: f64,
    pub max: f64,
    pub enabled: bool,
    pub include_missing: bool,
}

impl NumericRangeFilter {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            enabled: true,
            include_missing: false,
        }
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_include_missing(mut self, include_missing: bool) -> Self {
        self.include_missing = include_missing;
        self
    }

    fn admits(&self, value: Option<f64>) -> bool {
        match value {
            Some(number) => number >= self.min && number <= self.max,
            None => self.include_missing,
        }
    }
}

/// User-chosen filter dimensions, recomputed against the full argument set on
/// every change. All active dimensions combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Selected display values per attribute name; an empty set is inactive.
    #[serde(default)]
    pub attribute_filters: IndexMap<String, BTreeSet<String>>,
    /// Numeric windows per attribute name.
    #[serde(default)]
    pub range_filters: IndexMap<String, NumericRangeFilter>,
    /// Case-insensitive substring over argument text; empty is inactive.
    #[serde(default)]
    pub text_search: String,
}

impl FilterParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text_search(mut self, needle: impl Into<String>) -> Self {
        self.text_search = needle.into();
        self
    }

    #[must_use]
    pub fn with_attribute_selection<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attribute_filters
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_range(mut self, name: impl Into<String>, range: NumericRangeFilter) -> Self {
        self.range_filters.insert(name.into(), range);
        self
    }

    /// Whether any filter dimension participates in matching.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.text_search.is_empty()
            || self.attribute_filters.values().any(|set| !set.is_empty())
            || self.range_filters.values().any(|range| range.enabled)
    }
}

/// Count pair backing "N of M opinions shown" displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub matched: usize,
    pub total: usize,
}

/// Applies `params` to `arguments` and returns surviving ids in input order.
///
/// Returns `None` when no dimension is active: the no-filter sentinel, which
/// downstream rendering must treat as "show everything at full opacity".
/// `Some(vec![])` is distinct and means "nothing matches; dim everything".
/// Identical inputs always yield identical ordered output.
#[must_use]
pub fn filtered_argument_ids(
    arguments: &[Argument],
    params: &FilterParams,
) -> Option<Vec<ArgumentId>> {
    if !params.is_active() {
        return None;
    }
    let needle = params.text_search.to_lowercase();

    // Active dimensions are typically one or two; flatten them once so the
    // per-argument pass never revisits disabled entries.
    let selections: SmallVec<[(&str, &BTreeSet<String>); 4]> = params
        .attribute_filters
        .iter()
        .filter(|(_, selected)| !selected.is_empty())
        .map(|(name, selected)| (name.as_str(), selected))
        .collect();
    let ranges: SmallVec<[(&str, NumericRangeFilter); 4]> = params
        .range_filters
        .iter()
        .filter(|(_, range)| range.enabled)
        .map(|(name, range)| (name.as_str(), *range))
        .collect();

    // For large argument sets, optional parallel matching keeps output order
    // and match semantics identical to the sequential path.
    #[cfg(feature = "parallel-filter")]
    {
        Some(
            arguments
                .par_iter()
                .filter(|argument| argument_matches(argument, &needle, &selections, &ranges))
                .map(|argument| argument.arg_id.clone())
                .collect(),
        )
    }

    #[cfg(not(feature = "parallel-filter"))]
    {
        Some(
            arguments
                .iter()
                .filter(|argument| argument_matches(argument, &needle, &selections, &ranges))
                .map(|argument| argument.arg_id.clone())
                .collect(),
        )
    }
}

fn argument_matches(
    argument: &Argument,
    needle: &str,
    selections: &[(&str, &BTreeSet<String>)],
    ranges: &[(&str, NumericRangeFilter)],
) -> bool {
    if !needle.is_empty() && !argument.text.to_lowercase().contains(needle) {
        return false;
    }

    for (name, selected) in selections {
        // A missing attribute can never be in the selected set.
        let in_selection = argument
            .attributes
            .get(*name)
            .is_some_and(|value| selected.contains(&value.display()));
        if !in_selection {
            return false;
        }
    }

    for (name, range) in ranges {
        let value = argument
            .attributes
            .get(*name)
            .and_then(AttributeValue::as_number);
        if !range.admits(value) {
            return false;
        }
    }

    true
}

/// Ids of clusters, at any level, holding at least one surviving argument.
///
/// Clusters outside the returned set are dimmed (`all_filtered`), never
/// removed, so the hierarchy keeps its shape for navigation.
#[must_use]
pub fn clusters_with_matches(
    arguments: &[Argument],
    filtered_ids: &[ArgumentId],
) -> HashSet<ClusterId> {
    let surviving: HashSet<&str> = filtered_ids.iter().map(String::as_str).collect();
    let mut live = HashSet::new();
    for argument in arguments {
        if surviving.contains(argument.arg_id.as_str()) {
            live.extend(argument.cluster_ids.iter().cloned());
        }
    }
    live
}

/// Matched/total counts for the current filter output.
#[must_use]
pub fn filter_summary(arguments: &[Argument], filtered: Option<&[ArgumentId]>) -> FilterSummary {
    FilterSummary {
        matched: filtered.map_or(arguments.len(), <[ArgumentId]>::len),
        total: arguments.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::NumericRangeFilter;

    #[test]
    fn range_admits_inclusive_bounds() {
        let range = NumericRangeFilter::new(10.0, 20.0);
        assert!(range.admits(Some(10.0)));
        assert!(range.admits(Some(20.0)));
        assert!(!range.admits(Some(9.999)));
        assert!(!range.admits(Some(20.001)));
    }

    #[test]
    fn unparsed_value_needs_include_missing() {
        let strict = NumericRangeFilter::new(0.0, 1.0);
        assert!(!strict.admits(None));

        let lenient = NumericRangeFilter::new(0.0, 1.0).with_include_missing(true);
        assert!(lenient.admits(None));
    }
}
