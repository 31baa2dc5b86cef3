use indexmap::{IndexMap, IndexSet};

use crate::core::report::Argument;

/// How an attribute's observed values behave under filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Every present value parses as a number; range filtering applies.
    Numeric,
    /// No present value parses as a number; set filtering applies.
    Categorical,
    /// Some values parse, some do not.
    Mixed,
}

/// Per-attribute digest for building filter controls.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSummary {
    pub name: String,
    pub kind: AttributeKind,
    /// Display values in first-appearance order.
    pub distinct_values: Vec<String>,
    /// Observed `(min, max)` over numeric interpretations, when any parse.
    pub numeric_range: Option<(f64, f64)>,
    /// Arguments with no value (absent or blank) for this attribute.
    pub missing_count: usize,
}

#[derive(Default)]
struct Accumulator {
    values: IndexSet<String>,
    numeric_min: Option<f64>,
    numeric_max: Option<f64>,
    present: usize,
    numeric: usize,
    missing: usize,
}

/// Summarizes every attribute name appearing across `arguments`.
///
/// Names and distinct values keep first-appearance order so derived filter
/// controls are stable across recomputation.
#[must_use]
pub fn summarize_attributes(arguments: &[Argument]) -> Vec<AttributeSummary> {
    let mut names: IndexSet<&str> = IndexSet::new();
    for argument in arguments {
        for name in argument.attributes.keys() {
            names.insert(name.as_str());
        }
    }

    let mut accumulators: IndexMap<&str, Accumulator> = names
        .iter()
        .map(|name| (*name, Accumulator::default()))
        .collect();

    for argument in arguments {
        for (name, acc) in &mut accumulators {
            let Some(value) = argument.attributes.get(*name) else {
                acc.missing += 1;
                continue;
            };
            if value.is_blank() {
                acc.missing += 1;
                continue;
            }
            acc.present += 1;
            acc.values.insert(value.display());
            if let Some(number) = value.as_number() {
                acc.numeric += 1;
                acc.numeric_min = Some(acc.numeric_min.map_or(number, |min| min.min(number)));
                acc.numeric_max = Some(acc.numeric_max.map_or(number, |max| max.max(number)));
            }
        }
    }

    accumulators
        .into_iter()
        .map(|(name, acc)| {
            let kind = if acc.present == 0 || acc.numeric == 0 {
                AttributeKind::Categorical
            } else if acc.numeric == acc.present {
                AttributeKind::Numeric
            } else {
                AttributeKind::Mixed
            };
            AttributeSummary {
                name: name.to_owned(),
                kind,
                distinct_values: acc.values.into_iter().collect(),
                numeric_range: acc.numeric_min.zip(acc.numeric_max),
                missing_count: acc.missing,
            }
        })
        .collect()
}
