use std::collections::HashSet;

use ordered_float::OrderedFloat;

use crate::core::Argument;

use super::ChartView;

impl ChartView {
    /// Resolves the argument nearest to a data-space position, or `None`
    /// when nothing lies within `max_distance`.
    ///
    /// While a filter is active only surviving arguments are candidates;
    /// dimmed points never win the hover. Exact ties resolve to the
    /// earliest argument in input order.
    #[must_use]
    pub fn hover_argument(&self, x: f64, y: f64, max_distance: f64) -> Option<&Argument> {
        let visible: Option<HashSet<&str>> = self
            .filtered_ids
            .as_deref()
            .map(|ids| ids.iter().map(String::as_str).collect());

        let mut best: Option<(OrderedFloat<f64>, &Argument)> = None;
        for argument in &self.result.arguments {
            if visible
                .as_ref()
                .is_some_and(|set| !set.contains(argument.arg_id.as_str()))
            {
                continue;
            }
            let dx = argument.x - x;
            let dy = argument.y - y;
            let distance = OrderedFloat((dx * dx + dy * dy).sqrt());
            if distance.0 > max_distance {
                continue;
            }
            match best {
                Some((current, _)) if current <= distance => {}
                _ => best = Some((distance, argument)),
            }
        }
        best.map(|(_, argument)| argument)
    }
}
