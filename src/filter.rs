// Dashboard filter options applied to the immutable event table.
//
// Each option restricts one dimension; omitted options impose no
// restriction. The three predicates compose with AND semantics and always
// produce a new owned table, never mutating the base one.
use crate::types::FireEvent;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Inclusive year range; bounds are normalized so order does not matter.
    pub year_range: Option<(i32, i32)>,
    /// Exact autonomous community display name.
    pub region: Option<String>,
    /// Set of cause display names.
    pub causes: Option<HashSet<String>>,
}

impl FilterOptions {
    pub fn is_unrestricted(&self) -> bool {
        self.year_range.is_none() && self.region.is_none() && self.causes.is_none()
    }

    pub fn apply(&self, events: &[FireEvent]) -> Vec<FireEvent> {
        let year_range = self.year_range.map(|(a, b)| (a.min(b), a.max(b)));
        events
            .iter()
            .filter(|ev| {
                year_range.map_or(true, |(lo, hi)| (lo..=hi).contains(&ev.year))
            })
            .filter(|ev| {
                self.region
                    .as_deref()
                    .map_or(true, |region| ev.region == region)
            })
            .filter(|ev| {
                self.causes
                    .as_ref()
                    .map_or(true, |causes| causes.contains(ev.cause))
            })
            .cloned()
            .collect()
    }
}
