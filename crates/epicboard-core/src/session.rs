//! Per-session UI selections.
//!
//! The selections (display filter per team, product-table sort) live in an
//! explicit value. Every change returns a new [`SessionState`]; views are then
//! recomputed from scratch with [`crate::dashboard::Dashboard::compute`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::obs;
use crate::policy::{DisplayFilter, ProductSort, ProductSortKey};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Filter for teams without an explicit selection.
    default_filter: DisplayFilter,
    team_filters: BTreeMap<String, DisplayFilter>,
    product_sort: ProductSort,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_filter(mut self, filter: DisplayFilter) -> Self {
        self.default_filter = filter;
        self
    }

    /// Active filter of `team`; teams are independent of each other.
    pub fn filter_for(&self, team: &str) -> DisplayFilter {
        self.team_filters
            .get(team)
            .copied()
            .unwrap_or(self.default_filter)
    }

    pub fn with_team_filter(&self, team: &str, filter: DisplayFilter) -> Self {
        let previous = self.filter_for(team);
        let mut next = self.clone();
        next.team_filters.insert(team.to_string(), filter);
        obs::emit_team_filter_changed(team, previous, filter);
        next
    }

    pub fn product_sort(&self) -> ProductSort {
        self.product_sort
    }

    pub fn with_product_sort(&self, sort: ProductSort) -> Self {
        let mut next = self.clone();
        next.product_sort = sort;
        obs::emit_product_sort_changed(sort);
        next
    }

    /// Apply a product-table header click.
    pub fn with_product_click(&self, key: ProductSortKey) -> Self {
        self.with_product_sort(self.product_sort.click(key))
    }
}
