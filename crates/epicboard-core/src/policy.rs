//! Display filtering and ordering rules.
//!
//! - [`DisplayFilter`] selects which of a team's epics are shown (Build/Run/All)
//! - [`ordered_team_epics`] orders a team's epics by status category
//! - [`ProductSort`] / [`sort_products`] order the product table by one column

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{EpicRecord, EpicboardError};
use crate::product::ProductRollup;

// ---------------------------------------------------------------------------
// Team display filter
// ---------------------------------------------------------------------------

/// Which of a team's epics are displayed.
///
/// Affects the displayed metrics and epic list only. Team badges and the
/// product rollup never see this filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayFilter {
    /// Everything that is not explicitly Run, including untyped epics.
    #[default]
    Build,
    Run,
    All,
}

impl DisplayFilter {
    pub fn includes(self, epic: &EpicRecord) -> bool {
        match self {
            Self::Build => !epic.is_run(),
            Self::Run => epic.is_run(),
            Self::All => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Run => "run",
            Self::All => "all",
        }
    }
}

impl fmt::Display for DisplayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayFilter {
    type Err = EpicboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "build" => Ok(Self::Build),
            "run" => Ok(Self::Run),
            "all" => Ok(Self::All),
            _ => Err(EpicboardError::UnknownFilter(s.to_string())),
        }
    }
}

/// All epics of `team`, in input order. An unknown team yields an empty set.
pub fn team_epics<'a>(records: &'a [EpicRecord], team: &str) -> Vec<&'a EpicRecord> {
    records.iter().filter(|e| e.team == team).collect()
}

/// Epics of `team` that pass `filter`, in input order.
pub fn filtered_team_epics<'a>(
    records: &'a [EpicRecord],
    team: &str,
    filter: DisplayFilter,
) -> Vec<&'a EpicRecord> {
    records
        .iter()
        .filter(|e| e.team == team && filter.includes(e))
        .collect()
}

/// Stable sort by category rank: in progress, scoping, to do, finished.
/// Epics of the same category keep their input order.
pub fn sort_team_epics(epics: &mut [&EpicRecord]) {
    epics.sort_by_key(|e| e.category().rank());
}

/// Filtered and ordered epic list for a team view.
pub fn ordered_team_epics<'a>(
    records: &'a [EpicRecord],
    team: &str,
    filter: DisplayFilter,
) -> Vec<&'a EpicRecord> {
    let mut epics = filtered_team_epics(records, team, filter);
    sort_team_epics(&mut epics);
    epics
}

// ---------------------------------------------------------------------------
// Product table ordering
// ---------------------------------------------------------------------------

/// Sortable column of the product table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortKey {
    #[default]
    ProductName,
    Teams,
    EpicCount,
    TerminatedCount,
    InProgressCount,
    DoneTickets,
    Completion,
    Alert,
}

impl ProductSortKey {
    pub const ALL: [ProductSortKey; 8] = [
        Self::ProductName,
        Self::Teams,
        Self::EpicCount,
        Self::TerminatedCount,
        Self::InProgressCount,
        Self::DoneTickets,
        Self::Completion,
        Self::Alert,
    ];

    /// Column name accepted on the command line.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::ProductName => "product",
            Self::Teams => "teams",
            Self::EpicCount => "epics",
            Self::TerminatedCount => "done",
            Self::InProgressCount => "in-progress",
            Self::DoneTickets => "tickets",
            Self::Completion => "completion",
            Self::Alert => "alert",
        }
    }

    fn compare(self, a: &ProductRollup, b: &ProductRollup) -> Ordering {
        match self {
            Self::ProductName => a.product.to_lowercase().cmp(&b.product.to_lowercase()),
            Self::Teams => a
                .teams_text()
                .to_lowercase()
                .cmp(&b.teams_text().to_lowercase()),
            Self::EpicCount => a.total.cmp(&b.total),
            Self::TerminatedCount => a.termine.cmp(&b.termine),
            Self::InProgressCount => a.en_cours.cmp(&b.en_cours),
            Self::DoneTickets => a.done_tickets.cmp(&b.done_tickets),
            Self::Completion => a.pct.cmp(&b.pct),
            Self::Alert => a.alert.severity_rank().cmp(&b.alert.severity_rank()),
        }
    }
}

impl fmt::Display for ProductSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for ProductSortKey {
    type Err = EpicboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.column_name() == wanted)
            .ok_or_else(|| EpicboardError::UnknownSortKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Header marker for the active column.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Active product-table sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSort {
    pub key: ProductSortKey,
    pub direction: SortDirection,
}

impl ProductSort {
    pub fn new(key: ProductSortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Header click: the active column flips direction, any other column
    /// becomes active ascending.
    pub fn click(self, key: ProductSortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.reversed(),
            }
        } else {
            Self {
                key,
                direction: SortDirection::Ascending,
            }
        }
    }
}

/// Stable sort of the product table. Ties keep their current relative order
/// in both directions.
pub fn sort_products(rollups: &mut [ProductRollup], sort: ProductSort) {
    rollups.sort_by(|a, b| {
        let ord = sort.key.compare(a, b);
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::rollup_products;

    fn typed(team: &str, key: &str, status: &str, work_type: &str) -> EpicRecord {
        EpicRecord::new(team, key, "t", status, 0, 0).with_work_type(work_type)
    }

    #[test]
    fn test_build_filter_includes_untyped() {
        let rows = vec![
            typed("T1", "E1", "En cours", "Build"),
            typed("T1", "E2", "En cours", ""),
            typed("T1", "E3", "En cours", "RUN"),
            typed("T2", "E4", "En cours", "Build"),
        ];
        let keys = |f: DisplayFilter| -> Vec<String> {
            filtered_team_epics(&rows, "T1", f)
                .into_iter()
                .map(|e| e.epic_key.clone())
                .collect()
        };
        assert_eq!(keys(DisplayFilter::Build), vec!["E1", "E2"]);
        assert_eq!(keys(DisplayFilter::Run), vec!["E3"]);
        assert_eq!(keys(DisplayFilter::All), vec!["E1", "E2", "E3"]);
    }

    #[test]
    fn test_unknown_team_is_empty() {
        let rows = vec![typed("T1", "E1", "En cours", "")];
        assert!(filtered_team_epics(&rows, "Nope", DisplayFilter::All).is_empty());
    }

    #[test]
    fn test_team_epics_ordered_by_category_and_stable() {
        let rows = vec![
            typed("T1", "done-1", "Terminé", ""),
            typed("T1", "todo-1", "À faire", ""),
            typed("T1", "wip-1", "En cours", ""),
            typed("T1", "scope-1", "À cadrer", ""),
            typed("T1", "wip-2", "En cours", ""),
            typed("T1", "todo-2", "Backlog", ""),
        ];
        let keys: Vec<&str> = ordered_team_epics(&rows, "T1", DisplayFilter::All)
            .into_iter()
            .map(|e| e.epic_key.as_str())
            .collect();
        assert_eq!(
            keys,
            vec!["wip-1", "wip-2", "scope-1", "todo-1", "todo-2", "done-1"]
        );
    }

    #[test]
    fn test_filter_parses_case_insensitively() {
        assert_eq!("RUN".parse::<DisplayFilter>().ok(), Some(DisplayFilter::Run));
        assert_eq!("all".parse::<DisplayFilter>().ok(), Some(DisplayFilter::All));
        assert!("ops".parse::<DisplayFilter>().is_err());
        assert_eq!(DisplayFilter::default(), DisplayFilter::Build);
    }

    #[test]
    fn test_sort_key_round_trips_column_names() {
        for key in ProductSortKey::ALL {
            assert_eq!(key.column_name().parse::<ProductSortKey>().ok(), Some(key));
        }
        assert!("velocity".parse::<ProductSortKey>().is_err());
    }

    #[test]
    fn test_click_toggles_active_and_resets_new_column() {
        let sort = ProductSort::default();
        assert_eq!(sort.key, ProductSortKey::ProductName);
        assert_eq!(sort.direction, SortDirection::Ascending);

        let sort = sort.click(ProductSortKey::ProductName);
        assert_eq!(sort.direction, SortDirection::Descending);

        let sort = sort.click(ProductSortKey::Completion);
        assert_eq!(sort, ProductSort::new(ProductSortKey::Completion, SortDirection::Ascending));

        let sort = sort.click(ProductSortKey::Completion).click(ProductSortKey::Completion);
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    fn products() -> Vec<ProductRollup> {
        let rows = vec![
            EpicRecord::new("T2", "E1", "t", "En cours", 10, 1).with_components("beta"),
            EpicRecord::new("T1", "E2", "t", "Terminé", 10, 9).with_components("Alpha"),
            EpicRecord::new("T1", "E3", "t", "En cours", 10, 4).with_components("Gamma"),
            EpicRecord::new("T3", "E4", "t", "En cours", 10, 4).with_components("delta"),
        ];
        rollup_products(&rows)
    }

    fn names(rollups: &[ProductRollup]) -> Vec<&str> {
        rollups.iter().map(|r| r.product.as_str()).collect()
    }

    #[test]
    fn test_product_name_sort_is_case_insensitive() {
        let mut table = products();
        sort_products(&mut table, ProductSort::default());
        assert_eq!(names(&table), vec!["Alpha", "beta", "delta", "Gamma"]);

        sort_products(
            &mut table,
            ProductSort::new(ProductSortKey::ProductName, SortDirection::Descending),
        );
        assert_eq!(names(&table), vec!["Gamma", "delta", "beta", "Alpha"]);
    }

    #[test]
    fn test_alert_sort_puts_red_first_and_keeps_ties_stable() {
        let mut table = products();
        sort_products(&mut table, ProductSort::new(ProductSortKey::Alert, SortDirection::Ascending));
        // beta red(10%), Gamma orange(40%), delta orange(40%), Alpha green(90%)
        assert_eq!(names(&table), vec!["beta", "Gamma", "delta", "Alpha"]);

        sort_products(&mut table, ProductSort::new(ProductSortKey::Alert, SortDirection::Descending));
        assert_eq!(names(&table), vec!["Alpha", "Gamma", "delta", "beta"]);
    }

    #[test]
    fn test_numeric_sort_by_completion() {
        let mut table = products();
        sort_products(
            &mut table,
            ProductSort::new(ProductSortKey::Completion, SortDirection::Descending),
        );
        assert_eq!(table[0].product, "Alpha");
        assert_eq!(table[3].product, "beta");
    }

    #[test]
    fn test_teams_sort_uses_team_list_text() {
        let mut table = products();
        sort_products(&mut table, ProductSort::new(ProductSortKey::Teams, SortDirection::Ascending));
        assert_eq!(names(&table), vec!["Alpha", "Gamma", "beta", "delta"]);
    }
}
