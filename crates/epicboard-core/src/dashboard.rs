//! Dashboard view assembly.
//!
//! [`Dashboard::compute`] turns an ingested [`Dataset`] plus the current
//! [`SessionState`] into everything the presentation layer renders. The view is
//! rebuilt wholesale on every change; nothing in it is patched in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attention::{evaluate_attention, progress_bar_color, BarColor, EpicAttention};
use crate::domain::{EpicRecord, StatusCategory, StatusClass, TypeBadge};
use crate::ingest::Dataset;
use crate::metrics::METRICS;
use crate::obs;
use crate::policy::{
    filtered_team_epics, ordered_team_epics, sort_products, team_epics, DisplayFilter, ProductSort,
};
use crate::product::{rollup_products, ProductRollup};
use crate::session::SessionState;
use crate::team::{classify_team, team_alert, team_metrics, AlertLevel, TeamMetrics};

/// Header line of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionInfo {
    pub epics: usize,
    pub teams: usize,
    pub dropped_rows: usize,
    pub digest: String,
    pub generated_at: DateTime<Utc>,
}

/// One row of the consolidated view. Always computed on Build epics: Run is
/// continuous flow and says nothing about mid-PI completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalTeamRow {
    pub team: String,
    pub metrics: TeamMetrics,
    /// Alert of the Build metrics shown in this row.
    pub alert: AlertLevel,
    /// Team badge over all epics.
    pub badge: AlertLevel,
    pub run_count: usize,
}

/// Epic counts per display filter, for the filter selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCounts {
    pub build: usize,
    pub run: usize,
    pub all: usize,
}

/// An epic with everything its row needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpicAnnotation {
    pub epic: EpicRecord,
    pub category: StatusCategory,
    pub status_class: StatusClass,
    /// Rounded ticket completion.
    pub completion_pct: u64,
    pub attention: EpicAttention,
    pub bar_color: BarColor,
    pub type_badge: Option<TypeBadge>,
}

impl EpicAnnotation {
    pub fn from_record(epic: &EpicRecord) -> Self {
        Self {
            category: epic.category(),
            status_class: epic.status_class(),
            completion_pct: epic.completion_pct().round() as u64,
            attention: evaluate_attention(epic),
            bar_color: progress_bar_color(epic),
            type_badge: epic.type_badge(),
            epic: epic.clone(),
        }
    }
}

/// Detail view of one team under its active display filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamView {
    pub team: String,
    pub filter: DisplayFilter,
    pub counts: FilterCounts,
    /// Metrics of the filtered epics.
    pub metrics: TeamMetrics,
    /// Alert of the filtered metrics.
    pub alert: AlertLevel,
    /// Team badge over all epics; independent of `filter`.
    pub badge: AlertLevel,
    /// Filtered epics in display order.
    pub epics: Vec<EpicAnnotation>,
}

/// Everything rendered for one dataset and session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub extraction: ExtractionInfo,
    pub global: Vec<GlobalTeamRow>,
    pub teams: Vec<TeamView>,
    pub product_sort: ProductSort,
    pub products: Vec<ProductRollup>,
}

impl DashboardView {
    pub fn team(&self, name: &str) -> Option<&TeamView> {
        self.teams.iter().find(|t| t.team == name)
    }
}

/// Pure recomputation entry points.
pub struct Dashboard;

impl Dashboard {
    pub fn compute(dataset: &Dataset, session: &SessionState) -> DashboardView {
        let _span = obs::DatasetSpan::enter(&dataset.digest);
        let team_names = dataset.teams();

        let global = team_names
            .iter()
            .map(|team| Self::global_row(dataset, team))
            .collect();
        let teams = team_names
            .iter()
            .map(|team| Self::team_view(dataset, session, team))
            .collect();
        let products = Self::product_table(dataset, session.product_sort());

        let view = DashboardView {
            extraction: ExtractionInfo {
                epics: dataset.len(),
                teams: team_names.len(),
                dropped_rows: dataset.stats.dropped,
                digest: dataset.digest.clone(),
                generated_at: Utc::now(),
            },
            global,
            teams,
            product_sort: session.product_sort(),
            products,
        };

        METRICS.inc_recomputations();
        obs::emit_dashboard_computed(&dataset.digest, view.teams.len(), view.products.len());
        view
    }

    /// Team badge: alert over every epic of the team, whatever the filter.
    pub fn team_badge(dataset: &Dataset, team: &str) -> AlertLevel {
        team_alert(team_epics(&dataset.records, team))
    }

    pub fn global_row(dataset: &Dataset, team: &str) -> GlobalTeamRow {
        let build = filtered_team_epics(&dataset.records, team, DisplayFilter::Build);
        let metrics = team_metrics(build);
        GlobalTeamRow {
            team: team.to_string(),
            alert: classify_team(&metrics),
            metrics,
            badge: Self::team_badge(dataset, team),
            run_count: filtered_team_epics(&dataset.records, team, DisplayFilter::Run).len(),
        }
    }

    /// View of `team` under its session filter. Unknown teams give an empty view.
    pub fn team_view(dataset: &Dataset, session: &SessionState, team: &str) -> TeamView {
        let filter = session.filter_for(team);
        let all = team_epics(&dataset.records, team);
        let run = all.iter().filter(|e| e.is_run()).count();
        let counts = FilterCounts {
            build: all.len() - run,
            run,
            all: all.len(),
        };

        let ordered = ordered_team_epics(&dataset.records, team, filter);
        let metrics = team_metrics(ordered.iter().copied());

        TeamView {
            team: team.to_string(),
            filter,
            counts,
            alert: classify_team(&metrics),
            metrics,
            badge: team_alert(all),
            epics: ordered.into_iter().map(EpicAnnotation::from_record).collect(),
        }
    }

    /// Product rollup over the unfiltered row set, in `sort` order.
    pub fn product_table(dataset: &Dataset, sort: ProductSort) -> Vec<ProductRollup> {
        let mut products = rollup_products(&dataset.records);
        sort_products(&mut products, sort);
        products
    }
}
