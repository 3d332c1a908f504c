//! Team metrics aggregation.
//!
//! Metrics are epic-based rather than ticket-based: Build scope is not fixed
//! mid-PI, so epic status is the reliable signal. Ticket totals are kept as a
//! secondary signal.

use serde::{Deserialize, Serialize};

use crate::domain::{EpicRecord, StatusCategory};

/// Counts and percentages for one set of epics.
///
/// Every percentage is relative to the same set the counts came from, and is
/// `0.0` when its denominator is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMetrics {
    pub total_epics: usize,
    pub termine: usize,
    pub en_cours: usize,
    pub a_cadrer: usize,
    pub a_faire: usize,
    /// `a_cadrer + a_faire`.
    pub non_demarrees: usize,
    pub total_tickets: u64,
    pub done_tickets: u64,
    pub pct_tickets_done: f64,
    pub pct_epics_terminees: f64,
    pub pct_epics_en_cours: f64,
    pub pct_a_cadrer: f64,
    pub pct_non_demarrees: f64,
    /// Finished plus in-progress epics.
    pub pct_epics_actives: f64,
}

fn pct(part: u64, whole: u64) -> f64 {
    if whole > 0 {
        part as f64 / whole as f64 * 100.0
    } else {
        0.0
    }
}

/// Reduce a set of epics to [`TeamMetrics`]. Order of the input does not matter.
pub fn team_metrics<'a, I>(epics: I) -> TeamMetrics
where
    I: IntoIterator<Item = &'a EpicRecord>,
{
    let mut m = TeamMetrics::default();

    for epic in epics {
        m.total_epics += 1;
        match epic.category() {
            StatusCategory::Termine => m.termine += 1,
            StatusCategory::EnCours => m.en_cours += 1,
            StatusCategory::ACadrer => m.a_cadrer += 1,
            StatusCategory::AFaire => m.a_faire += 1,
        }
        m.total_tickets = m.total_tickets.saturating_add(epic.tickets_total);
        m.done_tickets = m.done_tickets.saturating_add(epic.tickets_done);
    }

    m.non_demarrees = m.a_cadrer + m.a_faire;

    let total = m.total_epics as u64;
    m.pct_tickets_done = pct(m.done_tickets, m.total_tickets);
    m.pct_epics_terminees = pct(m.termine as u64, total);
    m.pct_epics_en_cours = pct(m.en_cours as u64, total);
    m.pct_a_cadrer = pct(m.a_cadrer as u64, total);
    m.pct_non_demarrees = pct(m.non_demarrees as u64, total);
    m.pct_epics_actives = pct((m.termine + m.en_cours) as u64, total);
    m
}
