//! Cross-team rollup by product component.
//!
//! An epic tagged with several components contributes to every one of them.
//! The rollup always runs over the full, unfiltered row set, and its alert is
//! ticket-based, unlike the epic-based team alert.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{EpicRecord, StatusCategory};
use crate::team::AlertLevel;

/// Below this completion a product is red.
pub const PRODUCT_RED_BELOW_PCT: u64 = 30;
/// Below this completion a product is orange.
pub const PRODUCT_ORANGE_BELOW_PCT: u64 = 50;

/// Aggregated view of one product component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRollup {
    pub product: String,
    /// Distinct owning teams, first-seen order.
    pub teams: Vec<String>,
    pub epics: Vec<EpicRecord>,
    pub total: usize,
    pub termine: usize,
    pub en_cours: usize,
    pub total_tickets: u64,
    pub done_tickets: u64,
    /// Rounded ticket completion; 0 when the product has no tickets.
    pub pct: u64,
    pub alert: AlertLevel,
}

impl ProductRollup {
    fn new(product: &str) -> Self {
        Self {
            product: product.to_string(),
            teams: Vec::new(),
            epics: Vec::new(),
            total: 0,
            termine: 0,
            en_cours: 0,
            total_tickets: 0,
            done_tickets: 0,
            pct: 0,
            alert: AlertLevel::Red,
        }
    }

    fn push(&mut self, epic: &EpicRecord) {
        if !self.teams.iter().any(|t| t == &epic.team) {
            self.teams.push(epic.team.clone());
        }
        self.epics.push(epic.clone());
    }

    fn finish(mut self) -> Self {
        self.total = self.epics.len();
        self.termine = self.count(StatusCategory::Termine);
        self.en_cours = self.count(StatusCategory::EnCours);
        self.total_tickets = self
            .epics
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.tickets_total));
        self.done_tickets = self
            .epics
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.tickets_done));
        self.pct = rounded_pct(self.done_tickets, self.total_tickets);
        self.alert = product_alert(self.pct);
        self
    }

    fn count(&self, category: StatusCategory) -> usize {
        self.epics.iter().filter(|e| e.category() == category).count()
    }

    /// Team list as displayed in the product table.
    pub fn teams_text(&self) -> String {
        self.teams.join(", ")
    }
}

fn rounded_pct(done: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (done as f64 / total as f64 * 100.0).round() as u64
}

/// Ticket-completion alert of a product.
pub fn product_alert(pct: u64) -> AlertLevel {
    if pct < PRODUCT_RED_BELOW_PCT {
        AlertLevel::Red
    } else if pct < PRODUCT_ORANGE_BELOW_PCT {
        AlertLevel::Orange
    } else {
        AlertLevel::Green
    }
}

/// Build one rollup per component tag, in first-seen tag order.
///
/// Rows without components are skipped, as are blank tags left by stray commas.
/// `Dataset::products` applies the same rule via `EpicRecord::components`.
pub fn rollup_products(records: &[EpicRecord]) -> Vec<ProductRollup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rollups: Vec<ProductRollup> = Vec::new();

    for epic in records {
        for tag in epic.components() {
            let slot = match index.get(tag) {
                Some(&slot) => slot,
                None => {
                    rollups.push(ProductRollup::new(tag));
                    index.insert(tag.to_string(), rollups.len() - 1);
                    rollups.len() - 1
                }
            };
            rollups[slot].push(epic);
        }
    }

    tracing::debug!(products = rollups.len(), "product rollup computed");
    rollups.into_iter().map(ProductRollup::finish).collect()
}
