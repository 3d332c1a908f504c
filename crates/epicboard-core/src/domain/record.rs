//! Ingested epic row.

use serde::{Deserialize, Serialize};

use super::status::{categorize_status, status_class, StatusCategory, StatusClass};

/// One row of the epic export.
///
/// `status` is kept verbatim; it is only ever interpreted through
/// [`categorize_status`] and [`status_class`]. `tickets_done` is not checked
/// against `tickets_total`, so completion can exceed 100%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpicRecord {
    pub team: String,
    pub epic_key: String,
    pub title: String,
    pub status: String,
    pub tickets_total: u64,
    pub tickets_done: u64,
    /// Preserved from the export; no aggregation reads it.
    pub tickets_in_progress: u64,
    pub work_type: String,
    /// Raw comma-separated product-component tags.
    pub product_components: String,
}

impl EpicRecord {
    pub fn new(
        team: impl Into<String>,
        epic_key: impl Into<String>,
        title: impl Into<String>,
        status: impl Into<String>,
        tickets_total: u64,
        tickets_done: u64,
    ) -> Self {
        Self {
            team: team.into(),
            epic_key: epic_key.into(),
            title: title.into(),
            status: status.into(),
            tickets_total,
            tickets_done,
            tickets_in_progress: 0,
            work_type: String::new(),
            product_components: String::new(),
        }
    }

    pub fn with_work_type(mut self, work_type: impl Into<String>) -> Self {
        self.work_type = work_type.into();
        self
    }

    pub fn with_components(mut self, components: impl Into<String>) -> Self {
        self.product_components = components.into();
        self
    }

    pub fn with_in_progress(mut self, tickets_in_progress: u64) -> Self {
        self.tickets_in_progress = tickets_in_progress;
        self
    }

    pub fn category(&self) -> StatusCategory {
        categorize_status(&self.status)
    }

    pub fn status_class(&self) -> StatusClass {
        status_class(&self.status)
    }

    /// Ticket completion in percent; `0.0` when the epic has no tickets.
    pub fn completion_pct(&self) -> f64 {
        if self.tickets_total > 0 {
            self.tickets_done as f64 / self.tickets_total as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn work_kind(&self) -> WorkKind {
        WorkKind::parse(&self.work_type)
    }

    /// Only an explicit `run` type is Run; empty or unknown types count as Build.
    pub fn is_run(&self) -> bool {
        self.work_kind() == WorkKind::Run
    }

    pub fn type_badge(&self) -> Option<TypeBadge> {
        if self.work_type.trim().is_empty() {
            return None;
        }
        Some(TypeBadge {
            label: self.work_type.clone(),
            kind: self.work_kind(),
        })
    }

    /// Trimmed, non-empty product-component tags in export order.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.product_components
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Build/Run classification of an epic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkKind {
    Build,
    Run,
    /// Empty or unrecognized type; treated as Build by every filter.
    Unclassified,
}

impl WorkKind {
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        match lowered.as_str() {
            "run" => Self::Run,
            "build" => Self::Build,
            _ => Self::Unclassified,
        }
    }
}

/// Work-type badge shown next to an epic title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBadge {
    /// The type as written in the export.
    pub label: String,
    pub kind: WorkKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_pct_zero_without_tickets() {
        let epic = EpicRecord::new("T1", "E1", "x", "En cours", 0, 3);
        assert_eq!(epic.completion_pct(), 0.0);
    }

    #[test]
    fn test_completion_pct_can_exceed_hundred() {
        let epic = EpicRecord::new("T1", "E1", "x", "En cours", 4, 6);
        assert_eq!(epic.completion_pct(), 150.0);
    }

    #[test]
    fn test_work_kind_is_case_insensitive() {
        assert_eq!(WorkKind::parse("RUN"), WorkKind::Run);
        assert_eq!(WorkKind::parse(" Build "), WorkKind::Build);
        assert_eq!(WorkKind::parse(""), WorkKind::Unclassified);
        assert_eq!(WorkKind::parse("Spike"), WorkKind::Unclassified);
    }

    #[test]
    fn test_empty_work_type_is_not_run() {
        let epic = EpicRecord::new("T1", "E1", "x", "En cours", 1, 0);
        assert!(!epic.is_run());
        assert!(epic.type_badge().is_none());

        let run = epic.with_work_type("Run");
        assert!(run.is_run());
        assert_eq!(run.type_badge().map(|b| b.kind), Some(WorkKind::Run));
    }

    #[test]
    fn test_components_trims_and_skips_blanks() {
        let epic = EpicRecord::new("T1", "E1", "x", "", 0, 0).with_components(" Alpha, Beta ,, ");
        let tags: Vec<&str> = epic.components().collect();
        assert_eq!(tags, vec!["Alpha", "Beta"]);
    }
}
