//! Team-level health.
//!
//! Provides:
//! - [`metrics::TeamMetrics`] / [`metrics::team_metrics`]: counts and percentages over a set of epics
//! - [`alert::AlertLevel`] / [`alert::classify_team`]: traffic-light classification of those metrics

pub mod alert;
pub mod metrics;

pub use alert::{classify_team, team_alert, AlertLevel};
pub use metrics::{team_metrics, TeamMetrics};
