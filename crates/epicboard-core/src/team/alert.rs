//! Team alert classification.
//!
//! Thresholds assume the export is taken at mid-PI. All comparisons are
//! strict, so a value sitting exactly on a threshold falls through to the next
//! rule.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::metrics::{team_metrics, TeamMetrics};
use crate::domain::EpicRecord;

/// Above this share of in-progress epics with nothing finished, work is too scattered.
pub const RED_MAX_PCT_EN_COURS: f64 = 80.0;
/// Above this share of epics still being scoped, the PI scope is undefined.
pub const RED_MAX_PCT_A_CADRER: f64 = 40.0;
/// Below this share of finished epics, almost nothing has shipped.
pub const ORANGE_MIN_PCT_TERMINEES: f64 = 10.0;
/// Above this share of not-started epics, too much is still waiting.
pub const ORANGE_MAX_PCT_NON_DEMARREES: f64 = 32.0;

/// Traffic-light alert level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Red,
    Orange,
    Green,
    /// Nothing to classify.
    None,
}

impl AlertLevel {
    /// Sort order by severity: red first, then orange, then green.
    pub fn severity_rank(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Orange => 1,
            Self::Green => 2,
            Self::None => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Green => "green",
            Self::None => "none",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify team metrics.
///
/// - no epics → `None`
/// - red: nothing finished while more than 80% is in progress, or more than
///   40% still being scoped
/// - orange: under 10% finished, or more than 32% not started
/// - green otherwise
pub fn classify_team(metrics: &TeamMetrics) -> AlertLevel {
    if metrics.total_epics == 0 {
        return AlertLevel::None;
    }

    let scattered = metrics.termine == 0 && metrics.pct_epics_en_cours > RED_MAX_PCT_EN_COURS;
    if scattered || metrics.pct_a_cadrer > RED_MAX_PCT_A_CADRER {
        return AlertLevel::Red;
    }

    if metrics.pct_epics_terminees < ORANGE_MIN_PCT_TERMINEES
        || metrics.pct_non_demarrees > ORANGE_MAX_PCT_NON_DEMARREES
    {
        return AlertLevel::Orange;
    }

    AlertLevel::Green
}

/// Alert level of a set of epics.
///
/// The team badge must be computed from all of the team's epics, never from a
/// display-filtered subset.
pub fn team_alert<'a, I>(epics: I) -> AlertLevel
where
    I: IntoIterator<Item = &'a EpicRecord>,
{
    classify_team(&team_metrics(epics))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(total: usize, termine: usize, en_cours: usize, a_cadrer: usize) -> TeamMetrics {
        let a_faire = total - termine - en_cours - a_cadrer;
        let mut epics = Vec::new();
        epics.extend((0..termine).map(|_| EpicRecord::new("T", "E", "t", "Terminé", 0, 0)));
        epics.extend((0..en_cours).map(|_| EpicRecord::new("T", "E", "t", "En cours", 0, 0)));
        epics.extend((0..a_cadrer).map(|_| EpicRecord::new("T", "E", "t", "À cadrer", 0, 0)));
        epics.extend((0..a_faire).map(|_| EpicRecord::new("T", "E", "t", "À faire", 0, 0)));
        team_metrics(&epics)
    }

    #[test]
    fn test_no_epics_is_none() {
        assert_eq!(classify_team(&TeamMetrics::default()), AlertLevel::None);
    }

    #[test]
    fn test_all_in_progress_nothing_done_is_red() {
        assert_eq!(classify_team(&metrics(10, 0, 9, 0)), AlertLevel::Red);
    }

    #[test]
    fn test_exactly_eighty_percent_in_progress_is_not_red() {
        // 8/10 in progress, nothing done: falls through to orange (<10% done)
        assert_eq!(classify_team(&metrics(10, 0, 8, 0)), AlertLevel::Orange);
    }

    #[test]
    fn test_in_progress_with_one_done_is_not_scattered() {
        // 1 done, 9 in progress (90%): red branch disqualified by termine > 0
        assert_eq!(classify_team(&metrics(10, 1, 9, 0)), AlertLevel::Green);
    }

    #[test]
    fn test_scoping_over_forty_percent_is_red() {
        assert_eq!(classify_team(&metrics(10, 5, 0, 5)), AlertLevel::Red);
        // exactly 40% scoping: not red; 40% not started > 32% → orange
        assert_eq!(classify_team(&metrics(10, 6, 0, 4)), AlertLevel::Orange);
    }

    #[test]
    fn test_low_delivery_is_orange() {
        assert_eq!(classify_team(&metrics(20, 1, 19, 0)), AlertLevel::Orange);
        // exactly 10% finished is not below the threshold
        assert_eq!(classify_team(&metrics(10, 1, 9, 0)), AlertLevel::Green);
    }

    #[test]
    fn test_not_started_threshold() {
        // 3/8 not started = 37.5% → orange
        assert_eq!(classify_team(&metrics(8, 3, 2, 0)), AlertLevel::Orange);
        // 3/10 not started = 30% → green
        assert_eq!(classify_team(&metrics(10, 3, 4, 0)), AlertLevel::Green);
    }

    #[test]
    fn test_exactly_thirty_two_percent_not_started_is_green() {
        // 8/25 not started = 32.0%, 17/25 done = 68%
        assert_eq!(classify_team(&metrics(25, 17, 0, 0)), AlertLevel::Green);
        // 9/25 = 36% → orange
        assert_eq!(classify_team(&metrics(25, 16, 0, 0)), AlertLevel::Orange);
    }

    #[test]
    fn test_severity_rank_order() {
        assert!(AlertLevel::Red.severity_rank() < AlertLevel::Orange.severity_rank());
        assert!(AlertLevel::Orange.severity_rank() < AlertLevel::Green.severity_rank());
        assert_eq!(AlertLevel::Orange.to_string(), "orange");
    }
}
