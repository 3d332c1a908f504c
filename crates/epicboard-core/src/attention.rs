//! Per-epic attention flags.
//!
//! An epic needs attention when its status and its ticket progress disagree:
//! work started but barely moving, tickets created before scoping finished, or
//! work well advanced while still sitting in the backlog. Rules are checked in
//! order and the first match wins.

use serde::{Deserialize, Serialize};

use crate::domain::{EpicRecord, StatusCategory};

pub const REASON_LOW_PROGRESS: &str = "started but low progress";
pub const REASON_SCOPING_UNFINISHED: &str = "tickets exist but scoping unfinished";
pub const REASON_ADVANCED_IN_BACKLOG: &str = "advanced but still in backlog";

/// Severity color of an attention flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttentionColor {
    Red,
    Orange,
    None,
}

/// Outcome of evaluating one epic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpicAttention {
    pub alert: bool,
    pub color: AttentionColor,
    /// Empty when `alert` is false.
    pub reason: String,
}

impl EpicAttention {
    fn raise(color: AttentionColor, reason: &str) -> Self {
        Self {
            alert: true,
            color,
            reason: reason.to_string(),
        }
    }

    fn clear() -> Self {
        Self {
            alert: false,
            color: AttentionColor::None,
            reason: String::new(),
        }
    }
}

/// Evaluate whether `epic` needs attention.
pub fn evaluate_attention(epic: &EpicRecord) -> EpicAttention {
    let has_tickets = epic.tickets_total > 0;
    let pct = epic.completion_pct();

    match epic.category() {
        StatusCategory::EnCours if has_tickets && pct < 30.0 => {
            EpicAttention::raise(AttentionColor::Red, REASON_LOW_PROGRESS)
        }
        StatusCategory::ACadrer if has_tickets => {
            EpicAttention::raise(AttentionColor::Orange, REASON_SCOPING_UNFINISHED)
        }
        StatusCategory::AFaire if has_tickets && pct > 50.0 => {
            EpicAttention::raise(AttentionColor::Orange, REASON_ADVANCED_IN_BACKLOG)
        }
        _ => EpicAttention::clear(),
    }
}

/// Fill color of an epic's progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarColor {
    Red,
    Orange,
    Green,
    Gray,
}

/// Progress-bar color: the attention color when one is raised, otherwise
/// green above 60%, orange from 30%, gray below.
pub fn progress_bar_color(epic: &EpicRecord) -> BarColor {
    let attention = evaluate_attention(epic);
    if attention.alert {
        return match attention.color {
            AttentionColor::Red => BarColor::Red,
            AttentionColor::Orange => BarColor::Orange,
            AttentionColor::None => BarColor::Gray,
        };
    }

    let pct = epic.completion_pct();
    if pct > 60.0 {
        BarColor::Green
    } else if pct >= 30.0 {
        BarColor::Orange
    } else {
        BarColor::Gray
    }
}
