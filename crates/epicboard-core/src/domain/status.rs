//! Status text mappings.
//!
//! Jira status text is free-form French (`"Terminé"`, `"En cours"`,
//! `"À cadrer"`, `"Backlog"`, ...). Two independent mappings exist and their
//! precedence orders differ; they are kept separate on purpose.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical progress category of an epic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusCategory {
    Termine,
    EnCours,
    ACadrer,
    AFaire,
}

impl StatusCategory {
    /// Position of the category in a team's epic list: in-progress work first,
    /// finished work last.
    pub fn rank(self) -> u8 {
        match self {
            Self::EnCours => 0,
            Self::ACadrer => 1,
            Self::AFaire => 2,
            Self::Termine => 3,
        }
    }

    /// `aCadrer` and `aFaire` both count as not started.
    pub fn is_not_started(self) -> bool {
        matches!(self, Self::ACadrer | Self::AFaire)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Termine => "Terminé",
            Self::EnCours => "En cours",
            Self::ACadrer => "À cadrer",
            Self::AFaire => "À faire",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Categorize a raw status string. Total: anything unrecognized is `AFaire`.
///
/// Precedence: `termin` > `cours` > `cadrer` > default.
pub fn categorize_status(status: &str) -> StatusCategory {
    let s = status.to_lowercase();
    if s.contains("termin") {
        StatusCategory::Termine
    } else if s.contains("cours") {
        StatusCategory::EnCours
    } else if s.contains("cadrer") {
        StatusCategory::ACadrer
    } else {
        StatusCategory::AFaire
    }
}

/// Styling class of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusClass {
    EnCours,
    ACadrer,
    Termine,
    AFaire,
    Backlog,
}

impl StatusClass {
    pub fn css_name(self) -> &'static str {
        match self {
            Self::EnCours => "en-cours",
            Self::ACadrer => "a-cadrer",
            Self::Termine => "termine",
            Self::AFaire => "a-faire",
            Self::Backlog => "backlog",
        }
    }
}

/// Map a raw status string to its badge class.
///
/// Precedence: `cours` > `cadrer` > `termin` > `faire`/`backlog` > `backlog`.
/// This does not always agree with [`categorize_status`].
pub fn status_class(status: &str) -> StatusClass {
    let s = status.to_lowercase();
    if s.contains("cours") {
        StatusClass::EnCours
    } else if s.contains("cadrer") {
        StatusClass::ACadrer
    } else if s.contains("termin") {
        StatusClass::Termine
    } else if s.contains("faire") || s.contains("backlog") {
        StatusClass::AFaire
    } else {
        StatusClass::Backlog
    }
}
