//! Row ingestion for semicolon-delimited epic exports.
//!
//! Column order:
//! `team; epicKey; title; status; ticketsTotal; ticketsDone; ticketsInProgress; workType; productComponents`
//!
//! The first line is a header and is discarded. Lines with fewer than six
//! fields are dropped without error, as are lines with an empty team. Numeric
//! fields that do not start with an integer become `0`.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::{EpicRecord, EpicboardError, Result};
use crate::metrics::METRICS;
use crate::obs;

/// Minimum number of `;`-separated fields for a line to be accepted.
pub const MIN_FIELDS: usize = 6;

/// Line accounting for one ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Data lines seen, header excluded.
    pub lines_read: usize,
    pub accepted: usize,
    pub dropped: usize,
}

/// Immutable ingested row set.
///
/// Any change of input produces a new `Dataset`; nothing derived from it is
/// updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub records: Vec<EpicRecord>,
    pub stats: IngestStats,
    /// SHA-256 hex over the accepted rows.
    pub digest: String,
}

impl Dataset {
    pub fn from_records(records: Vec<EpicRecord>) -> Self {
        let digest = fingerprint(&records);
        let stats = IngestStats {
            lines_read: records.len(),
            accepted: records.len(),
            dropped: 0,
        };
        Self {
            records,
            stats,
            digest,
        }
    }

    /// Distinct teams in first-seen order.
    pub fn teams(&self) -> Vec<String> {
        let mut teams: Vec<String> = Vec::new();
        for record in &self.records {
            if !teams.iter().any(|t| t == &record.team) {
                teams.push(record.team.clone());
            }
        }
        teams
    }

    /// Rows for one team in export order; an unknown team gives an empty list.
    pub fn team_records(&self, team: &str) -> Vec<&EpicRecord> {
        crate::policy::team_epics(&self.records, team)
    }

    /// Distinct non-empty product-component tags, sorted.
    pub fn products(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(|r| r.components())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse export text into a [`Dataset`].
pub fn parse_csv(text: &str) -> Dataset {
    let mut records = Vec::new();
    let mut stats = IngestStats::default();

    for (line_no, line) in text.trim().split('\n').enumerate().skip(1) {
        stats.lines_read += 1;
        match parse_line(line) {
            Some(record) => records.push(record),
            None => {
                stats.dropped += 1;
                METRICS.inc_rows_dropped();
                debug!(line = line_no + 1, "dropped malformed epic row");
            }
        }
    }
    stats.accepted = records.len();
    METRICS.add_rows_accepted(stats.accepted as u64);

    let digest = fingerprint(&records);
    obs::emit_dataset_ingested(&digest, stats.accepted, stats.dropped);
    Dataset {
        records,
        stats,
        digest,
    }
}

fn parse_line(line: &str) -> Option<EpicRecord> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }
    let team = fields[0];
    if team.is_empty() {
        return None;
    }
    let field = |i: usize| fields.get(i).copied().unwrap_or_default();

    Some(EpicRecord {
        team: team.to_string(),
        epic_key: field(1).to_string(),
        title: field(2).to_string(),
        status: field(3).to_string(),
        tickets_total: parse_count(field(4)),
        tickets_done: parse_count(field(5)),
        tickets_in_progress: parse_count(field(6)),
        work_type: field(7).to_string(),
        product_components: field(8).to_string(),
    })
}

/// Leading-integer parse: optional sign, then digits up to the first
/// non-digit. No digits or a negative value gives `0`; overflow saturates.
pub fn parse_count(raw: &str) -> u64 {
    let s = raw.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: u64 = 0;
    let mut seen_digit = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(u64::from(b - b'0'));
    }

    if !seen_digit || negative {
        0
    } else {
        value
    }
}

fn fingerprint(records: &[EpicRecord]) -> String {
    let mut hasher = Sha256::new();
    for r in records {
        for field in [
            r.team.as_str(),
            r.epic_key.as_str(),
            r.title.as_str(),
            r.status.as_str(),
            r.work_type.as_str(),
            r.product_components.as_str(),
        ] {
            hasher.update(field.as_bytes());
            hasher.update([0x1f]);
        }
        for n in [r.tickets_total, r.tickets_done, r.tickets_in_progress] {
            hasher.update(n.to_le_bytes());
        }
        hasher.update([0x1e]);
    }
    hex::encode(hasher.finalize())
}

/// Parse raw export bytes. Invalid UTF-8 sequences (Windows-1252 accents)
/// become U+FFFD instead of failing the load.
pub fn parse_bytes(bytes: &[u8]) -> Dataset {
    parse_csv(&String::from_utf8_lossy(bytes))
}

/// Read and parse an export file. A failed read is the only error.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let bytes = std::fs::read(path).map_err(|source| {
        obs::emit_read_error(path, &source);
        EpicboardError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(parse_bytes(&bytes))
}
