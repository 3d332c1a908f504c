//! Structured observability hooks for dashboard lifecycle events.
//!
//! - Dataset-scoped tracing spans via the [`DatasetSpan`] RAII guard
//! - Emission functions for ingestion, session changes and recomputation
//!
//! Events are emitted at `info!` level except read failures (`warn!`).

use std::path::Path;

use tracing::{info, warn};

use crate::policy::{DisplayFilter, ProductSort};

/// RAII guard that enters a span tagged with the dataset digest.
///
/// ```ignore
/// let _span = DatasetSpan::enter(&dataset.digest);
/// // every event emitted here carries dataset = <digest>
/// ```
pub struct DatasetSpan {
    _span: tracing::span::EnteredSpan,
}

impl DatasetSpan {
    pub fn enter(digest: &str) -> Self {
        let short = digest.get(..12).unwrap_or(digest);
        let span = tracing::info_span!("epicboard.dataset", dataset = %short);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: an export was parsed.
pub fn emit_dataset_ingested(digest: &str, accepted: usize, dropped: usize) {
    info!(
        event = "dataset.ingested",
        digest = %digest,
        accepted = accepted,
        dropped = dropped,
    );
}

/// Emit event: the source file could not be read (warning level).
pub fn emit_read_error(path: &Path, error: &dyn std::fmt::Display) {
    warn!(event = "ingest.read_error", path = %path.display(), error = %error);
}

/// Emit event: a team's display filter changed.
pub fn emit_team_filter_changed(team: &str, from: DisplayFilter, to: DisplayFilter) {
    info!(event = "team.filter_changed", team = %team, from = %from, to = %to);
}

/// Emit event: the product table sort changed.
pub fn emit_product_sort_changed(sort: ProductSort) {
    info!(
        event = "products.sort_changed",
        column = %sort.key,
        direction = ?sort.direction,
    );
}

/// Emit event: a dashboard view was recomputed.
pub fn emit_dashboard_computed(digest: &str, teams: usize, products: usize) {
    info!(
        event = "dashboard.computed",
        digest = %digest,
        teams = teams,
        products = products,
    );
}
