//! Global atomic counters for Epicboard observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. before the CLI exits).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters.
pub struct Metrics {
    rows_accepted: AtomicU64,
    rows_dropped: AtomicU64,
    recomputations: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            rows_accepted: AtomicU64::new(0),
            rows_dropped: AtomicU64::new(0),
            recomputations: AtomicU64::new(0),
        }
    }

    /// Add `n` ingested rows.
    pub fn add_rows_accepted(&self, n: u64) {
        self.rows_accepted.fetch_add(n, Ordering::Relaxed);
        tracing::trace!(metric = "rows_accepted", n, "counter incremented");
    }

    /// Count one malformed row.
    pub fn inc_rows_dropped(&self) {
        self.rows_dropped.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "rows_dropped", "counter incremented");
    }

    /// Count one dashboard recomputation.
    pub fn inc_recomputations(&self) {
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "recomputations", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            rows_accepted = self.rows_accepted(),
            rows_dropped = self.rows_dropped(),
            recomputations = self.recomputations(),
        );
    }

    pub fn rows_accepted(&self) -> u64 {
        self.rows_accepted.load(Ordering::Relaxed)
    }

    pub fn rows_dropped(&self) -> u64 {
        self.rows_dropped.load(Ordering::Relaxed)
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_increment() {
        let m = Metrics::new();
        m.add_rows_accepted(5);
        m.add_rows_accepted(2);
        assert_eq!(m.rows_accepted(), 7);

        m.inc_rows_dropped();
        assert_eq!(m.rows_dropped(), 1);

        m.inc_recomputations();
        m.inc_recomputations();
        assert_eq!(m.recomputations(), 2);
    }
}
