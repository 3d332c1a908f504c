//! Epicboard Core Library
//!
//! Metrics and aggregation engine behind the Epicboard dashboard: status
//! categorization, per-epic attention flags, team metrics and alerts,
//! product rollups, and the filtering/sorting rules applied before rendering.

pub mod attention;
pub mod dashboard;
pub mod domain;
pub mod ingest;
pub mod metrics;
pub mod obs;
pub mod policy;
pub mod product;
pub mod reporting;
pub mod session;
pub mod team;
pub mod telemetry;

pub use domain::{
    categorize_status, status_class, EpicRecord, EpicboardError, Result, StatusCategory,
    StatusClass, TypeBadge, WorkKind,
};

pub use attention::{evaluate_attention, progress_bar_color, AttentionColor, BarColor, EpicAttention};
pub use dashboard::{
    Dashboard, DashboardView, EpicAnnotation, ExtractionInfo, FilterCounts, GlobalTeamRow, TeamView,
};
pub use ingest::{parse_bytes, parse_count, parse_csv, read_dataset, Dataset, IngestStats};
pub use policy::{
    filtered_team_epics, ordered_team_epics, sort_products, sort_team_epics, team_epics,
    DisplayFilter, ProductSort, ProductSortKey, SortDirection,
};
pub use product::{product_alert, rollup_products, ProductRollup};
pub use reporting::{
    render_dashboard_md, render_global_md, render_products_md, render_team_md,
    write_dashboard_json, write_dashboard_md,
};
pub use session::SessionState;
pub use team::{classify_team, team_alert, team_metrics, AlertLevel, TeamMetrics};

pub use metrics::METRICS;
pub use obs::{
    emit_dashboard_computed, emit_dataset_ingested, emit_product_sort_changed, emit_read_error,
    emit_team_filter_changed, DatasetSpan,
};
pub use telemetry::init_tracing;

/// Epicboard version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
