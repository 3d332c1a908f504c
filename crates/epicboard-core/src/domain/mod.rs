//! Domain model for Epicboard.
//!
//! - `EpicRecord`: one ingested row of the epic export
//! - `StatusCategory` / `StatusClass`: the two status mappings
//! - `WorkKind`: Build/Run classification of an epic

pub mod error;
pub mod record;
pub mod status;

pub use error::{EpicboardError, Result};
pub use record::{EpicRecord, TypeBadge, WorkKind};
pub use status::{categorize_status, status_class, StatusCategory, StatusClass};
