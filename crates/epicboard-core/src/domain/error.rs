//! Error taxonomy for Epicboard.
//!
//! The aggregation engine itself never fails: malformed rows are dropped and
//! unparsable numbers coerce to zero. Errors only come from reading the source
//! file and from parsing user-supplied selector strings.

use std::path::PathBuf;

/// Epicboard errors.
#[derive(Debug, thiserror::Error)]
pub enum EpicboardError {
    #[error("failed to read epic export {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown display filter: {0} (expected build, run or all)")]
    UnknownFilter(String),

    #[error("unknown product sort column: {0}")]
    UnknownSortKey(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for Epicboard operations.
pub type Result<T> = std::result::Result<T, EpicboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_displays_path() {
        let err = EpicboardError::Io {
            path: PathBuf::from("/tmp/epics.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("epics.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_unknown_selector_errors_display_value() {
        let err = EpicboardError::UnknownFilter("ops".to_string());
        assert!(err.to_string().contains("ops"));

        let err = EpicboardError::UnknownSortKey("velocity".to_string());
        assert!(err.to_string().contains("velocity"));
    }
}
