use std::path::PathBuf;

use thiserror::Error;

/// Failures that surface to callers. Per-entry I/O problems during a walk
/// never appear here; they are skipped at the point of use and counted.
#[derive(Debug, Error)]
pub enum Error {
    /// The root handed to a walk-based operation is missing or not a
    /// directory. Operation-fatal: no partial results are produced.
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// No mounted volume matches the requested identifier.
    #[error("volume not found: {mount}")]
    VolumeNotFound { mount: String },

    /// Appending a snapshot to the history log failed. Reported to the
    /// caller; the scan that produced the snapshot stays valid.
    #[error("history write failed for {path}: {source}")]
    HistoryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the history log failed. A missing log file is not an error
    /// and yields an empty history instead.
    #[error("history read failed for {path}: {source}")]
    HistoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A history record could not be parsed.
    #[error("malformed history record at {path}:{line}: {source}")]
    HistoryFormat {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
