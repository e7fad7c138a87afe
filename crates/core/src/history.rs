use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::ScanSnapshot;

/// File name used when the caller does not pick one.
pub const DEFAULT_HISTORY_FILE: &str = "diskscout-history.jsonl";

/// Append-only log of scan snapshots: one JSON object per line, UTF-8,
/// read back in file order. Records are never mutated or deleted.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durably append one snapshot, creating the log file if absent.
    ///
    /// A failure here is the caller's to report; it must not invalidate the
    /// scan that produced the snapshot.
    pub fn append(&self, snapshot: &ScanSnapshot) -> Result<()> {
        let io_err = |source| Error::HistoryWrite {
            path: self.path.clone(),
            source,
        };
        let record = serde_json::to_string(snapshot)
            .map_err(|err| io_err(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        writeln!(file, "{record}").map_err(io_err)
    }

    /// Every snapshot in file order. A missing log file is the expected
    /// "no prior history" case and yields an empty vector, not an error.
    /// Blank lines are tolerated.
    pub fn read_all(&self) -> Result<Vec<ScanSnapshot>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(Error::HistoryRead {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        let mut snapshots = Vec::new();
        for (index, line) in data.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let snapshot =
                serde_json::from_str(line).map_err(|source| Error::HistoryFormat {
                    path: self.path.clone(),
                    line: index + 1,
                    source,
                })?;
            snapshots.push(snapshot);
        }
        Ok(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::HistoryStore;
    use crate::error::Error;
    use crate::model::ScanSnapshot;

    fn snapshot(percent: f64) -> ScanSnapshot {
        ScanSnapshot {
            date: "2024-01-02 03:04:05".to_string(),
            drive: "/".to_string(),
            percent_used: percent,
        }
    }

    #[test]
    fn missing_log_reads_as_empty_history() {
        let temp = TempDir::new().expect("tempdir");
        let store = HistoryStore::new(temp.path().join("never-written.jsonl"));
        assert!(store.read_all().expect("read").is_empty());
    }

    #[test]
    fn append_then_read_round_trips() {
        let temp = TempDir::new().expect("tempdir");
        let store = HistoryStore::new(temp.path().join("history.jsonl"));

        let written = snapshot(42.5);
        store.append(&written).expect("append");

        let read = store.read_all().expect("read");
        assert_eq!(read, vec![written]);
    }

    #[test]
    fn records_come_back_in_append_order() {
        let temp = TempDir::new().expect("tempdir");
        let store = HistoryStore::new(temp.path().join("history.jsonl"));

        for percent in [10.0, 20.0, 30.0] {
            store.append(&snapshot(percent)).expect("append");
        }

        let read = store.read_all().expect("read");
        let percents: Vec<f64> = read.iter().map(|snap| snap.percent_used).collect();
        assert_eq!(percents, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn trailing_blank_lines_are_tolerated() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("history.jsonl");
        std::fs::write(
            &path,
            "{\"date\":\"d\",\"drive\":\"/\",\"percent_used\":1.0}\n\n\n",
        )
        .expect("write");

        let store = HistoryStore::new(&path);
        assert_eq!(store.read_all().expect("read").len(), 1);
    }

    #[test]
    fn malformed_record_reports_its_line() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("history.jsonl");
        std::fs::write(
            &path,
            "{\"date\":\"d\",\"drive\":\"/\",\"percent_used\":1.0}\nnot json\n",
        )
        .expect("write");

        let store = HistoryStore::new(&path);
        match store.read_all() {
            Err(Error::HistoryFormat { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected format error, got {other:?}"),
        }
    }
}
