use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Capacity accounting for one mounted volume. Derived on every query,
/// never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VolumeUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub percent_used: f64,
}

impl VolumeUsage {
    /// Build usage figures from the raw capacity pair reported by the
    /// platform. `used + free == total` holds by construction.
    pub fn from_capacity(total_bytes: u64, available_bytes: u64) -> Self {
        let free_bytes = available_bytes.min(total_bytes);
        let used_bytes = total_bytes - free_bytes;
        let percent_used = if total_bytes == 0 {
            0.0
        } else {
            used_bytes as f64 / total_bytes as f64 * 100.0
        };
        Self {
            total_bytes,
            used_bytes,
            free_bytes,
            percent_used,
        }
    }
}

/// One file produced by the tree walker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Accumulated size for one file extension.
///
/// `extension` is the lower-cased suffix including the dot (".txt"); files
/// without an extension land under the empty string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtensionUsage {
    pub extension: String,
    pub files: u64,
    pub total_bytes: u64,
}

/// A file whose content digest matched an earlier file. The first path seen
/// with a given digest is the original and is never itself reported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DuplicatePair {
    pub duplicate: PathBuf,
    pub original: PathBuf,
}

/// Result of a temp-file purge across one or more directories.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanOutcome {
    pub bytes_freed: u64,
    pub files_removed: u64,
    pub files_skipped: u64,
}

/// One monitor tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageSample {
    pub percent_used: f64,
    pub threshold_exceeded: bool,
}

/// One persisted record of a volume's usage at a point in time. Field names
/// are the wire keys of the history log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanSnapshot {
    pub date: String,
    pub drive: String,
    pub percent_used: f64,
}

impl ScanSnapshot {
    /// Snapshot taken now, stamped with the local wall clock.
    pub fn now(drive: impl Into<String>, percent_used: f64) -> Self {
        Self {
            date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            drive: drive.into(),
            percent_used,
        }
    }
}

/// Identity of one mounted volume, as enumerated by the platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VolumeInfo {
    pub name: String,
    pub mount_point: String,
    pub file_system: Option<String>,
    pub kind: VolumeKind,
    pub is_removable: bool,
    pub total_space_bytes: u64,
    pub available_space_bytes: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VolumeKind {
    Ssd,
    Hdd,
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::VolumeUsage;

    #[test]
    fn usage_invariant_holds() {
        let usage = VolumeUsage::from_capacity(1000, 250);
        assert_eq!(usage.used_bytes + usage.free_bytes, usage.total_bytes);
        assert!((usage.percent_used - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_volume_reports_zero_percent() {
        let usage = VolumeUsage::from_capacity(0, 0);
        assert_eq!(usage.percent_used, 0.0);
        assert_eq!(usage.total_bytes, 0);
    }

    #[test]
    fn available_is_clamped_to_total() {
        // Some filesystems report reserved blocks as available.
        let usage = VolumeUsage::from_capacity(100, 150);
        assert_eq!(usage.free_bytes, 100);
        assert_eq!(usage.used_bytes, 0);
        assert!(usage.percent_used >= 0.0 && usage.percent_used <= 100.0);
    }
}
