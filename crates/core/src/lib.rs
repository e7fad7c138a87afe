pub mod analyze;
pub mod clean;
pub mod error;
pub mod hash;
pub mod history;
pub mod model;
pub mod monitor;
pub mod volume;
pub mod walk;

pub use analyze::{
    analyze_by_extension, find_duplicates, find_large, pair_duplicates, LARGE_FILE_THRESHOLD,
};
pub use clean::clean_dirs;
pub use error::{Error, Result};
pub use hash::digest_file;
pub use history::{HistoryStore, DEFAULT_HISTORY_FILE};
pub use model::{
    CleanOutcome, DuplicatePair, ExtensionUsage, FileEntry, ScanSnapshot, UsageSample, VolumeInfo,
    VolumeKind, VolumeUsage,
};
pub use monitor::{run_monitor, run_volume_monitor, MonitorOptions};
pub use volume::{list_volumes, volume_usage};
pub use walk::TreeWalk;
