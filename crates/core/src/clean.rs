use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::model::CleanOutcome;

/// Delete every file under each of `directories`, returning the bytes freed.
///
/// Destructive and irreversible: there is no confirmation, dry-run, or undo.
/// Directories themselves are left in place. A file that cannot be deleted
/// is skipped, counted, and does not abort the rest of the walk; a target
/// directory that does not exist contributes nothing, since the configured
/// target list is platform-dependent.
pub fn clean_dirs(directories: &[PathBuf]) -> CleanOutcome {
    let mut outcome = CleanOutcome::default();
    for directory in directories {
        if !directory.is_dir() {
            debug!("clean target absent, skipping: {}", directory.display());
            continue;
        }
        clean_one(directory, &mut outcome);
    }
    outcome
}

fn clean_one(directory: &Path, outcome: &mut CleanOutcome) {
    for item in WalkDir::new(directory).follow_links(false) {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                debug!("clean walk error under {}: {}", directory.display(), err);
                outcome.files_skipped += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        // Size must be captured before removal.
        let size_bytes = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(err) => {
                debug!("clean stat failed for {}: {}", entry.path().display(), err);
                outcome.files_skipped += 1;
                continue;
            }
        };
        match fs::remove_file(entry.path()) {
            Ok(()) => {
                outcome.bytes_freed = outcome.bytes_freed.saturating_add(size_bytes);
                outcome.files_removed += 1;
            }
            Err(err) => {
                debug!("delete failed for {}: {}", entry.path().display(), err);
                outcome.files_skipped += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::clean_dirs;

    #[test]
    fn frees_every_file_and_reports_byte_total() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join("a"), vec![0_u8; 10]).expect("write");
        fs::write(temp.path().join("b"), vec![0_u8; 20]).expect("write");
        fs::create_dir(temp.path().join("nested")).expect("mkdir");
        fs::write(temp.path().join("nested/c"), vec![0_u8; 30]).expect("write");

        let outcome = clean_dirs(&[temp.path().to_path_buf()]);
        assert_eq!(outcome.bytes_freed, 60);
        assert_eq!(outcome.files_removed, 3);
        assert_eq!(outcome.files_skipped, 0);

        let leftover = walkdir::WalkDir::new(temp.path())
            .into_iter()
            .filter_map(|item| item.ok())
            .filter(|entry| entry.file_type().is_file())
            .count();
        assert_eq!(leftover, 0);
        // Directories stay.
        assert!(temp.path().join("nested").is_dir());
    }

    #[test]
    fn rerun_on_empty_tree_frees_nothing() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join("a"), vec![0_u8; 10]).expect("write");

        let first = clean_dirs(&[temp.path().to_path_buf()]);
        assert_eq!(first.bytes_freed, 10);

        let second = clean_dirs(&[temp.path().to_path_buf()]);
        assert_eq!(second.bytes_freed, 0);
        assert_eq!(second.files_removed, 0);
    }

    #[test]
    fn missing_target_is_not_an_error() {
        let temp = TempDir::new().expect("tempdir");
        let outcome = clean_dirs(&[temp.path().join("absent")]);
        assert_eq!(outcome, Default::default());
    }
}
