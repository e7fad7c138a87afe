use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::model::FileEntry;

/// Lazy best-effort traversal of a directory tree.
///
/// Yields one [`FileEntry`] per regular file, to unlimited depth, in the
/// order the underlying directory enumeration produces (no canonical order
/// is promised). Directory symlinks are not followed, so cyclic link graphs
/// terminate. Entries whose listing or metadata fails are skipped and
/// counted in [`TreeWalk::skipped`] rather than surfaced as errors.
///
/// Each `TreeWalk` is an independent traversal; construct a new one to
/// restart.
pub struct TreeWalk {
    inner: walkdir::IntoIter,
    root: PathBuf,
    skipped: u64,
}

impl TreeWalk {
    /// Start a walk at `root`. Fails when `root` is missing or not a
    /// directory; that is the only fatal condition a walk reports.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        Ok(Self {
            inner: WalkDir::new(root).follow_links(false).into_iter(),
            root: root.to_path_buf(),
            skipped: 0,
        })
    }

    /// Number of entries dropped so far because listing or stat failed.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl Iterator for TreeWalk {
    type Item = FileEntry;

    fn next(&mut self) -> Option<FileEntry> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    debug!("walk error under {}: {}", self.root.display(), err);
                    self.skipped += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match entry.metadata() {
                Ok(metadata) => {
                    return Some(FileEntry {
                        path: entry.into_path(),
                        size_bytes: metadata.len(),
                    })
                }
                Err(err) => {
                    // File vanished or became unreadable between listing
                    // and stat.
                    debug!("metadata read failed for {}: {}", entry.path().display(), err);
                    self.skipped += 1;
                }
            }
        }
    }
}
