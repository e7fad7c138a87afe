use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::Result;
use crate::hash::digest_file;
use crate::model::{DuplicatePair, ExtensionUsage, FileEntry};
use crate::walk::TreeWalk;

/// Default cutoff for [`find_large`]: files strictly over 1 GiB.
pub const LARGE_FILE_THRESHOLD: u64 = 1024 * 1024 * 1024;

/// Total bytes per file extension under `root`, largest first.
///
/// The sum over all entries equals the total size of every readable file in
/// the tree. Ties keep encounter order.
pub fn analyze_by_extension(root: impl AsRef<Path>) -> Result<Vec<ExtensionUsage>> {
    let walk = TreeWalk::new(root)?;
    let mut totals: IndexMap<String, (u64, u64)> = IndexMap::new();

    for entry in walk {
        let slot = totals.entry(extension_of(&entry.path)).or_insert((0, 0));
        slot.0 += 1;
        slot.1 = slot.1.saturating_add(entry.size_bytes);
    }

    let mut summary = totals
        .into_iter()
        .map(|(extension, (files, total_bytes))| ExtensionUsage {
            extension,
            files,
            total_bytes,
        })
        .collect::<Vec<_>>();
    // Stable sort: equal totals stay in first-encounter order.
    summary.sort_by(|a, b| b.total_bytes.cmp(&a.total_bytes));
    Ok(summary)
}

/// Pairs of content-identical files under `root`, in encounter order.
pub fn find_duplicates(root: impl AsRef<Path>) -> Result<Vec<DuplicatePair>> {
    let walk = TreeWalk::new(root)?;
    Ok(pair_duplicates(walk))
}

/// Duplicate pairing over an explicit file sequence.
///
/// The first file seen with a given digest becomes the original for that
/// digest; every later file sharing it yields one pair against that same
/// original, so three identical files A, B, C produce (B, A) and (C, A).
/// Files whose digest is unavailable are excluded entirely.
pub fn pair_duplicates(files: impl IntoIterator<Item = FileEntry>) -> Vec<DuplicatePair> {
    let mut first_seen: HashMap<String, FileEntry> = HashMap::new();
    let mut pairs = Vec::new();

    for entry in files {
        let Some(digest) = digest_file(&entry.path) else {
            continue;
        };
        match first_seen.get(&digest) {
            Some(original) => pairs.push(DuplicatePair {
                duplicate: entry.path,
                original: original.path.clone(),
            }),
            None => {
                first_seen.insert(digest, entry);
            }
        }
    }

    pairs
}

/// Files under `root` strictly larger than `threshold_bytes`, biggest first.
/// Ties keep encounter order.
pub fn find_large(root: impl AsRef<Path>, threshold_bytes: u64) -> Result<Vec<FileEntry>> {
    let walk = TreeWalk::new(root)?;
    let mut large = walk
        .filter(|entry| entry.size_bytes > threshold_bytes)
        .collect::<Vec<_>>();
    large.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
    Ok(large)
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}
