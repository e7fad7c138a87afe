use std::fs;
use std::path::Path;

use tracing::debug;

/// Content digest of one file, or `None` when the file cannot be read
/// (missing, permission denied). Callers skip unreadable files; the miss is
/// never a hard failure.
///
/// The whole file is read into memory and digested in one shot. A matching
/// digest is treated as a duplicate with no byte-for-byte verification.
pub fn digest_file(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(blake3::hash(&bytes).to_hex().to_string()),
        Err(err) => {
            debug!("digest skipped for {}: {}", path.display(), err);
            None
        }
    }
}
