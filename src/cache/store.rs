// Content-addressed response cache.
// One file per cache key under a single directory; file content is the raw
// response body bytes. No TTL and no eviction beyond explicit clearing.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::cache::paths;
use crate::error::Result;

/// Aggregate statistics for the cache directory, computed fresh on each call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheInfo {
    /// Directory holding the entry files.
    pub directory: PathBuf,
    /// Number of cached entries.
    pub entries: usize,
    /// Total size in bytes of all entries.
    pub total_bytes: u64,
}

/// On-disk memoization store for successful GET-style responses.
///
/// Entries are keyed by a hex digest of the canonical request payload; the
/// digest is the filename. The directory is created lazily on first write.
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// Cache rooted at the per-user cache directory.
    /// Returns `None` when no home directory can be determined.
    pub fn new() -> Option<Self> {
        paths::responses_dir().map(Self::at)
    }

    /// Cache rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the entry files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Read the cached body for a key.
    ///
    /// A missing or unreadable entry is a miss, never an error.
    pub fn lookup(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.entry_path(key);
        match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                debug!(key, error = %err, "cache entry unreadable, treating as miss");
                None
            }
        }
    }

    /// Write a response body under a key, creating the cache directory if
    /// needed. Overwrites any existing entry (last write wins).
    pub fn store(&self, key: &str, body: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        // Write atomically via temp file so a racing reader never sees a
        // partial entry.
        let path = self.entry_path(key);
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(body)?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        debug!(key, bytes = body.len(), "cached response body");
        Ok(())
    }

    /// Remove all entries. Returns the number removed; the directory itself
    /// may remain. A missing directory counts as zero.
    pub fn clear(&self) -> usize {
        let Ok(dir) = fs::read_dir(&self.dir) else {
            return 0;
        };

        let mut removed = 0;
        for entry in dir.flatten() {
            if !is_entry_name(&entry.file_name().to_string_lossy()) {
                continue;
            }
            if fs::remove_file(entry.path()).is_ok() {
                removed += 1;
            }
        }
        removed
    }

    /// Enumerate entry files and report fresh aggregate statistics.
    /// Zeroed values when the directory is absent.
    pub fn stats(&self) -> CacheInfo {
        let mut info = CacheInfo {
            directory: self.dir.clone(),
            entries: 0,
            total_bytes: 0,
        };

        let Ok(dir) = fs::read_dir(&self.dir) else {
            return info;
        };

        for entry in dir.flatten() {
            if !is_entry_name(&entry.file_name().to_string_lossy()) {
                continue;
            }
            if let Ok(meta) = entry.metadata() {
                info.entries += 1;
                info.total_bytes += meta.len();
            }
        }
        info
    }
}

/// Entry filenames are exactly the 64 lowercase hex characters of a SHA-256
/// digest; anything else (in-flight .tmp files, stray droppings) is ignored.
fn is_entry_name(name: &str) -> bool {
    name.len() == 64 && name.bytes().all(|b| b.is_ascii_hexdigit())
}
