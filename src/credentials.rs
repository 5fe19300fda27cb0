// Named credential files.
// Tokens can be saved once under the per-user config directory and later
// referenced by id at client construction instead of being passed inline.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::paths;
use crate::error::Result;

/// Save a token under a credential id, creating parent directories as needed.
/// Returns the path of the credential file written.
pub fn save_credentials(id: &str, token: &str) -> Result<PathBuf> {
    let path = paths::credential_path(id)
        .ok_or_else(|| std::io::Error::other("no home directory for credentials store"))?;
    save_credentials_at(&path, token)?;
    Ok(path)
}

/// Load a previously saved token by credential id.
/// Returns `None` when no credential file exists for the id.
pub fn load_credentials(id: &str) -> Option<String> {
    let path = paths::credential_path(id)?;
    load_credentials_at(&path)
}

/// Load a token by credential id from an explicit credentials directory.
pub(crate) fn load_credentials_from(dir: &Path, id: &str) -> Option<String> {
    load_credentials_at(&dir.join(format!("{}.id", paths::sanitize_name(id))))
}

pub(crate) fn save_credentials_at(path: &Path, token: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, token)?;
    Ok(())
}

pub(crate) fn load_credentials_at(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let token = contents.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
