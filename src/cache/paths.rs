// Cache path utilities.
// Constructs filesystem paths for the per-user response cache and the
// credentials store.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/econops on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "econops").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding one file per cached response.
pub fn responses_dir() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("responses"))
}

/// Get the base config directory (~/.config/econops on Linux).
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "econops").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path to a named credential file.
pub fn credential_path(id: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("credentials").join(format!("{}.id", sanitize_name(id))))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("simple"), "simple");
        assert_eq!(sanitize_name("with/slash"), "with_slash");
        assert_eq!(sanitize_name("user:name"), "user_name");
    }

    #[test]
    fn test_credential_path_shape() {
        let path = credential_path("demo_user").unwrap();
        assert!(path.ends_with("credentials/demo_user.id"));
    }

    #[test]
    fn test_responses_dir_under_cache_dir() {
        let base = cache_dir().unwrap();
        let responses = responses_dir().unwrap();
        assert!(responses.starts_with(&base));
        assert!(responses.ends_with("responses"));
    }
}
