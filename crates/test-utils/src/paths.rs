//! Path utilities for locating workspace files and scratch space in tests.

use std::path::PathBuf;
use tempfile::TempDir;

/// Returns the workspace root directory.
///
/// This is determined by walking up from the test-utils manifest directory
/// (`crates/test-utils`) two levels.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Path to a file under the workspace `config/` directory.
pub fn config_file(name: &str) -> PathBuf {
    workspace_root().join("config").join(name)
}

/// Create a temporary directory that is removed when dropped.
///
/// # Panics
///
/// Panics if the directory cannot be created; only meant for tests.
pub fn scratch_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("overlay-test-")
        .tempdir()
        .expect("failed to create scratch directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }

    #[test]
    fn test_config_file_location() {
        assert!(config_file("layers.yaml").ends_with("config/layers.yaml"));
    }

    #[test]
    fn test_scratch_dir_exists() {
        let dir = scratch_dir();
        assert!(dir.path().is_dir());
    }
}
