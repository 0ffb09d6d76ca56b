//! Per-invocation working directory.

use crate::error::Result;
use log::debug;
use std::path::{Path, PathBuf};

/// Process-scoped scratch directory holding the extracted values file,
/// fetched chart and rendered release.
///
/// The directory is deliberately left on disk after the run (success or
/// failure) so rendered output can be inspected afterwards; the path is
/// logged at debug level.
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("hrval-").tempdir()?;
        let root = dir.keep();
        debug!("working directory: {}", root.display());
        Ok(Workspace { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn values_file(&self) -> PathBuf {
        self.root.join("values.yaml")
    }

    pub fn release_file(&self, release_name: &str) -> PathBuf {
        self.root.join(format!("{release_name}.yaml"))
    }

    /// Directory a git-sourced chart is checked out into
    pub fn git_source_dir(&self) -> PathBuf {
        self.root.join("source")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_survives_drop() {
        let path = {
            let ws = Workspace::create().unwrap();
            ws.root().to_path_buf()
        };
        assert!(path.exists());
        // Clean up after ourselves in tests only
        std::fs::remove_dir_all(&path).unwrap();
    }

    #[test]
    fn test_derived_paths_live_under_root() {
        let ws = Workspace::create().unwrap();
        assert!(ws.values_file().starts_with(ws.root()));
        assert!(ws.release_file("web-nginx").ends_with("web-nginx.yaml"));
        assert!(ws.git_source_dir().starts_with(ws.root()));
        std::fs::remove_dir_all(ws.root()).unwrap();
    }
}
