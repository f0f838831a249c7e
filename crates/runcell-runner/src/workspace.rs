//! Ephemeral per-execution workspaces.
//!
//! Each execution gets its own uniquely named directory holding the
//! instrumented source, manifests, and toolchain-created dependency
//! artifacts. Workspaces are never shared or reused; the directory is
//! deleted on drop unless the keep-workspace debug flag is set.

use std::path::{Path, PathBuf};

use runcell_core::config::RunnerConfig;
use tempfile::TempDir;

/// An ephemeral directory scoped to exactly one execution.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    // None when the workspace is kept for debugging; otherwise the guard
    // deletes the directory on drop.
    _guard: Option<TempDir>,
}

impl Workspace {
    /// Create a fresh workspace directory for one execution.
    pub fn create(language: &str, config: &RunnerConfig) -> std::io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(&format!("runcell-{language}-"))
            .tempdir()?;
        if config.keep_workspace {
            let path = dir.keep();
            tracing::info!(path = %path.display(), "Keeping workspace for inspection");
            Ok(Self { path, _guard: None })
        } else {
            Ok(Self {
                path: dir.path().to_path_buf(),
                _guard: Some(dir),
            })
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
