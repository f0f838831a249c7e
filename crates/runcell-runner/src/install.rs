//! Sandboxed dependency installation.
//!
//! The package manager runs as a child process scoped to the workspace, with
//! its home/cache redirected into the scratch area and a hard timeout that
//! is independent of the caller's execution timeout. A failed or timed-out
//! install is terminal: user code never runs.

use std::collections::BTreeSet;
use std::path::Path;

use runcell_core::config::RunnerConfig;
use runcell_core::error::RunnerError;
use runcell_core::protocol::ProcessStatus;

use crate::process;
use crate::runner::LanguageRunner;

/// Write the manifest(s) and run the package manager for `packages`.
/// Returns immediately without touching the filesystem when the set is empty.
pub fn install(
    runner: &dyn LanguageRunner,
    packages: &BTreeSet<String>,
    workspace: &Path,
    config: &RunnerConfig,
) -> Result<(), RunnerError> {
    if packages.is_empty() {
        return Ok(());
    }

    runner.write_manifest(workspace, packages)?;
    std::fs::create_dir_all(&config.scratch_dir)?;

    tracing::info!(
        language = runner.language(),
        count = packages.len(),
        "Installing dependencies"
    );
    let cmd = runner.install_command(workspace, &config.scratch_dir);
    let out = process::run_with_timeout(cmd, config.install_timeout_secs)?;
    match out.status {
        ProcessStatus::TimedOut => Err(RunnerError::InstallTimedOut(config.install_timeout_secs)),
        ProcessStatus::Exited(0) => Ok(()),
        ProcessStatus::Exited(code) => {
            tracing::warn!(code, "Package manager exited non-zero");
            Err(RunnerError::InstallFailed { stderr: out.stderr })
        }
    }
}
