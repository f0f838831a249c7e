//! The shared execution pipeline every runner is driven through.
//!
//! extract → workspace → install → instrument/write → run → parse. One
//! runner instance handles one request at a time; concurrent requests get
//! independent workspaces and need no cross-instance synchronization.

use runcell_core::config::RunnerConfig;
use runcell_core::error::RunnerError;
use runcell_core::protocol::{ExecutionRequest, ExecutionResult};

use crate::install;
use crate::output;
use crate::process;
use crate::runner::LanguageRunner;
use crate::workspace::Workspace;

/// Execute one request with the given runner.
///
/// Install failures and timeouts abort before user code runs. Once the user
/// process has started, its outcome — including a wall-clock timeout — is
/// reported in the [`ExecutionResult`], and result extraction is
/// best-effort.
pub fn execute(
    runner: &dyn LanguageRunner,
    request: &ExecutionRequest,
    config: &RunnerConfig,
) -> Result<ExecutionResult, RunnerError> {
    let packages = runner.extract_dependencies(&request.code);
    tracing::debug!(
        language = runner.language(),
        packages = ?packages,
        "Extracted dependency candidates"
    );

    let workspace = Workspace::create(runner.language(), config)?;
    install::install(runner, &packages, workspace.path(), config)?;

    let source = workspace.path().join(runner.source_file());
    let instrumented = runner.instrument(&request.code, &request.inputs, &request.env_vars);
    std::fs::write(&source, instrumented)?;

    let timeout_secs = config.effective_timeout(request.timeout_secs);
    let mut cmd = runner.run_command(&source, workspace.path());
    // Caller-supplied keys shadow the ambient environment.
    cmd.envs(&request.env_vars);

    tracing::info!(
        language = runner.language(),
        timeout_secs,
        "Executing user code"
    );
    let out = process::run_with_timeout(cmd, timeout_secs)?;
    let (stdout, result) = output::parse(&out.stdout);

    Ok(ExecutionResult {
        stdout,
        stderr: out.stderr,
        status: out.status,
        result,
    })
}
