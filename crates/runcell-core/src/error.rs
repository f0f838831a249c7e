//! Error taxonomy for the execution harness.
//!
//! Installer and executor failures are surfaced to the caller as distinct
//! conditions. Everything downstream of a successfully started user process
//! (sentinel markers, result JSON) is best-effort and never becomes an error.

/// Errors raised by the registry and the execution pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The requested language is not known to the registry at all.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The language is registered but not enabled in the current configuration.
    #[error("language registered but not enabled: {0}")]
    LanguageDisabled(String),

    /// A required toolchain binary (npm, npx, python3, ...) is not on PATH.
    #[error("required tool not found on PATH: {0}")]
    ToolchainMissing(String),

    /// The package manager exited non-zero before user code ever ran.
    #[error("dependency install failed: {stderr}")]
    InstallFailed { stderr: String },

    /// The package manager exceeded its own hard timeout (independent of the
    /// caller's execution timeout).
    #[error("dependency install timed out after {0}s")]
    InstallTimedOut(u64),

    /// Workspace creation or manifest/source writes failed.
    #[error("workspace I/O failed: {0}")]
    Workspace(#[from] std::io::Error),

    /// The child process could not be spawned at all.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}
