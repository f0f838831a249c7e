//! Structured configuration schemas.

use std::path::PathBuf;

use super::env_keys::{observability as obv_keys, runner as runner_keys};
use super::loader::{env_bool, env_optional, env_or, env_u64};

/// Default execution timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Hard bound on package-manager invocations in seconds, independent of the
/// caller's execution timeout.
pub const DEFAULT_INSTALL_TIMEOUT_SECS: u64 = 300;

/// Languages enabled when `RUNCELL_LANGUAGES` is unset. `php` is registered
/// in the dispatch table but deliberately absent here.
pub const DEFAULT_LANGUAGES: &[&str] = &["typescript", "python"];

/// Runner behavior configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Languages the registry will hand out runners for.
    pub languages: Vec<String>,
    /// Scratch area for redirected package-manager homes and caches. Never
    /// the real home directory.
    pub scratch_dir: PathBuf,
    /// Hard timeout for dependency installation, in seconds.
    pub install_timeout_secs: u64,
    /// Execution timeout applied when a request carries none, in seconds.
    pub default_timeout_secs: u64,
    /// Keep workspace directories instead of deleting them (debugging aid).
    pub keep_workspace: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl RunnerConfig {
    /// Load runner configuration from the environment.
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        let languages = env_or(runner_keys::LANGUAGES, runner_keys::LANGUAGES_ALIASES, || {
            DEFAULT_LANGUAGES.join(",")
        })
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

        let scratch_dir = env_optional(runner_keys::SCRATCH_DIR, runner_keys::SCRATCH_DIR_ALIASES)
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_scratch_dir);

        Self {
            languages,
            scratch_dir,
            install_timeout_secs: env_u64(
                runner_keys::INSTALL_TIMEOUT_SECS,
                &[],
                DEFAULT_INSTALL_TIMEOUT_SECS,
            ),
            default_timeout_secs: env_u64(runner_keys::TIMEOUT_SECS, &[], DEFAULT_TIMEOUT_SECS),
            keep_workspace: env_bool(runner_keys::KEEP_WORKSPACE, &[], false),
        }
    }

    /// Effective timeout for a request: the request's own positive value, or
    /// the configured default when the request carries `0`.
    pub fn effective_timeout(&self, requested_secs: u64) -> u64 {
        if requested_secs > 0 {
            requested_secs
        } else {
            self.default_timeout_secs
        }
    }

    pub fn language_enabled(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    fn default_scratch_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("runcell")
    }
}

/// Logging configuration for the CLI's tracing subscriber.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            quiet: env_bool(obv_keys::QUIET, obv_keys::QUIET_ALIASES, false),
            log_level: env_or(obv_keys::LOG_LEVEL, obv_keys::LOG_LEVEL_ALIASES, || {
                "runcell=info".to_string()
            }),
            log_json: env_bool(obv_keys::LOG_JSON, obv_keys::LOG_JSON_ALIASES, false),
        }
    }
}
