//! Environment-variable key constants.
//!
//! Primary variables use the `RUNCELL_*` prefix. Alias slots exist so future
//! renames can keep a compatibility chain without touching call sites.

/// Runner behavior.
pub mod runner {
    /// Comma-separated list of enabled languages (e.g. `typescript,python`).
    pub const LANGUAGES: &str = "RUNCELL_LANGUAGES";
    pub const LANGUAGES_ALIASES: &[&str] = &[];

    /// Scratch area for redirected package-manager homes and caches.
    pub const SCRATCH_DIR: &str = "RUNCELL_SCRATCH_DIR";
    pub const SCRATCH_DIR_ALIASES: &[&str] = &[];

    /// Hard bound on the package-manager child process, in seconds.
    pub const INSTALL_TIMEOUT_SECS: &str = "RUNCELL_INSTALL_TIMEOUT_SECS";

    /// Default execution timeout when the request carries none, in seconds.
    pub const TIMEOUT_SECS: &str = "RUNCELL_TIMEOUT_SECS";

    /// Keep workspaces instead of deleting them on drop (debugging aid).
    pub const KEEP_WORKSPACE: &str = "RUNCELL_KEEP_WORKSPACE";
}

/// Observability and logging.
pub mod observability {
    pub const QUIET: &str = "RUNCELL_QUIET";
    pub const QUIET_ALIASES: &[&str] = &[];

    pub const LOG_LEVEL: &str = "RUNCELL_LOG_LEVEL";
    pub const LOG_LEVEL_ALIASES: &[&str] = &[];

    pub const LOG_JSON: &str = "RUNCELL_LOG_JSON";
    pub const LOG_JSON_ALIASES: &[&str] = &[];
}
