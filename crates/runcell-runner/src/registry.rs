//! Language registry: maps a requested language name to a runner.
//!
//! Lookup is case-insensitive. Enabled languages are explicit configuration
//! (`RUNCELL_LANGUAGES`) rather than hardcoded: `php` is registered in the
//! table but ships without an implementation, so it reports "registered but
//! not enabled" — a first-class state, distinct from an unknown language.

use runcell_core::config::RunnerConfig;
use runcell_core::error::RunnerError;

use crate::python::PythonRunner;
use crate::runner::LanguageRunner;
use crate::typescript::TypeScriptRunner;

/// Every language the registry knows about, enabled or not.
pub const REGISTERED_LANGUAGES: &[&str] = &["typescript", "python", "php"];

/// Whether a registered language can currently hand out a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageStatus {
    Enabled,
    Disabled,
}

/// Registry state for one language, without constructing a runner.
pub fn language_status(language: &str, config: &RunnerConfig) -> Option<LanguageStatus> {
    let language = language.trim().to_lowercase();
    if !REGISTERED_LANGUAGES.contains(&language.as_str()) {
        return None;
    }
    // php is registered but has no shipped runner; enabling it via config
    // cannot make it dispatchable.
    if language == "php" || !config.language_enabled(&language) {
        return Some(LanguageStatus::Disabled);
    }
    Some(LanguageStatus::Enabled)
}

/// `(language, status)` for every registered language, in table order.
pub fn language_table(config: &RunnerConfig) -> Vec<(&'static str, LanguageStatus)> {
    REGISTERED_LANGUAGES
        .iter()
        .map(|lang| {
            let status = language_status(lang, config).unwrap_or(LanguageStatus::Disabled);
            (*lang, status)
        })
        .collect()
}

/// Look up the runner for a language. Raises a descriptive error for
/// unrecognized or disabled languages instead of returning a default; this
/// happens before any workspace is created.
pub fn get_runner(
    language: &str,
    config: &RunnerConfig,
) -> Result<Box<dyn LanguageRunner>, RunnerError> {
    let normalized = language.trim().to_lowercase();
    match language_status(&normalized, config) {
        None => Err(RunnerError::UnsupportedLanguage(normalized)),
        Some(LanguageStatus::Disabled) => Err(RunnerError::LanguageDisabled(normalized)),
        Some(LanguageStatus::Enabled) => match normalized.as_str() {
            "typescript" => Ok(Box::new(TypeScriptRunner::new()?)),
            "python" => Ok(Box::new(PythonRunner::new()?)),
            other => Err(RunnerError::UnsupportedLanguage(other.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RunnerConfig {
        RunnerConfig {
            languages: vec!["typescript".into(), "python".into()],
            scratch_dir: std::env::temp_dir(),
            install_timeout_secs: 1,
            default_timeout_secs: 1,
            keep_workspace: false,
        }
    }

    #[test]
    fn unknown_language_is_unsupported() {
        let err = get_runner("ruby", &config()).unwrap_err();
        assert!(matches!(err, RunnerError::UnsupportedLanguage(l) if l == "ruby"));
    }

    #[test]
    fn php_is_registered_but_disabled() {
        assert_eq!(
            language_status("php", &config()),
            Some(LanguageStatus::Disabled)
        );
        let err = get_runner("php", &config()).unwrap_err();
        assert!(matches!(err, RunnerError::LanguageDisabled(l) if l == "php"));
    }

    #[test]
    fn php_stays_disabled_even_when_configured_on() {
        let mut cfg = config();
        cfg.languages.push("php".into());
        assert_eq!(
            language_status("php", &cfg),
            Some(LanguageStatus::Disabled)
        );
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(
            language_status("TypeScript", &config()),
            Some(LanguageStatus::Enabled)
        );
        assert_eq!(
            language_status("  PYTHON  ", &config()),
            Some(LanguageStatus::Enabled)
        );
    }

    #[test]
    fn config_can_disable_an_implemented_language() {
        let cfg = RunnerConfig {
            languages: vec!["python".into()],
            ..config()
        };
        assert_eq!(
            language_status("typescript", &cfg),
            Some(LanguageStatus::Disabled)
        );
    }

    #[test]
    fn table_lists_every_registered_language() {
        let table = language_table(&config());
        assert_eq!(table.len(), 3);
        assert!(table.contains(&("php", LanguageStatus::Disabled)));
    }
}
