//! The `LanguageRunner` trait: extension point for per-language runners.
//!
//! Implement this trait to add support for a new language. Every method
//! covers one phase of the shared pipeline; `pipeline::execute` drives them
//! in order. Heterogeneous toolchains (interpreters, transpilers, package
//! managers) hide behind this one contract.

use regex::Regex;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::process::Command;

use crate::deps;

/// Per-language implementation of the extract/install/instrument/execute
/// pipeline.
pub trait LanguageRunner: std::fmt::Debug + Send + Sync {
    /// Canonical lowercase language name (registry key).
    fn language(&self) -> &'static str;

    /// File name for the instrumented source inside the workspace
    /// (e.g. `main.ts`).
    fn source_file(&self) -> &'static str;

    /// Package-manager-installable tooling the language always needs
    /// (e.g. `typescript` + `ts-node`). Unioned into every dependency set so
    /// execution never relies on a pre-existing global toolchain install
    /// beyond the package manager binary itself. May be empty when the
    /// runtime is not installable through the package manager.
    fn toolchain_packages(&self) -> &'static [&'static str];

    /// Ordered import/require matchers; the first capture group is the
    /// module specifier.
    fn import_patterns(&self) -> &[Regex];

    /// Map a captured specifier to an installable package name, or `None`
    /// for local/stdlib specifiers. The default applies the shared
    /// first-path-segment rule.
    fn normalize_specifier(&self, specifier: &str) -> Option<String> {
        deps::first_segment(specifier).map(str::to_string)
    }

    /// Static best-effort scan of the source for external packages, always
    /// including [`Self::toolchain_packages`]. Never fails.
    fn extract_dependencies(&self, code: &str) -> BTreeSet<String> {
        let mut packages: BTreeSet<String> = self
            .toolchain_packages()
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        for specifier in deps::scan(code, self.import_patterns()) {
            if let Some(name) = self.normalize_specifier(&specifier) {
                packages.insert(name);
            }
        }
        packages
    }

    /// Write the dependency manifest (every package pinned to `latest`) and
    /// any auxiliary toolchain configuration into the workspace root.
    fn write_manifest(&self, workspace: &Path, packages: &BTreeSet<String>)
        -> std::io::Result<()>;

    /// Package-manager invocation for the workspace. The command must be
    /// non-interactive and must confine its home/cache to `scratch_dir`,
    /// never the real home directory.
    fn install_command(&self, workspace: &Path, scratch_dir: &Path) -> Command;

    /// Interpreter/transpiler invocation for the instrumented source file,
    /// with the workspace as working directory.
    fn run_command(&self, source: &Path, workspace: &Path) -> Command;

    /// Rewrite the user's source: prepend input bindings and env-var set
    /// statements, append the sentinel-marker result-capture epilogue.
    fn instrument(
        &self,
        code: &str,
        inputs: &Map<String, Value>,
        env_vars: &BTreeMap<String, String>,
    ) -> String;
}
