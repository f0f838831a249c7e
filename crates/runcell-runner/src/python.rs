//! Python runner: pip for dependencies, the system interpreter for execution.

use regex::Regex;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use runcell_core::error::RunnerError;

use crate::deps;
use crate::output::{RESULT_END, RESULT_START};
use crate::runner::LanguageRunner;

/// Directory inside the workspace where pip installs packages; exposed to
/// the interpreter via PYTHONPATH.
const DEPS_DIR: &str = ".runcell-deps";

/// Import matchers, first capture group = module path.
static IMPORT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // import requests / import numpy.linalg
        r"(?m)^\s*import\s+([A-Za-z_][\w\.]*)",
        // from requests import get
        r"(?m)^\s*from\s+([A-Za-z_][\w\.]*)\s+import\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// Standard-library modules commonly seen in snippets; importing these must
/// not become a pip install. Best-effort like the rest of the scanner.
const STDLIB_MODULES: &[&str] = &[
    "abc", "argparse", "asyncio", "base64", "collections", "contextlib", "copy", "csv",
    "dataclasses", "datetime", "decimal", "enum", "functools", "glob", "hashlib", "heapq", "html",
    "http", "io", "itertools", "json", "logging", "math", "os", "pathlib", "pickle", "random",
    "re", "shutil", "socket", "sqlite3", "string", "struct", "subprocess", "sys", "tempfile",
    "threading", "time", "traceback", "types", "typing", "unittest", "urllib", "uuid", "xml",
    "zipfile",
];

/// Executes Python through the system interpreter, with pip installing any
/// extracted packages into a workspace-local target directory. The
/// interpreter itself is not pip-installable, so the mandatory toolchain
/// set is empty and the binary is located on PATH instead.
#[derive(Debug)]
pub struct PythonRunner {
    python: PathBuf,
}

impl PythonRunner {
    /// Locate `python3` (falling back to `python`) on PATH.
    pub fn new() -> Result<Self, RunnerError> {
        let python = which::which("python3")
            .or_else(|_| which::which("python"))
            .map_err(|_| RunnerError::ToolchainMissing("python3".to_string()))?;
        Ok(Self { python })
    }

    /// Construct with an explicit interpreter path (tests, non-PATH installs).
    pub fn with_interpreter(python: PathBuf) -> Self {
        Self { python }
    }
}

/// Prepend input/env bindings and append the result-capture epilogue.
///
/// Inputs arrive as JSON and are decoded with `json.loads` at runtime, so
/// arbitrary nesting survives; the serialized JSON is itself embedded as a
/// JSON string literal, which Python accepts verbatim.
pub(crate) fn instrument(
    code: &str,
    inputs: &Map<String, Value>,
    env_vars: &BTreeMap<String, String>,
) -> String {
    let mut header = String::from(
        "import json as __runcell_json\nimport os as __runcell_os\nimport sys as __runcell_sys\n",
    );
    for (name, value) in inputs {
        let literal = Value::String(value.to_string());
        header.push_str(&format!("{name} = __runcell_json.loads({literal})\n"));
    }
    for (key, value) in env_vars {
        let key = Value::String(key.clone());
        let value = Value::String(value.clone());
        header.push_str(&format!("__runcell_os.environ[{key}] = {value}\n"));
    }

    let epilogue = format!(
        r#"
try:
    __runcell_result = output if 'output' in globals() else None
except Exception as __runcell_err:
    print('Error capturing result:', __runcell_err, file=__runcell_sys.stderr)
    __runcell_result = None
try:
    __runcell_payload = __runcell_json.dumps(__runcell_result)
except Exception as __runcell_err:
    print('Error serializing result:', __runcell_err, file=__runcell_sys.stderr)
    __runcell_payload = 'null'
print('{RESULT_START}')
print(__runcell_payload)
print('{RESULT_END}')
"#
    );

    format!("{header}{code}\n{epilogue}")
}

impl LanguageRunner for PythonRunner {
    fn language(&self) -> &'static str {
        "python"
    }

    fn source_file(&self) -> &'static str {
        "main.py"
    }

    fn toolchain_packages(&self) -> &'static [&'static str] {
        &[]
    }

    fn import_patterns(&self) -> &[Regex] {
        &IMPORT_PATTERNS
    }

    /// Python modules split on `.` rather than `/`, and stdlib modules are
    /// not installable packages.
    fn normalize_specifier(&self, specifier: &str) -> Option<String> {
        let top = deps::first_segment(specifier)?.split('.').next()?;
        if top.is_empty() || STDLIB_MODULES.contains(&top) {
            None
        } else {
            Some(top.to_string())
        }
    }

    fn write_manifest(
        &self,
        workspace: &Path,
        packages: &BTreeSet<String>,
    ) -> std::io::Result<()> {
        // requirements.txt with bare names = unconstrained "latest".
        let mut manifest = String::new();
        for name in packages {
            manifest.push_str(name);
            manifest.push('\n');
        }
        std::fs::write(workspace.join("requirements.txt"), manifest)
    }

    fn install_command(&self, workspace: &Path, scratch_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.python);
        cmd.args([
            "-m",
            "pip",
            "install",
            "--requirement",
            "requirements.txt",
            "--target",
            DEPS_DIR,
            "--no-input",
            "--disable-pip-version-check",
            "--quiet",
        ])
        .current_dir(workspace)
        .env("HOME", scratch_dir)
        .env("PIP_CACHE_DIR", scratch_dir.join(".pip"));
        cmd
    }

    fn run_command(&self, source: &Path, workspace: &Path) -> Command {
        let mut cmd = Command::new(&self.python);
        cmd.arg(source)
            .current_dir(workspace)
            .env("PYTHONPATH", workspace.join(DEPS_DIR));
        cmd
    }

    fn instrument(
        &self,
        code: &str,
        inputs: &Map<String, Value>,
        env_vars: &BTreeMap<String, String>,
    ) -> String {
        instrument(code, inputs, env_vars)
    }
}
