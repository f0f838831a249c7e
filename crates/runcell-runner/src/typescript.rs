//! TypeScript runner: npm for dependencies, ts-node for execution.

use regex::Regex;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use runcell_core::error::RunnerError;

use crate::output::{RESULT_END, RESULT_START};
use crate::runner::LanguageRunner;

/// Import/require matchers, first capture group = module specifier.
static IMPORT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // import defaultExport from 'x' / import * as ns from 'x'
        r#"import\s+.*\s+from\s+['"]([^'"]+)['"]"#,
        // bare side-effect import: import 'x'
        r#"import\s+['"]([^'"]+)['"]"#,
        // CommonJS: require('x')
        r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
        // destructured: import { a, b } from 'x'
        r#"import\s*\{[^}]*\}\s*from\s*['"]([^'"]+)['"]"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// Executes TypeScript through `npx ts-node` inside the workspace, with
/// `typescript` and `ts-node` installed per execution so no global toolchain
/// beyond npm itself is assumed.
#[derive(Debug)]
pub struct TypeScriptRunner {
    npm: PathBuf,
    npx: PathBuf,
}

impl TypeScriptRunner {
    /// Locate npm and npx on PATH, failing fast when either is missing.
    pub fn new() -> Result<Self, RunnerError> {
        let npm = which::which("npm")
            .map_err(|_| RunnerError::ToolchainMissing("npm".to_string()))?;
        let npx = which::which("npx")
            .map_err(|_| RunnerError::ToolchainMissing("npx".to_string()))?;
        Ok(Self { npm, npx })
    }

    /// Construct with explicit tool paths (tests, non-PATH installs).
    pub fn with_tools(npm: PathBuf, npx: PathBuf) -> Self {
        Self { npm, npx }
    }
}

/// Prepend input/env bindings and append the result-capture epilogue.
///
/// Values are embedded as JSON literals (valid TypeScript expressions), so
/// arbitrary JSON — objects, arrays, scalars — lands in user code unchanged
/// and quoting in keys or values cannot break out of the statement.
pub(crate) fn instrument(
    code: &str,
    inputs: &Map<String, Value>,
    env_vars: &BTreeMap<String, String>,
) -> String {
    let mut header = String::new();
    for (name, value) in inputs {
        header.push_str(&format!("const {name}: any = {value};\n"));
    }
    for (key, value) in env_vars {
        let key = Value::String(key.clone());
        let value = Value::String(value.clone());
        header.push_str(&format!("process.env[{key}] = {value};\n"));
    }

    let epilogue = format!(
        r#"
let __runcell_result: any = null;
try {{
    if (typeof (globalThis as any).output !== 'undefined') {{
        __runcell_result = (globalThis as any).output;
    }}
}} catch (error) {{
    console.error('Error capturing result:', error);
}}
let __runcell_payload: string = 'null';
try {{
    __runcell_payload = JSON.stringify(__runcell_result) ?? 'null';
}} catch (error) {{
    console.error('Error serializing result:', error);
}}
console.log('{RESULT_START}');
console.log(__runcell_payload);
console.log('{RESULT_END}');
"#
    );

    format!("{header}{code}\n{epilogue}")
}

impl LanguageRunner for TypeScriptRunner {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn source_file(&self) -> &'static str {
        "main.ts"
    }

    fn toolchain_packages(&self) -> &'static [&'static str] {
        &["typescript", "ts-node"]
    }

    fn import_patterns(&self) -> &[Regex] {
        &IMPORT_PATTERNS
    }

    fn write_manifest(
        &self,
        workspace: &Path,
        packages: &BTreeSet<String>,
    ) -> std::io::Result<()> {
        let dependencies: Map<String, Value> = packages
            .iter()
            .map(|name| (name.clone(), Value::String("latest".to_string())))
            .collect();
        let package_json = json!({ "dependencies": dependencies });
        std::fs::write(workspace.join("package.json"), package_json.to_string())?;

        let tsconfig = json!({
            "compilerOptions": {
                "target": "es2016",
                "module": "commonjs",
                "esModuleInterop": true,
                "forceConsistentCasingInFileNames": true,
                "strict": true,
                "skipLibCheck": true
            }
        });
        std::fs::write(workspace.join("tsconfig.json"), tsconfig.to_string())
    }

    fn install_command(&self, workspace: &Path, scratch_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.npm);
        cmd.args([
            "install",
            "--no-audit",
            "--no-fund",
            "--omit=dev",
            "--omit=optional",
            "--silent",
        ])
        .current_dir(workspace)
        .env("HOME", scratch_dir)
        .env("NPM_CONFIG_CACHE", scratch_dir.join(".npm"))
        .env("NO_UPDATE_NOTIFIER", "1");
        cmd
    }

    fn run_command(&self, source: &Path, workspace: &Path) -> Command {
        let mut cmd = Command::new(&self.npx);
        cmd.arg("ts-node").arg(source).current_dir(workspace);
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
