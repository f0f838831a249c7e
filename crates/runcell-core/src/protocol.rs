//! Execution protocol types shared between the CLI adapter and the runners.
//!
//! These types are the "currency" of the harness: the adapter produces an
//! [`ExecutionRequest`], the runner pipeline returns an [`ExecutionResult`].
//! They intentionally carry only what a caller needs, not runner internals.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// ─── Request ─────────────────────────────────────────────────────────────────

/// A single code-execution request. Immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Requested language (registry lookup is case-insensitive).
    pub language: String,
    /// Raw user-supplied source code.
    pub code: String,
    /// Named JSON values bound as local variables in the user's code.
    /// Iteration follows insertion order (serde_json's `preserve_order`), so
    /// bindings are emitted in the order the event listed them.
    #[serde(default)]
    pub inputs: Map<String, Value>,
    /// Environment variables set both at spawn time and from inside the
    /// instrumented code.
    #[serde(default)]
    pub env_vars: BTreeMap<String, String>,
    /// Wall-clock execution timeout in seconds. `0` (or absent) means
    /// "use the configured default" — the protocol requires a positive value.
    #[serde(default, alias = "timeout")]
    pub timeout_secs: u64,
}

// ─── Result ──────────────────────────────────────────────────────────────────

/// How the user's process ended: ran to completion (possibly failing) or was
/// killed on wall-clock expiry. Callers can tell "ran and failed" from
/// "never finished".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    /// The process exited on its own with this code.
    Exited(i32),
    /// The process was terminated after exceeding its wall-clock timeout.
    TimedOut,
}

impl ProcessStatus {
    pub fn success(&self) -> bool {
        matches!(self, Self::Exited(0))
    }
}

/// Normalized outcome of one execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// User-visible stdout with the sentinel-delimited result block stripped.
    pub stdout: String,
    /// Captured stderr, verbatim.
    pub stderr: String,
    /// Exit status (surfaced, not interpreted — success/failure policy is a
    /// caller concern).
    pub status: ProcessStatus,
    /// Structured result the code exposed via the conventional `output`
    /// global. Best-effort: degrades to `{}` on any capture or parse failure.
    pub result: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_apply() {
        let req: ExecutionRequest =
            serde_json::from_str(r#"{"language": "typescript", "code": "1;"}"#).unwrap();
        assert_eq!(req.language, "typescript");
        assert!(req.inputs.is_empty());
        assert!(req.env_vars.is_empty());
        assert_eq!(req.timeout_secs, 0);
    }

    #[test]
    fn request_accepts_timeout_alias() {
        let req: ExecutionRequest =
            serde_json::from_str(r#"{"language": "python", "code": "", "timeout": 12}"#).unwrap();
        assert_eq!(req.timeout_secs, 12);
    }

    #[test]
    fn status_distinguishes_timeout_from_failure() {
        assert!(ProcessStatus::Exited(0).success());
        assert!(!ProcessStatus::Exited(1).success());
        assert!(!ProcessStatus::TimedOut.success());
        assert_ne!(ProcessStatus::TimedOut, ProcessStatus::Exited(-1));
    }

    #[test]
    fn status_serializes_tagged() {
        let exited = serde_json::to_value(ProcessStatus::Exited(3)).unwrap();
        assert_eq!(exited, serde_json::json!({"exited": 3}));
        let timed_out = serde_json::to_value(ProcessStatus::TimedOut).unwrap();
        assert_eq!(timed_out, serde_json::json!("timed_out"));
    }
}
