//! Sentinel-marker output parsing.
//!
//! The instrumented epilogue prints the serialized result between two
//! literal marker lines. Splitting on those markers separates user-visible
//! output from the structured payload. Malformed or missing markers are an
//! expected runtime condition (user code may crash before the epilogue), so
//! parsing is tolerant by construction and never returns an error.

use serde_json::{Map, Value};

/// Literal line printed immediately before the serialized result.
pub const RESULT_START: &str = "__RESULT_START__";

/// Literal line printed immediately after the serialized result.
pub const RESULT_END: &str = "__RESULT_END__";

fn empty_result() -> Value {
    Value::Object(Map::new())
}

/// Split captured stdout into `(normal_output, result_value)`.
///
/// If the start marker is absent or appears more than once, the entire
/// stdout is returned verbatim with an empty result. Otherwise the prefix
/// (trimmed) is the user's output and the segment up to the end marker is
/// parsed as JSON, degrading silently to `{}` when empty or invalid.
pub fn parse(stdout: &str) -> (String, Value) {
    let parts: Vec<&str> = stdout.split(RESULT_START).collect();
    if parts.len() != 2 {
        return (stdout.to_string(), empty_result());
    }

    let normal_output = parts[0].trim().to_string();
    let payload = parts[1].split(RESULT_END).next().unwrap_or("").trim();
    if payload.is_empty() {
        return (normal_output, empty_result());
    }

    let result = serde_json::from_str(payload).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "Result payload is not valid JSON, degrading to {{}}");
        empty_result()
    });
    (normal_output, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_output_and_result() {
        let stdout = format!("hello\nworld\n{RESULT_START}\n{{\"n\": 6}}\n{RESULT_END}\n");
        let (out, result) = parse(&stdout);
        assert_eq!(out, "hello\nworld");
        assert_eq!(result, json!({"n": 6}));
    }

    #[test]
    fn nested_json_round_trips() {
        let value = json!({"a": [1, 2, {"b": null}], "c": "text", "d": true});
        let stdout = format!("{RESULT_START}\n{value}\n{RESULT_END}\n");
        let (out, result) = parse(&stdout);
        assert_eq!(out, "");
        assert_eq!(result, value);
    }

    #[test]
    fn scalar_results_survive() {
        for value in [json!(6), json!(null), json!("s"), json!([1, 2])] {
            let stdout = format!("{RESULT_START}\n{value}\n{RESULT_END}\n");
            assert_eq!(parse(&stdout).1, value);
        }
    }

    #[test]
    fn missing_marker_returns_stdout_verbatim() {
        let stdout = "crashed before the epilogue\n";
        let (out, result) = parse(stdout);
        assert_eq!(out, stdout);
        assert_eq!(result, json!({}));
    }

    #[test]
    fn duplicate_start_marker_returns_stdout_verbatim() {
        let stdout = format!("{RESULT_START}\nx\n{RESULT_START}\ny\n{RESULT_END}\n");
        let (out, result) = parse(&stdout);
        assert_eq!(out, stdout);
        assert_eq!(result, json!({}));
    }

    #[test]
    fn missing_end_marker_still_parses_payload() {
        let stdout = format!("before\n{RESULT_START}\n42\n");
        let (out, result) = parse(&stdout);
        assert_eq!(out, "before");
        assert_eq!(result, json!(42));
    }

    #[test]
    fn invalid_json_degrades_to_empty_object() {
        let stdout = format!("{RESULT_START}\nnot json at all\n{RESULT_END}\n");
        let (out, result) = parse(&stdout);
        assert_eq!(out, "");
        assert_eq!(result, json!({}));
    }

    #[test]
    fn parse_is_idempotent_over_normal_output() {
        let stdout = format!("line one\nline two\n{RESULT_START}\n{{\"k\": 1}}\n{RESULT_END}\n");
        let (first, _) = parse(&stdout);
        let (second, result) = parse(&first);
        assert_eq!(first, second);
        assert_eq!(result, json!({}));
    }
}
