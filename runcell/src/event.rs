//! Inbound event normalization.
//!
//! Callers deliver requests inside varying transport envelopes: a raw JSON
//! string, a proxy-style object with a nested `body`, or the structured
//! request itself. This adapter unwraps whichever shape arrives into an
//! [`ExecutionRequest`]; an envelope whose body is not valid JSON falls back
//! to an empty payload (which then fails request validation with a clear
//! error instead of a parse panic deep in a runner).

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use runcell_core::protocol::ExecutionRequest;

fn empty_payload() -> Value {
    Value::Object(Map::new())
}

/// Unwrap the transport envelope down to the request payload.
pub fn unwrap_envelope(event: Value) -> Value {
    match event {
        // Raw JSON string event: re-parse its contents.
        Value::String(s) => serde_json::from_str(&s).unwrap_or_else(|_| empty_payload()),
        // Proxy-style event: the request lives in `body`.
        Value::Object(mut map) => match map.remove("body") {
            Some(Value::String(body)) => {
                serde_json::from_str(&body).unwrap_or_else(|_| empty_payload())
            }
            Some(body) => body,
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Parse raw event text into an [`ExecutionRequest`].
pub fn parse_request(raw: &str) -> Result<ExecutionRequest> {
    let event: Value = serde_json::from_str(raw).context("event is not valid JSON")?;
    let payload = unwrap_envelope(event);
    serde_json::from_value(payload).context("event does not contain a valid execution request")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn direct_request_passes_through() {
        let req = parse_request(r#"{"language": "python", "code": "x = 1"}"#).unwrap();
        assert_eq!(req.language, "python");
        assert_eq!(req.code, "x = 1");
    }

    #[test]
    fn raw_string_event_is_reparsed() {
        let raw = serde_json::to_string(&json!(
            "{\"language\": \"typescript\", \"code\": \"1;\", \"timeout\": 5}"
        ))
        .unwrap();
        let req = parse_request(&raw).unwrap();
        assert_eq!(req.language, "typescript");
        assert_eq!(req.timeout_secs, 5);
    }

    #[test]
    fn body_envelope_is_unwrapped() {
        let event = json!({
            "headers": {"content-type": "application/json"},
            "body": "{\"language\": \"python\", \"code\": \"output = 2\"}"
        });
        let req = parse_request(&event.to_string()).unwrap();
        assert_eq!(req.code, "output = 2");
    }

    #[test]
    fn structured_body_is_used_directly() {
        let event = json!({"body": {"language": "python", "code": ""}});
        let req = parse_request(&event.to_string()).unwrap();
        assert_eq!(req.language, "python");
    }

    #[test]
    fn invalid_body_falls_back_to_empty_payload() {
        let event = json!({"body": "not json {"});
        assert_eq!(unwrap_envelope(event), json!({}));
        // ...which then fails request validation with a descriptive error.
        let err = parse_request(r#"{"body": "not json {"}"#).unwrap_err();
        assert!(err.to_string().contains("execution request"));
    }
}
