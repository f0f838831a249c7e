use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

/// runcell - execute untrusted code snippets in ephemeral workspaces
#[derive(Parser, Debug)]
#[command(name = "runcell")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a request event (JSON file, or "-" for stdin)
    Run {
        /// Path to the event JSON, or "-" to read from stdin
        #[arg(value_name = "EVENT")]
        event: String,

        /// Override the requested language
        #[arg(long)]
        language: Option<String>,

        /// Replace the request's code with the contents of this file
        #[arg(long, value_name = "PATH")]
        code_file: Option<PathBuf>,

        /// Set or override an input binding; a value that is not valid JSON
        /// is taken as a string
        #[arg(long = "input", value_name = "KEY=JSON", value_parser = parse_key_json)]
        inputs: Vec<(String, Value)>,

        /// Set or override an environment variable
        #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        env_vars: Vec<(String, String)>,

        /// Override the execution timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// List registered languages and whether each is enabled
    Languages,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{s}`")),
    }
}

fn parse_key_json(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = parse_key_val(s)?;
    let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("MODE=a=b").unwrap(),
            ("MODE".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("no-equals").is_err());
        assert!(parse_key_val("=empty-key").is_err());
    }

    #[test]
    fn key_json_parses_json_and_falls_back_to_string() {
        assert_eq!(parse_key_json("n=5").unwrap().1, json!(5));
        assert_eq!(parse_key_json("flag=true").unwrap().1, json!(true));
        assert_eq!(parse_key_json(r#"obj={"a":[1]}"#).unwrap().1, json!({"a": [1]}));
        // Bare words are not JSON; treat them as string values.
        assert_eq!(parse_key_json("greeting=hello").unwrap().1, json!("hello"));
    }

    #[test]
    fn run_accepts_all_override_flags() {
        let cli = Cli::try_parse_from([
            "runcell",
            "run",
            "event.json",
            "--language",
            "python",
            "--code-file",
            "snippet.py",
            "--input",
            "a=5",
            "--input",
            "name=\"bob\"",
            "--env",
            "MODE=fast",
            "--timeout",
            "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                event,
                language,
                code_file,
                inputs,
                env_vars,
                timeout,
            } => {
                assert_eq!(event, "event.json");
                assert_eq!(language.as_deref(), Some("python"));
                assert_eq!(code_file, Some(PathBuf::from("snippet.py")));
                assert_eq!(
                    inputs,
                    vec![
                        ("a".to_string(), json!(5)),
                        ("name".to_string(), json!("bob")),
                    ]
                );
                assert_eq!(env_vars, vec![("MODE".to_string(), "fast".to_string())]);
                assert_eq!(timeout, Some(10));
            }
            other => panic!("expected Run, got {other:?}"),
        }
    }
}
