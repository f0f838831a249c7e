mod cli;
mod event;
mod observability;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;

use cli::{Cli, Commands};
use runcell_core::config::RunnerConfig;
use runcell_runner::{execute, get_runner, language_table, LanguageStatus};

fn main() -> Result<()> {
    observability::init_tracing();
    let cli = Cli::parse();
    let config = RunnerConfig::from_env();

    match cli.command {
        Commands::Run {
            event,
            language,
            code_file,
            inputs,
            env_vars,
            timeout,
        } => {
            let raw = if event == "-" {
                let mut s = String::new();
                std::io::stdin()
                    .read_to_string(&mut s)
                    .context("read event from stdin")?;
                s
            } else {
                std::fs::read_to_string(&event)
                    .with_context(|| format!("read event file {event}"))?
            };

            let mut request = event::parse_request(&raw)?;
            if let Some(language) = language {
                request.language = language;
            }
            if let Some(path) = code_file {
                request.code = std::fs::read_to_string(&path)
                    .with_context(|| format!("read code file {}", path.display()))?;
            }
            for (key, value) in inputs {
                request.inputs.insert(key, value);
            }
            for (key, value) in env_vars {
                request.env_vars.insert(key, value);
            }
            if let Some(timeout) = timeout {
                request.timeout_secs = timeout;
            }

            let runner = get_runner(&request.language, &config)?;
            let result = execute(runner.as_ref(), &request, &config)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Languages => {
            for (language, status) in language_table(&config) {
                let status = match status {
                    LanguageStatus::Enabled => "enabled",
                    LanguageStatus::Disabled => "disabled",
                };
                println!("{language}\t{status}");
            }
        }
    }

    Ok(())
}
