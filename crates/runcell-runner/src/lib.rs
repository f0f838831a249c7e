//! Per-language runner abstraction and execution pipeline.
//!
//! Every runner satisfies the same contract: extract dependency candidates
//! from the raw source, prepare an ephemeral workspace, install dependencies
//! under a restricted environment, instrument the code with input/env
//! bindings and a result-capture epilogue, execute under a wall-clock
//! timeout, and split the captured stdout on sentinel markers.

pub mod deps;
pub mod install;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod python;
pub mod registry;
pub mod runner;
pub mod typescript;
pub mod workspace;

pub use pipeline::execute;
pub use registry::{get_runner, language_table, LanguageStatus};
pub use runner::LanguageRunner;
