//! CLI layer: argument parsing and action dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod usage;

pub use args::{parse_command, Invocation};
pub use commands::Dispatcher;
pub use error::{CliError, CliResult};
