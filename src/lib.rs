//! wise2dba: command-line client for the Wise2 DNA Block Aligner job dispatcher
//!
//! Layers:
//! - `domain`: actions, input parameters and job/result descriptions
//! - `application`: job service built on the `JobClient` boundary
//! - `infrastructure`: REST job client, filesystem, service container
//! - `cli`: argument parsing, usage text and dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod logging;
pub mod util;

/// Client version reported by `--version`.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client name reported by `--version` and sent as user agent.
pub const CLIENT_NAME: &str = env!("CARGO_PKG_NAME");
