//! Command-line argument parsing
//!
//! Every option is accepted as `--name` and `/name`; help additionally as
//! `-h` and `/h`. Tokens are consumed left to right and later options
//! override earlier ones. Options taking a value consume the next token
//! whatever it looks like.

use std::slice::Iter;

use tracing::{debug, instrument, trace};

use crate::application::load_data;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::domain::{Action, InputParameters};
use crate::infrastructure::traits::FileSystem;
use crate::logging;

/// Canonical identity of a command-line option, whatever its spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionId {
    Help,
    Version,
    Params,
    ParamDetail,
    JobId,
    Status,
    ResultTypes,
    PollJob,
    OutFile,
    OutFormat,
    Verbose,
    Quiet,
    Email,
    Title,
    Async,
    DebugLevel,
    Endpoint,
    Para,
    NoPara,
    Pretty,
    NoPretty,
    ASequence,
    BSequence,
}

/// Name table: `(long name, short name, option)`.
const OPTIONS: &[(&str, Option<char>, OptionId)] = &[
    ("help", Some('h'), OptionId::Help),
    ("version", None, OptionId::Version),
    ("params", None, OptionId::Params),
    ("paramDetail", None, OptionId::ParamDetail),
    ("jobid", None, OptionId::JobId),
    ("status", None, OptionId::Status),
    ("resultTypes", None, OptionId::ResultTypes),
    ("polljob", None, OptionId::PollJob),
    ("outfile", None, OptionId::OutFile),
    ("outformat", None, OptionId::OutFormat),
    ("verbose", None, OptionId::Verbose),
    ("quiet", None, OptionId::Quiet),
    ("email", None, OptionId::Email),
    ("title", None, OptionId::Title),
    ("async", None, OptionId::Async),
    ("debugLevel", None, OptionId::DebugLevel),
    ("endpoint", None, OptionId::Endpoint),
    ("para", None, OptionId::Para),
    ("nopara", None, OptionId::NoPara),
    ("pretty", None, OptionId::Pretty),
    ("nopretty", None, OptionId::NoPretty),
    ("asequence", None, OptionId::ASequence),
    ("bsequence", None, OptionId::BSequence),
];

/// Resolve any accepted spelling to its option.
pub fn lookup(token: &str) -> Option<OptionId> {
    if let Some(name) = token.strip_prefix("--") {
        return find(|long, _| long == name);
    }
    if let Some(name) = token.strip_prefix('/') {
        return find(|long, short| long == name || is_short(short, name));
    }
    if let Some(name) = token.strip_prefix('-') {
        return find(|_, short| is_short(short, name));
    }
    None
}

fn find(matches: impl Fn(&str, Option<char>) -> bool) -> Option<OptionId> {
    OPTIONS
        .iter()
        .find(|(long, short, _)| matches(long, *short))
        .map(|(_, _, id)| *id)
}

fn is_short(short: Option<char>, name: &str) -> bool {
    let mut chars = name.chars();
    matches!((short, chars.next(), chars.next()), (Some(s), Some(c), None) if s == c)
}

/// Whether an unrecognized token was meant as an option.
///
/// `--anything`, or `/name` with no further slash. Paths such as
/// `/data/seq.fa` and plain words are not options.
pub fn looks_like_option(token: &str) -> bool {
    token.starts_with("--") || token.rfind('/') == Some(0)
}

/// Everything selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// `None` when no action option was given
    pub action: Option<Action>,
    pub params: InputParameters,
    pub param_name: Option<String>,
    pub job_id: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub outfile: Option<String>,
    pub outformat: Option<String>,
    pub endpoint: Option<String>,
    /// Output verbosity, 1 by default
    pub output_level: i32,
    pub debug_level: i32,
    pub async_mode: bool,
}

impl Default for Invocation {
    fn default() -> Self {
        Self {
            action: None,
            params: InputParameters::default(),
            param_name: None,
            job_id: None,
            email: None,
            title: None,
            outfile: None,
            outformat: None,
            endpoint: None,
            output_level: 1,
            debug_level: 0,
            async_mode: false,
        }
    }
}

/// Parse the command line.
///
/// An unknown option aborts parsing with [`Action::Exit`] after reporting it.
/// Sequence arguments are loaded while parsing.
#[instrument(skip_all)]
pub fn parse_command(args: &[String], fs: &dyn FileSystem) -> CliResult<Invocation> {
    let mut inv = Invocation::default();
    let mut tokens = args.iter();

    while let Some(token) = tokens.next() {
        debug!(arg = %token, "parsing");
        let Some(option) = lookup(token) else {
            if looks_like_option(token) {
                output::error(&format!("unknown option: {token}"));
                inv.action = Some(Action::Exit);
                return Ok(inv);
            }
            trace!(arg = %token, "ignoring argument");
            continue;
        };

        match option {
            OptionId::Help => inv.action = Some(Action::Help),
            OptionId::Version => inv.action = Some(Action::Version),
            OptionId::Params => inv.action = Some(Action::ParamList),
            OptionId::ParamDetail => {
                inv.param_name = Some(next_value(&mut tokens, token)?.to_string());
                inv.action = Some(Action::ParamDetail);
            }
            OptionId::JobId => inv.job_id = Some(next_value(&mut tokens, token)?.to_string()),
            OptionId::Status => inv.action = Some(Action::Status),
            OptionId::ResultTypes => inv.action = Some(Action::ResultTypes),
            OptionId::PollJob => inv.action = Some(Action::PollJob),
            OptionId::OutFile => inv.outfile = Some(next_value(&mut tokens, token)?.to_string()),
            OptionId::OutFormat => {
                inv.outformat = Some(next_value(&mut tokens, token)?.to_string())
            }
            OptionId::Verbose => inv.output_level += 1,
            OptionId::Quiet => inv.output_level -= 1,
            OptionId::Email => inv.email = Some(next_value(&mut tokens, token)?.to_string()),
            OptionId::Title => inv.title = Some(next_value(&mut tokens, token)?.to_string()),
            OptionId::Async => {
                inv.action = Some(Action::Submit);
                inv.async_mode = true;
            }
            OptionId::DebugLevel => {
                let value = next_value(&mut tokens, token)?;
                inv.debug_level =
                    value
                        .trim()
                        .parse()
                        .map_err(|e: std::num::ParseIntError| CliError::InvalidValue {
                            option: token.clone(),
                            value: value.to_string(),
                            reason: e.to_string(),
                        })?;
                logging::set_debug_level(inv.debug_level);
            }
            OptionId::Endpoint => {
                inv.endpoint = Some(next_value(&mut tokens, token)?.to_string())
            }
            OptionId::Para => inv.params.para = Some(true),
            OptionId::NoPara => inv.params.para = Some(false),
            OptionId::Pretty => inv.params.pretty = Some(true),
            OptionId::NoPretty => inv.params.pretty = Some(false),
            OptionId::ASequence => {
                let source = next_value(&mut tokens, token)?;
                inv.params.asequence = Some(load_data(fs, source)?);
                inv.action = Some(Action::Submit);
            }
            OptionId::BSequence => {
                let source = next_value(&mut tokens, token)?;
                inv.params.bsequence = Some(load_data(fs, source)?);
                inv.action = Some(Action::Submit);
            }
        }
    }

    debug!(action = ?inv.action, "parsed command line");
    Ok(inv)
}

fn next_value<'a>(tokens: &mut Iter<'a, String>, option: &str) -> CliResult<&'a str> {
    tokens
        .next()
        .map(String::as_str)
        .ok_or_else(|| CliError::MissingValue {
            option: option.to_string(),
        })
}
