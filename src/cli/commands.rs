//! Action dispatch
//!
//! One invocation parses the command line once and runs exactly one action.

use std::error::Error as _;
use std::io::Write;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::services::{Retrieval, SavedResult, SubmitOutcome};
use crate::application::{ApplicationError, ApplicationResult};
use crate::cli::args::{parse_command, Invocation};
use crate::cli::usage::{print_usage, print_version};
use crate::cli::{output, CliError, CliResult};
use crate::config::Settings;
use crate::domain::Action;
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::rest::RestJobClient;
use crate::infrastructure::traits::{FileSystem, JobClient, RealFileSystem};
use crate::infrastructure::InfraResult;

/// Loads the configured settings; only job actions need them.
pub type SettingsLoader = dyn Fn() -> ApplicationResult<Settings>;

/// Builds the job client once the effective settings are known.
pub type Connector = dyn Fn(&Settings) -> InfraResult<Arc<dyn JobClient>>;

/// Parses a command line and runs the selected action.
pub struct Dispatcher {
    loader: Box<SettingsLoader>,
    fs: Arc<dyn FileSystem>,
    connector: Box<Connector>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Dispatcher using the global config, the real filesystem and the REST job client.
    pub fn new() -> Self {
        Self::with_deps(
            Box::new(Settings::load),
            Arc::new(RealFileSystem),
            Box::new(|settings: &Settings| -> InfraResult<Arc<dyn JobClient>> {
                let client = RestJobClient::new(&settings.endpoint, settings.timeout())?;
                Ok(Arc::new(client) as Arc<dyn JobClient>)
            }),
        )
    }

    /// Dispatcher with custom dependencies (for testing).
    pub fn with_deps(
        loader: Box<SettingsLoader>,
        fs: Arc<dyn FileSystem>,
        connector: Box<Connector>,
    ) -> Self {
        Self {
            loader,
            fs,
            connector,
        }
    }

    /// Run one invocation and return the process exit code.
    ///
    /// Results go to `out`, diagnostics to stderr.
    pub fn run(&self, args: &[String], out: &mut dyn Write) -> i32 {
        let result = if args.is_empty() {
            print_usage(out)
                .map(|_| exitcode::OK)
                .map_err(CliError::from)
        } else {
            parse_command(args, self.fs.as_ref()).and_then(|inv| self.dispatch(&inv, out))
        };

        match result {
            Ok(code) => code,
            Err(e) => {
                report(&e);
                e.exit_code()
            }
        }
    }

    /// Run the action selected by a parsed invocation.
    #[instrument(skip_all, fields(action = ?inv.action))]
    pub fn dispatch(&self, inv: &Invocation, out: &mut dyn Write) -> CliResult<i32> {
        let Some(action) = inv.action else {
            output::error("unknown action: no action selected, see --help");
            return Ok(exitcode::UNKNOWN_ACTION);
        };

        match action {
            Action::Exit => {}
            Action::Help => print_usage(out)?,
            Action::Version => print_version(out)?,
            Action::ParamList
            | Action::ParamDetail
            | Action::Submit
            | Action::Status
            | Action::ResultTypes
            | Action::PollJob => {
                let services = self.connect(inv)?;
                execute_job_action(action, inv, &services, out)?;
            }
        }
        Ok(exitcode::OK)
    }

    fn connect(&self, inv: &Invocation) -> CliResult<ServiceContainer> {
        let settings = (self.loader)()?
            .with_overrides(inv.endpoint.as_deref(), inv.email.as_deref());
        debug!(endpoint = %settings.endpoint, "connecting");
        let client = (self.connector)(&settings)?;
        Ok(ServiceContainer::with_deps(
            settings,
            Arc::clone(&self.fs),
            client,
        ))
    }
}

/// Print an error with its source chain.
fn report(err: &CliError) {
    output::error(err);
    let mut source = err.source();
    while let Some(cause) = source {
        output::cause(cause);
        source = cause.source();
    }
    debug!(error = ?err, "invocation failed");
}

fn execute_job_action(
    action: Action,
    inv: &Invocation,
    services: &ServiceContainer,
    out: &mut dyn Write,
) -> CliResult<()> {
    match action {
        Action::ParamList => _params(services, out),
        Action::ParamDetail => _param_detail(inv, services, out),
        Action::Submit => _submit(inv, services, out),
        Action::Status => _status(inv, services, out),
        Action::ResultTypes => _result_types(inv, services, out),
        Action::PollJob => _polljob(inv, services, out),
        Action::Help | Action::Version | Action::Exit => Ok(()),
    }
}

fn require_job_id(inv: &Invocation) -> CliResult<&str> {
    inv.job_id
        .as_deref()
        .ok_or_else(|| ApplicationError::MissingJobId.into())
}

fn retrieval(inv: &Invocation) -> Retrieval<'_> {
    Retrieval {
        outfile: inv.outfile.as_deref(),
        outformat: inv.outformat.as_deref(),
    }
}

#[instrument(skip_all)]
fn _params(services: &ServiceContainer, out: &mut dyn Write) -> CliResult<()> {
    for name in services.job_service().parameters()? {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

#[instrument(skip_all)]
fn _param_detail(
    inv: &Invocation,
    services: &ServiceContainer,
    out: &mut dyn Write,
) -> CliResult<()> {
    let name = inv.param_name.as_deref().unwrap_or_default();
    let detail = services.job_service().parameter_detail(name)?;

    match &detail.kind {
        Some(kind) => writeln!(out, "{}\t{}", detail.name, kind)?,
        None => writeln!(out, "{}", detail.name)?,
    }
    if let Some(description) = &detail.description {
        writeln!(out, "{description}")?;
    }
    for value in &detail.values {
        if value.default {
            writeln!(out, "{}\tdefault", value.value)?;
        } else {
            writeln!(out, "{}", value.value)?;
        }
        if let Some(label) = &value.label {
            writeln!(out, "\t{label}")?;
        }
    }
    Ok(())
}

#[instrument(skip_all)]
fn _submit(inv: &Invocation, services: &ServiceContainer, out: &mut dyn Write) -> CliResult<()> {
    let outcome = services.job_service().submit_job(
        &inv.params,
        services.settings.email.as_deref(),
        inv.title.as_deref(),
        inv.async_mode,
        retrieval(inv),
        out,
    )?;

    match outcome {
        SubmitOutcome::Submitted { job_id } => writeln!(out, "{job_id}")?,
        SubmitOutcome::Completed { job_id, saved } => {
            if inv.output_level > 0 {
                output::note(&job_id);
            }
            report_saved(inv, &saved, out)?;
        }
        SubmitOutcome::Pending { job_id, status } => {
            if inv.output_level > 0 {
                output::note(&job_id);
            }
            output::warning(&format!(
                "job {job_id} is {status}; retrieve results later with: --polljob --jobid {job_id}"
            ));
        }
    }
    Ok(())
}

#[instrument(skip_all)]
fn _status(inv: &Invocation, services: &ServiceContainer, out: &mut dyn Write) -> CliResult<()> {
    let status = services.job_service().status(require_job_id(inv)?)?;
    writeln!(out, "{status}")?;
    Ok(())
}

#[instrument(skip_all)]
fn _result_types(
    inv: &Invocation,
    services: &ServiceContainer,
    out: &mut dyn Write,
) -> CliResult<()> {
    let types = services.job_service().result_types(require_job_id(inv)?)?;
    for result_type in &types {
        writeln!(out, "{}", result_type.identifier)?;
        let details = [
            &result_type.label,
            &result_type.description,
            &result_type.media_type,
            &result_type.file_suffix,
        ];
        for detail in details.into_iter().flatten() {
            writeln!(out, "\t{detail}")?;
        }
    }
    Ok(())
}

#[instrument(skip_all)]
fn _polljob(inv: &Invocation, services: &ServiceContainer, out: &mut dyn Write) -> CliResult<()> {
    let job_id = require_job_id(inv)?;
    let saved = services
        .job_service()
        .poll_results(job_id, retrieval(inv), out)?;
    report_saved(inv, &saved, out)
}

fn report_saved(inv: &Invocation, saved: &[SavedResult], out: &mut dyn Write) -> CliResult<()> {
    if inv.output_level <= 0 {
        return Ok(());
    }
    for result in saved {
        if let SavedResult::File { path, .. } = result {
            writeln!(out, "Wrote results to {}", path.display())?;
        }
    }
    Ok(())
}
