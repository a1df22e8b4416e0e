//! Job service: submission, status, result retrieval and parameter introspection
//!
//! Every operation issues a fixed, small number of requests. A job that is
//! still running is reported as such; nothing here waits for it.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    expand_env_vars, InputParameters, JobStatus, ParamDetail, ResultType, SubmitRequest,
};
use crate::infrastructure::traits::{FileSystem, JobClient};

/// Output file base name that sends results to stdout.
pub const STDOUT_TARGET: &str = "-";

/// Where and which results to retrieve.
#[derive(Debug, Clone, Copy, Default)]
pub struct Retrieval<'a> {
    /// Base name for result files (default: job id, `-` for stdout)
    pub outfile: Option<&'a str>,
    /// Only retrieve the result type with this identifier
    pub outformat: Option<&'a str>,
}

/// A retrieved result and where it went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedResult {
    File { identifier: String, path: PathBuf },
    Stdout { identifier: String },
}

/// Outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Asynchronous submission; results are fetched later.
    Submitted { job_id: String },
    /// The job had finished by the time its status was checked.
    Completed {
        job_id: String,
        saved: Vec<SavedResult>,
    },
    /// The job was still queued or running when its status was checked.
    Pending { job_id: String, status: JobStatus },
}

/// Service for job operations against a [`JobClient`].
pub struct JobService {
    client: Arc<dyn JobClient>,
    fs: Arc<dyn FileSystem>,
}

impl JobService {
    pub fn new(client: Arc<dyn JobClient>, fs: Arc<dyn FileSystem>) -> Self {
        Self { client, fs }
    }

    /// Submit a job.
    ///
    /// Asynchronous submissions return right after the job id is known.
    /// Otherwise the job status is checked once: a finished job has its
    /// results retrieved, a failed one is an error, anything else is `Pending`.
    #[instrument(skip(self, params, retrieval, out))]
    pub fn submit_job(
        &self,
        params: &InputParameters,
        email: Option<&str>,
        title: Option<&str>,
        async_mode: bool,
        retrieval: Retrieval<'_>,
        out: &mut dyn Write,
    ) -> ApplicationResult<SubmitOutcome> {
        let email = email
            .filter(|e| !e.trim().is_empty())
            .ok_or(ApplicationError::MissingEmail)?;
        let request = SubmitRequest {
            email,
            title,
            params,
        };

        let job_id = self.client.submit(&request)?;
        info!(%job_id, "job submitted");

        if async_mode {
            return Ok(SubmitOutcome::Submitted { job_id });
        }

        let status = self.client.status(&job_id)?;
        debug!(%job_id, %status, "status after submission");
        if status.is_finished() {
            let saved = self.save_results(&job_id, retrieval, out)?;
            Ok(SubmitOutcome::Completed { job_id, saved })
        } else if status.is_failed() {
            Err(ApplicationError::JobFailed { job_id, status })
        } else {
            Ok(SubmitOutcome::Pending { job_id, status })
        }
    }

    #[instrument(skip(self))]
    pub fn status(&self, job_id: &str) -> ApplicationResult<JobStatus> {
        Ok(self.client.status(job_id)?)
    }

    #[instrument(skip(self))]
    pub fn result_types(&self, job_id: &str) -> ApplicationResult<Vec<ResultType>> {
        Ok(self.client.result_types(job_id)?)
    }

    /// Fetch and persist the results of a finished job.
    ///
    /// The status is checked once; a job that has not finished is an error.
    #[instrument(skip(self, retrieval, out))]
    pub fn poll_results(
        &self,
        job_id: &str,
        retrieval: Retrieval<'_>,
        out: &mut dyn Write,
    ) -> ApplicationResult<Vec<SavedResult>> {
        let status = self.client.status(job_id)?;
        debug!(%status, "current status");
        if status.is_failed() {
            return Err(ApplicationError::JobFailed {
                job_id: job_id.to_string(),
                status,
            });
        }
        if !status.is_finished() {
            return Err(ApplicationError::JobNotFinished {
                job_id: job_id.to_string(),
                status,
            });
        }
        self.save_results(job_id, retrieval, out)
    }

    #[instrument(skip(self))]
    pub fn parameters(&self) -> ApplicationResult<Vec<String>> {
        Ok(self.client.parameters()?)
    }

    #[instrument(skip(self))]
    pub fn parameter_detail(&self, name: &str) -> ApplicationResult<ParamDetail> {
        Ok(self.client.parameter_detail(name)?)
    }

    fn save_results(
        &self,
        job_id: &str,
        retrieval: Retrieval<'_>,
        out: &mut dyn Write,
    ) -> ApplicationResult<Vec<SavedResult>> {
        let selected: Vec<ResultType> = self
            .client
            .result_types(job_id)?
            .into_iter()
            .filter(|t| retrieval.outformat.map_or(true, |f| t.identifier == f))
            .collect();

        if let (true, Some(format)) = (selected.is_empty(), retrieval.outformat) {
            return Err(ApplicationError::NoMatchingResults {
                job_id: job_id.to_string(),
                format: format.to_string(),
            });
        }

        let base = match retrieval.outfile {
            Some(STDOUT_TARGET) => None,
            Some(outfile) => Some(expand_env_vars(outfile)),
            None => Some(job_id.to_string()),
        };

        let mut saved = Vec::with_capacity(selected.len());
        for result_type in &selected {
            let content = self.client.result(job_id, &result_type.identifier)?;
            debug!(identifier = %result_type.identifier, bytes = content.len(), "fetched result");
            let identifier = result_type.identifier.clone();

            match &base {
                None => {
                    out.write_all(&content)
                        .with_path_context("write result", Path::new("<stdout>"))?;
                    saved.push(SavedResult::Stdout { identifier });
                }
                Some(base) => {
                    let path = PathBuf::from(result_type.file_name(base));
                    self.fs
                        .ensure_parent(&path)
                        .with_path_context("create directory for", &path)?;
                    self.fs
                        .write(&path, &content)
                        .with_path_context("write result", &path)?;
                    saved.push(SavedResult::File { identifier, path });
                }
            }
        }
        Ok(saved)
    }
}
