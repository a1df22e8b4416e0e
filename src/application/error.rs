//! Application-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::domain::JobStatus;
use crate::infrastructure::InfraError;

/// Application errors wrap infrastructure errors and add job-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error(transparent)]
    Infra(#[from] InfraError),

    #[error("no job id given, use --jobid <id>")]
    MissingJobId,

    #[error("an e-mail address is required to submit a job, use --email <address>")]
    MissingEmail,

    #[error("job {job_id} is not finished yet (status: {status})")]
    JobNotFinished { job_id: String, status: JobStatus },

    #[error("job {job_id} did not produce results (status: {status})")]
    JobFailed { job_id: String, status: JobStatus },

    #[error("job {job_id} has no result of format '{format}'")]
    NoMatchingResults { job_id: String, format: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
