//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("option {option} requires a value")]
    MissingValue { option: String },

    #[error("invalid value '{value}' for {option}: {reason}")]
    InvalidValue {
        option: String,
        value: String,
        reason: String,
    },

    #[error("cannot write output")]
    Output(#[from] std::io::Error),
}

impl From<InfraError> for CliError {
    fn from(e: InfraError) -> Self {
        CliError::Application(e.into())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Every failure after argument splitting maps to the same code.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::MissingValue { .. }
            | CliError::InvalidValue { .. }
            | CliError::Output(_)
            | CliError::Application(_) => crate::exitcode::FAILURE,
        }
    }
}
