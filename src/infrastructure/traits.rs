//! I/O boundary traits for testability
//!
//! These traits abstract the remote job dispatcher and the local filesystem,
//! allowing services and the CLI dispatcher to be tested with mock implementations.

use std::io::{self, Read};
use std::path::Path;

use crate::domain::{JobStatus, ParamDetail, ResultType, SubmitRequest};
use crate::infrastructure::InfraResult;

/// Remote job dispatcher abstraction.
///
/// Every method is a single request; implementations never wait or retry.
pub trait JobClient: Send + Sync {
    /// Submit a job and return its identifier.
    fn submit(&self, request: &SubmitRequest<'_>) -> InfraResult<String>;

    /// Current status of a job.
    fn status(&self, job_id: &str) -> InfraResult<JobStatus>;

    /// Result renderings available for a finished job.
    fn result_types(&self, job_id: &str) -> InfraResult<Vec<ResultType>>;

    /// Raw content of one result rendering.
    fn result(&self, job_id: &str, type_id: &str) -> InfraResult<Vec<u8>>;

    /// Names of the tool's input parameters.
    fn parameters(&self) -> InfraResult<Vec<String>>;

    /// Description of one input parameter.
    fn parameter_detail(&self, name: &str) -> InfraResult<ParamDetail>;
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Read all of standard input.
    fn read_stdin(&self) -> io::Result<String>;

    /// Write bytes to file, replacing existing content.
    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read_stdin(&self) -> io::Result<String> {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        Ok(buf)
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
