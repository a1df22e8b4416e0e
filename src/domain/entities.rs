//! Domain entities: core data structures

use std::fmt;

/// The single operation selected for an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Help,
    Version,
    ParamList,
    ParamDetail,
    Submit,
    Status,
    ResultTypes,
    PollJob,
    /// Parsing was aborted; nothing is dispatched.
    Exit,
}

/// Tool-specific submission payload.
///
/// `None` on the boolean switches means "not specified": the field is left
/// out of the submission and the service default applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputParameters {
    /// First DNA sequence to align
    pub asequence: Option<String>,
    /// Second DNA sequence to align
    pub bsequence: Option<String>,
    /// Display of parameters in output
    pub para: Option<bool>,
    /// Pretty ASCII alignment
    pub pretty: Option<bool>,
}

/// A complete job submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest<'a> {
    pub email: &'a str,
    pub title: Option<&'a str>,
    pub params: &'a InputParameters,
}

impl SubmitRequest<'_> {
    /// Form fields in submission order; unspecified fields are omitted.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("email", self.email.to_string())];
        if let Some(title) = self.title {
            fields.push(("title", title.to_string()));
        }
        if let Some(seq) = &self.params.asequence {
            fields.push(("asequence", seq.clone()));
        }
        if let Some(seq) = &self.params.bsequence {
            fields.push(("bsequence", seq.clone()));
        }
        if let Some(para) = self.params.para {
            fields.push(("para", para.to_string()));
        }
        if let Some(pretty) = self.params.pretty {
            fields.push(("pretty", pretty.to_string()));
        }
        fields
    }
}

/// Server-side state of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Running,
    Finished,
    Error,
    Failure,
    NotFound,
    /// Any status string the service reports that we do not model
    Other(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "QUEUED" => JobStatus::Queued,
            "RUNNING" => JobStatus::Running,
            "FINISHED" => JobStatus::Finished,
            "ERROR" => JobStatus::Error,
            "FAILURE" => JobStatus::Failure,
            "NOT_FOUND" => JobStatus::NotFound,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, JobStatus::Finished)
    }

    /// Terminal states from which no results will ever be produced.
    pub fn is_failed(&self) -> bool {
        matches!(
            self,
            JobStatus::Error | JobStatus::Failure | JobStatus::NotFound
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Queued => f.write_str("QUEUED"),
            JobStatus::Running => f.write_str("RUNNING"),
            JobStatus::Finished => f.write_str("FINISHED"),
            JobStatus::Error => f.write_str("ERROR"),
            JobStatus::Failure => f.write_str("FAILURE"),
            JobStatus::NotFound => f.write_str("NOT_FOUND"),
            JobStatus::Other(s) => f.write_str(s),
        }
    }
}

/// A result rendering offered by the service for a finished job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultType {
    pub identifier: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub media_type: Option<String>,
    pub file_suffix: Option<String>,
}

impl ResultType {
    /// Output file name: `<base>.<identifier>.<suffix>`.
    pub fn file_name(&self, base: &str) -> String {
        let suffix = self.file_suffix.as_deref().unwrap_or("txt");
        format!("{}.{}.{}", base, self.identifier, suffix)
    }
}

/// Description of one input parameter of the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDetail {
    pub name: String,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub values: Vec<ParamValue>,
}

/// An allowed value of a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamValue {
    pub value: String,
    pub label: Option<String>,
    pub default: bool,
}

/// Expand environment variables in a path string.
///
/// Supports `$VAR`, `${VAR}` and `~`. Unresolvable input is returned as is.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
