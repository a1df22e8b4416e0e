//! Shared test doubles for the job client and dispatcher

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use wise2dba::application::ApplicationResult;
use wise2dba::cli::commands::SettingsLoader;
use wise2dba::cli::Dispatcher;
use wise2dba::config::Settings;
use wise2dba::domain::{JobStatus, ParamDetail, ParamValue, ResultType, SubmitRequest};
use wise2dba::infrastructure::traits::{JobClient, RealFileSystem};
use wise2dba::infrastructure::{InfraError, InfraResult};

pub const JOB_ID: &str = "wise2dba-R20240101-000000-0001-1-p1m";
pub const EMAIL: &str = "tester@example.org";

/// Mock job client that records every call.
pub struct MockJobClient {
    calls: Mutex<Vec<String>>,
    submitted: Mutex<Vec<Vec<(&'static str, String)>>>,
    status: JobStatus,
    result_types: Vec<ResultType>,
    results: HashMap<String, Vec<u8>>,
    unavailable: bool,
}

impl MockJobClient {
    /// A client whose jobs are finished with an `out` and a `sequence` result.
    pub fn new() -> Self {
        let mut results = HashMap::new();
        results.insert("out".to_string(), b"DBA alignment\n".to_vec());
        results.insert("sequence".to_string(), b">a\nACGT\n".to_vec());
        Self {
            calls: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            status: JobStatus::Finished,
            result_types: vec![
                result_type("out", Some("txt")),
                result_type("sequence", Some("fa")),
            ],
            results,
            unavailable: false,
        }
    }

    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    /// A client whose every request fails with HTTP 503.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<Vec<(&'static str, String)>> {
        self.submitted.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> InfraResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.unavailable {
            return Err(InfraError::Status {
                url: "http://mock/".to_string(),
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(())
    }
}

pub fn result_type(identifier: &str, suffix: Option<&str>) -> ResultType {
    ResultType {
        identifier: identifier.to_string(),
        label: Some(format!("{identifier} label")),
        description: None,
        media_type: Some("text/plain".to_string()),
        file_suffix: suffix.map(str::to_string),
    }
}

impl JobClient for MockJobClient {
    fn submit(&self, request: &SubmitRequest<'_>) -> InfraResult<String> {
        self.record("submit".to_string())?;
        self.submitted.lock().unwrap().push(request.form_fields());
        Ok(JOB_ID.to_string())
    }

    fn status(&self, job_id: &str) -> InfraResult<JobStatus> {
        self.record(format!("status:{job_id}"))?;
        Ok(self.status.clone())
    }

    fn result_types(&self, job_id: &str) -> InfraResult<Vec<ResultType>> {
        self.record(format!("result_types:{job_id}"))?;
        Ok(self.result_types.clone())
    }

    fn result(&self, job_id: &str, type_id: &str) -> InfraResult<Vec<u8>> {
        self.record(format!("result:{job_id}:{type_id}"))?;
        Ok(self.results.get(type_id).cloned().unwrap_or_default())
    }

    fn parameters(&self) -> InfraResult<Vec<String>> {
        self.record("parameters".to_string())?;
        Ok(vec![
            "asequence".to_string(),
            "bsequence".to_string(),
            "para".to_string(),
            "pretty".to_string(),
        ])
    }

    fn parameter_detail(&self, name: &str) -> InfraResult<ParamDetail> {
        self.record(format!("parameter_detail:{name}"))?;
        if name == "asequence" {
            return Ok(ParamDetail {
                name: name.to_string(),
                kind: None,
                description: Some("First DNA sequence".to_string()),
                values: Vec::new(),
            });
        }
        Ok(ParamDetail {
            name: name.to_string(),
            kind: Some("BOOLEAN".to_string()),
            description: Some("Pretty ASCII alignment".to_string()),
            values: vec![
                ParamValue {
                    value: "true".to_string(),
                    label: Some("yes".to_string()),
                    default: true,
                },
                ParamValue {
                    value: "false".to_string(),
                    label: Some("no".to_string()),
                    default: false,
                },
            ],
        })
    }
}

pub fn settings_with_email() -> Settings {
    Settings {
        email: Some(EMAIL.to_string()),
        ..Settings::default()
    }
}

/// Dispatcher wired to a mock client; records the endpoint it was connected to.
pub fn dispatcher(
    settings: Settings,
    client: Arc<MockJobClient>,
) -> (Dispatcher, Arc<Mutex<Vec<String>>>) {
    dispatcher_with_loader(
        Box::new(move || -> ApplicationResult<Settings> { Ok(settings.clone()) }),
        client,
    )
}

/// Dispatcher whose settings come from `loader`.
pub fn dispatcher_with_loader(
    loader: Box<SettingsLoader>,
    client: Arc<MockJobClient>,
) -> (Dispatcher, Arc<Mutex<Vec<String>>>) {
    let endpoints = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&endpoints);
    let dispatcher = Dispatcher::with_deps(
        loader,
        Arc::new(RealFileSystem),
        Box::new(
            move |settings: &Settings| -> InfraResult<Arc<dyn JobClient>> {
                seen.lock().unwrap().push(settings.endpoint.clone());
                let client: Arc<dyn JobClient> = client.clone();
                Ok(client)
            },
        ),
    );
    (dispatcher, endpoints)
}

pub fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Run the dispatcher and capture what it writes to stdout.
pub fn run(dispatcher: &Dispatcher, list: &[&str]) -> (i32, String) {
    let mut out = Vec::new();
    let code = dispatcher.run(&args(list), &mut out);
    (code, String::from_utf8(out).expect("utf8 output"))
}
