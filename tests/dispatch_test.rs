//! Tests for the action dispatcher against a mock job client

mod common;

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use common::{
    dispatcher, dispatcher_with_loader, run, settings_with_email, MockJobClient, EMAIL, JOB_ID,
};
use rstest::rstest;
use wise2dba::application::{ApplicationError, ApplicationResult};
use wise2dba::cli::Invocation;
use wise2dba::config::Settings;
use wise2dba::domain::JobStatus;
use wise2dba::exitcode;

#[test]
fn given_no_arguments_when_running_then_prints_usage_and_succeeds() {
    // Arrange
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, endpoints) = dispatcher(settings_with_email(), client.clone());

    // Act
    let (code, out) = run(&dispatcher, &[]);

    // Assert
    assert_eq!(code, exitcode::OK);
    assert!(out.contains("Wise2DBA"));
    assert!(out.contains("--asequence"));
    assert!(client.calls().is_empty());
    assert!(endpoints.lock().unwrap().is_empty(), "no client for usage");
}

#[test]
fn given_help_when_running_then_prints_usage() {
    let (dispatcher, _) = dispatcher(settings_with_email(), Arc::new(MockJobClient::new()));

    let (code, out) = run(&dispatcher, &["-h"]);

    assert_eq!(code, exitcode::OK);
    assert!(out.contains("[General]"));
}

#[test]
fn given_version_when_running_then_prints_version_and_license() {
    let (dispatcher, _) = dispatcher(settings_with_email(), Arc::new(MockJobClient::new()));

    let (code, out) = run(&dispatcher, &["/version"]);

    assert_eq!(code, exitcode::OK);
    assert!(out.contains(wise2dba::CLIENT_VERSION));
    assert!(out.contains("Apache License"));
}

#[test]
fn given_unknown_option_when_running_then_exits_zero_without_client_calls() {
    // Arrange
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, endpoints) = dispatcher(settings_with_email(), client.clone());

    // Act
    let (code, out) = run(&dispatcher, &["--asequence", "ACGT", "--bogus"]);

    // Assert
    assert_eq!(code, exitcode::OK);
    assert!(out.is_empty());
    assert!(client.calls().is_empty(), "nothing must be submitted");
    assert!(endpoints.lock().unwrap().is_empty());
}

#[test]
fn given_param_detail_without_value_when_running_then_fails_with_code_2() {
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    let (code, _) = run(&dispatcher, &["--paramDetail"]);

    assert_eq!(code, exitcode::FAILURE);
    assert!(client.calls().is_empty());
}

#[test]
fn given_no_action_when_running_then_reports_unknown_action() {
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    let (code, _) = run(&dispatcher, &["--email", EMAIL, "--jobid", JOB_ID]);

    assert_eq!(code, exitcode::UNKNOWN_ACTION);
    assert!(client.calls().is_empty());
}

#[test]
fn given_invocation_without_action_when_dispatching_then_returns_unknown_action() {
    let (dispatcher, _) = dispatcher(settings_with_email(), Arc::new(MockJobClient::new()));
    let inv = Invocation {
        action: None,
        job_id: Some(JOB_ID.to_string()),
        ..Invocation::default()
    };
    let mut out = Vec::new();

    let code = dispatcher.dispatch(&inv, &mut out).unwrap();

    assert_eq!(code, exitcode::UNKNOWN_ACTION);
}

#[test]
fn given_params_when_running_then_lists_parameter_names() {
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    let (code, out) = run(&dispatcher, &["--params"]);

    assert_eq!(code, exitcode::OK);
    assert_eq!(out, "asequence\nbsequence\npara\npretty\n");
    assert_eq!(client.calls(), vec!["parameters"]);
}

#[test]
fn given_param_detail_when_running_then_prints_values_with_default_marker() {
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    let (code, out) = run(&dispatcher, &["/paramDetail", "pretty"]);

    assert_eq!(code, exitcode::OK);
    assert_eq!(
        out,
        "pretty\tBOOLEAN\nPretty ASCII alignment\ntrue\tdefault\n\tyes\nfalse\n\tno\n"
    );
    assert_eq!(client.calls(), vec!["parameter_detail:pretty"]);
}

#[test]
fn given_status_with_job_id_when_running_then_prints_status() {
    let client = Arc::new(MockJobClient::new().with_status(JobStatus::Running));
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    let (code, out) = run(&dispatcher, &["--status", "--jobid", JOB_ID]);

    assert_eq!(code, exitcode::OK);
    assert_eq!(out, "RUNNING\n");
    assert_eq!(client.calls(), vec![format!("status:{JOB_ID}")]);
}

#[test]
fn given_status_without_job_id_when_running_then_fails_with_code_2() {
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    let (code, _) = run(&dispatcher, &["--status"]);

    assert_eq!(code, exitcode::FAILURE);
    assert!(client.calls().is_empty());
}

#[test]
fn given_result_types_when_running_then_prints_identifiers_and_details() {
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    let (code, out) = run(&dispatcher, &["--resultTypes", "--jobid", JOB_ID]);

    assert_eq!(code, exitcode::OK);
    assert!(out.starts_with("out\n\tout label\n\ttext/plain\n\ttxt\n"));
    assert!(out.contains("sequence\n"));
}

#[test]
fn given_finished_job_when_polling_then_writes_result_files() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("results").join("dba");
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    // Act
    let (code, out) = run(
        &dispatcher,
        &["--polljob", "--jobid", JOB_ID, "--outfile", base.to_str().unwrap()],
    );

    // Assert
    assert_eq!(code, exitcode::OK);
    let out_file = temp.path().join("results").join("dba.out.txt");
    let seq_file = temp.path().join("results").join("dba.sequence.fa");
    assert_eq!(fs::read_to_string(&out_file).unwrap(), "DBA alignment\n");
    assert_eq!(fs::read_to_string(&seq_file).unwrap(), ">a\nACGT\n");
    assert!(out.contains("Wrote results to"));
}

#[test]
fn given_quiet_when_polling_then_does_not_report_written_files() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("dba");
    let (dispatcher, _) = dispatcher(settings_with_email(), Arc::new(MockJobClient::new()));

    let (code, out) = run(
        &dispatcher,
        &["--quiet", "--polljob", "--jobid", JOB_ID, "--outfile", base.to_str().unwrap()],
    );

    assert_eq!(code, exitcode::OK);
    assert!(out.is_empty());
    assert!(temp.path().join("dba.out.txt").exists());
}

#[test]
fn given_stdout_outfile_and_format_when_polling_then_writes_selected_result_to_output() {
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    let (code, out) = run(
        &dispatcher,
        &["--polljob", "--jobid", JOB_ID, "--outfile", "-", "--outformat", "out"],
    );

    assert_eq!(code, exitcode::OK);
    assert_eq!(out, "DBA alignment\n");
    assert!(!client
        .calls()
        .contains(&format!("result:{JOB_ID}:sequence")));
}

#[test]
fn given_unknown_outformat_when_polling_then_fails_with_code_2() {
    let (dispatcher, _) = dispatcher(settings_with_email(), Arc::new(MockJobClient::new()));

    let (code, _) = run(
        &dispatcher,
        &["--polljob", "--jobid", JOB_ID, "--outfile", "-", "--outformat", "xml"],
    );

    assert_eq!(code, exitcode::FAILURE);
}

#[test]
fn given_running_job_when_polling_then_fails_without_fetching_results() {
    let client = Arc::new(MockJobClient::new().with_status(JobStatus::Running));
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    let (code, _) = run(&dispatcher, &["--polljob", "--jobid", JOB_ID]);

    assert_eq!(code, exitcode::FAILURE);
    assert_eq!(client.calls(), vec![format!("status:{JOB_ID}")]);
}

#[test]
fn given_async_submission_when_running_then_prints_job_id_only() {
    // Arrange
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    // Act
    let (code, out) = run(
        &dispatcher,
        &["--async", "--asequence", "ACGTTGCA", "--bsequence", "ACGTAGCA", "--nopretty"],
    );

    // Assert
    assert_eq!(code, exitcode::OK);
    assert_eq!(out, format!("{JOB_ID}\n"));
    assert_eq!(client.calls(), vec!["submit"]);
    let fields = &client.submitted()[0];
    assert!(fields.contains(&("email", EMAIL.to_string())));
    assert!(fields.contains(&("asequence", "ACGTTGCA".to_string())));
    assert!(fields.contains(&("pretty", "false".to_string())));
    assert!(!fields.iter().any(|(k, _)| *k == "para"));
}

#[test]
fn given_sync_submission_of_finished_job_when_running_then_saves_results() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("run");
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    let (code, _) = run(
        &dispatcher,
        &[
            "--asequence",
            "ACGT",
            "--bsequence",
            "TGCA",
            "--outfile",
            base.to_str().unwrap(),
            "--outformat",
            "out",
        ],
    );

    assert_eq!(code, exitcode::OK);
    assert!(temp.path().join("run.out.txt").exists());
    assert_eq!(
        client.calls(),
        vec![
            "submit".to_string(),
            format!("status:{JOB_ID}"),
            format!("result_types:{JOB_ID}"),
            format!("result:{JOB_ID}:out"),
        ]
    );
}

#[test]
fn given_sync_submission_of_running_job_when_running_then_checks_status_once() {
    let client = Arc::new(MockJobClient::new().with_status(JobStatus::Queued));
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    let (code, out) = run(&dispatcher, &["--asequence", "ACGT", "--bsequence", "TGCA"]);

    assert_eq!(code, exitcode::OK);
    assert!(out.is_empty());
    assert_eq!(
        client.calls(),
        vec!["submit".to_string(), format!("status:{JOB_ID}")]
    );
}

#[test]
fn given_no_email_when_submitting_then_fails_without_submission() {
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, _) = dispatcher(Settings::default(), client.clone());

    let (code, _) = run(&dispatcher, &["--async", "--asequence", "ACGT"]);

    assert_eq!(code, exitcode::FAILURE);
    assert!(client.submitted().is_empty());
}

#[test]
fn given_email_option_when_submitting_then_overrides_configured_email() {
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, _) = dispatcher(settings_with_email(), client.clone());

    let (code, _) = run(
        &dispatcher,
        &["--async", "--email", "other@example.org", "--title", "t1", "--asequence", "A"],
    );

    assert_eq!(code, exitcode::OK);
    let fields = &client.submitted()[0];
    assert!(fields.contains(&("email", "other@example.org".to_string())));
    assert!(fields.contains(&("title", "t1".to_string())));
}

#[test]
fn given_endpoint_option_when_running_then_connects_to_that_endpoint() {
    let (dispatcher, endpoints) =
        dispatcher(settings_with_email(), Arc::new(MockJobClient::new()));

    let (code, _) = run(&dispatcher, &["/endpoint", "http://localhost:8080/rest", "/params"]);

    assert_eq!(code, exitcode::OK);
    assert_eq!(
        *endpoints.lock().unwrap(),
        vec!["http://localhost:8080/rest".to_string()]
    );
}

#[test]
fn given_unavailable_service_when_running_then_fails_with_code_2() {
    let (dispatcher, _) = dispatcher(settings_with_email(), Arc::new(MockJobClient::unavailable()));

    let (code, out) = run(&dispatcher, &["--status", "--jobid", JOB_ID]);

    assert_eq!(code, exitcode::FAILURE);
    assert!(out.is_empty());
}

#[test]
fn given_failed_job_when_polling_then_fails_with_code_2() {
    let client = Arc::new(MockJobClient::new().with_status(JobStatus::Failure));
    let (dispatcher, _) = dispatcher(settings_with_email(), client);

    let (code, _) = run(&dispatcher, &["--polljob", "--jobid", JOB_ID]);

    assert_eq!(code, exitcode::FAILURE);
}

fn broken_config() -> ApplicationResult<Settings> {
    Err(ApplicationError::Config {
        message: "parse wise2dba.toml: expected `]`".to_string(),
    })
}

#[rstest]
#[case(&[])]
#[case(&["--help"])]
#[case(&["--version"])]
#[case(&["--bogus"])]
#[case(&["--asequence", "ACGT", "/bogus"])]
fn given_broken_config_when_running_non_job_invocation_then_exits_zero(#[case] list: &[&str]) {
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, endpoints) = dispatcher_with_loader(Box::new(broken_config), client.clone());

    let (code, _) = run(&dispatcher, list);

    assert_eq!(code, exitcode::OK);
    assert!(client.calls().is_empty());
    assert!(endpoints.lock().unwrap().is_empty());
}

#[test]
fn given_broken_config_when_running_job_action_then_fails_with_code_2() {
    let client = Arc::new(MockJobClient::new());
    let (dispatcher, endpoints) = dispatcher_with_loader(Box::new(broken_config), client.clone());

    let (code, out) = run(&dispatcher, &["--params"]);

    assert_eq!(code, exitcode::FAILURE);
    assert!(out.is_empty());
    assert!(endpoints.lock().unwrap().is_empty(), "no client without settings");
}

#[test]
fn given_untyped_parameter_when_showing_detail_then_prints_bare_name() {
    let (dispatcher, _) = dispatcher(settings_with_email(), Arc::new(MockJobClient::new()));

    let (code, out) = run(&dispatcher, &["--paramDetail", "asequence"]);

    assert_eq!(code, exitcode::OK);
    assert_eq!(out, "asequence\nFirst DNA sequence\n");
}
