mod common;
use common::{SAMPLE_WORKFLOW_ID, TestFixture};
use predicates::prelude::*;
use smklog_testing::Scenario;

#[test]
fn test_show_prints_timeline() {
    let fixture = TestFixture::new();
    let log = fixture.sample_run();

    fixture
        .command()
        .arg("show")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Workflow {}", SAMPLE_WORKFLOW_ID)))
        .stdout(predicate::str::contains(
            " 0:00:03 i -               Building DAG of jobs...",
        ))
        .stdout(predicate::str::contains(
            " 0:00:25 E job_error       Error in rule align",
        ))
        .stdout(predicate::str::contains("run did not finish").not());
}

#[test]
fn test_show_filters_by_level() {
    let fixture = TestFixture::new();
    let log = fixture.sample_run();

    fixture
        .command()
        .args(["show", "--level", "warning"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Shutting down"))
        .stdout(predicate::str::contains("Error in rule align"))
        .stdout(predicate::str::contains("Building DAG").not());
}

#[test]
fn test_show_events_only() {
    let fixture = TestFixture::new();
    let log = fixture.sample_run();

    fixture
        .command()
        .args(["show", "--events-only"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains(" 0:00:06 i job_started     jobs 1,2"))
        .stdout(predicate::str::contains("Building DAG").not());
}

#[test]
fn test_show_json() {
    let fixture = TestFixture::new();
    let log = fixture.sample_run();
    let log = log.to_str().unwrap();

    let result = fixture.json(&["show", log]);
    assert_eq!(result["workflow_id"], SAMPLE_WORKFLOW_ID);
    assert_eq!(result["finished"], true);

    let records = result["records"].as_array().unwrap();
    assert_eq!(records.len(), 13);
    assert_eq!(records[0]["event"], "logging_started");
    assert_eq!(records[6]["jobs"], serde_json::json!([1, 2]));
    assert_eq!(records[9]["levelname"], "ERROR");

    let errors = fixture.json(&["show", "--level", "error", log]);
    let errors = errors["records"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["index"], 9);
}

#[test]
fn test_show_keeps_prefix_of_inconsistent_log() {
    let fixture = TestFixture::new();
    let records = Scenario::new()
        .info("Building DAG of jobs...")
        .job_info(1, "align")
        .job_info(1, "align")
        .build();
    let log = fixture.write_records("run.log", &records, &[1]);

    fixture
        .command()
        .arg("show")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Building DAG of jobs..."))
        .stdout(predicate::str::contains("run did not finish logging"))
        .stderr(predicate::str::contains("showing the first 2 records"))
        .stderr(predicate::str::contains("Duplicate job_info event for job 1"));
}

#[test]
fn test_show_empty_log() {
    let fixture = TestFixture::new();
    let log = fixture.write_log("empty.log", "");

    fixture
        .command()
        .arg("show")
        .arg(&log)
        .assert()
        .success()
        .stdout("No records.\n");
}

#[test]
fn test_show_missing_file_fails() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("show")
        .arg(fixture.root().join("absent.log"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: Failed to read"));
}

#[test]
fn test_partial_run_warning_follows_log_level() {
    let fixture = TestFixture::new();
    let records = Scenario::new()
        .job_info(1, "align")
        .job_info(1, "align")
        .build();
    let log = fixture.write_records("run.log", &records, &[]);

    fixture
        .command()
        .args(["--log-level", "error", "show"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("rule align"))
        .stderr(predicate::str::contains("showing the first").not());
}
