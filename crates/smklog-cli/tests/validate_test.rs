mod common;
use common::{SAMPLE_WORKFLOW_ID, TestFixture};
use predicates::prelude::*;
use smklog_testing::{Scenario, render_log};

#[test]
fn test_validate_sample() {
    let fixture = TestFixture::new();
    let log = fixture.sample_run();

    fixture
        .command()
        .arg("validate")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("workflow_run.log: ok"))
        .stdout(predicate::str::contains("records:  13"))
        .stdout(predicate::str::contains("jobs:     2 (1 finished)"))
        .stdout(predicate::str::contains(format!("workflow: {}", SAMPLE_WORKFLOW_ID)))
        .stdout(predicate::str::contains("logging did not finish").not());
}

#[test]
fn test_validate_json() {
    let fixture = TestFixture::new();
    let records = Scenario::new()
        .logging_started(7)
        .job_info(3, "sort")
        .job_started(&[3])
        .build();
    let log = fixture.write_records("run.log", &records, &[1]);

    let result = fixture.json(&["validate", log.to_str().unwrap()]);
    assert_eq!(result["records"], 3);
    assert_eq!(result["jobs"], 1);
    assert_eq!(result["finished_jobs"], 0);
    assert_eq!(result["finished"], false);
    assert_eq!(result["workflow_id"], serde_json::Value::Null);
}

#[test]
fn test_validate_reports_parse_error_line() {
    let fixture = TestFixture::new();
    let records = Scenario::new().info("one").info("two").build();
    let mut text = render_log(&records, &[]).unwrap();
    text.push_str("not json\n");
    let log = fixture.write_log("broken.log", &text);

    fixture
        .command()
        .arg("validate")
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.log is not a valid log"))
        .stderr(predicate::str::contains(
            "line 3: expected an opening brace alone or a complete object",
        ));
}

#[test]
fn test_validate_reports_inconsistent_log() {
    let fixture = TestFixture::new();
    let records = Scenario::new()
        .job_info(1, "align")
        .job_finished(1)
        .job_finished(1)
        .build();
    let log = fixture.write_records("run.log", &records, &[]);

    fixture
        .command()
        .arg("validate")
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Inconsistent log: Duplicate job_finished event for job 1",
        ));
}

#[test]
fn test_validate_reports_unknown_field() {
    let fixture = TestFixture::new();
    let log = fixture.write_log(
        "extra.log",
        "{\"type\": \"standard\", \"message\": \"hi\", \"levelno\": 20, \"created\": 1.0, \"color\": \"red\"}\n",
    );

    fixture
        .command()
        .arg("validate")
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid record on line 1"))
        .stderr(predicate::str::contains("color"));
}
