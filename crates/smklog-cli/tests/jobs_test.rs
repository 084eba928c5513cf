mod common;
use common::TestFixture;
use predicates::prelude::*;
use smklog_testing::Scenario;

#[test]
fn test_jobs_table() {
    let fixture = TestFixture::new();
    let log = fixture.sample_run();

    fixture
        .command()
        .arg("jobs")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("    ID  RULE   STATE      STARTED  DURATION"))
        .stdout(predicate::str::contains("     1  align  finished   0:00:04   0:00:16"))
        .stdout(predicate::str::contains("     2  align  failed     0:00:05"));
}

#[test]
fn test_jobs_json() {
    let fixture = TestFixture::new();
    let log = fixture.sample_run();

    let result = fixture.json(&["jobs", log.to_str().unwrap()]);
    let jobs = result["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0]["id"], 1);
    assert_eq!(jobs[0]["state"], "finished");
    assert_eq!(jobs[0]["duration"], "0:00:16");
    assert_eq!(jobs[1]["state"], "failed");
    assert_eq!(jobs[1]["duration"], "");
    assert_eq!(result["unknown_jobs"], serde_json::json!([]));
}

#[test]
fn test_jobs_lists_undescribed_jobs() {
    let fixture = TestFixture::new();
    let records = Scenario::new()
        .job_info(1, "align")
        .job_started(&[1, 7])
        .build();
    let log = fixture.write_records("run.log", &records, &[]);

    fixture
        .command()
        .arg("jobs")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("running"))
        .stdout(predicate::str::contains("Records for undescribed jobs: 7"));
}

#[test]
fn test_job_detail() {
    let fixture = TestFixture::new();
    let log = fixture.sample_run();

    fixture
        .command()
        .arg("job")
        .arg(&log)
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Job 1 (align) finished\n"))
        .stdout(predicate::str::contains("input      reads/A.fastq"))
        .stdout(predicate::str::contains("wildcards  sample=A"))
        .stdout(predicate::str::contains(
            "    bwa mem ref.fa reads/A.fastq > mapped/A.bam",
        ))
        .stdout(predicate::str::contains("Finished job 1."));
}

#[test]
fn test_job_detail_json_lists_records() {
    let fixture = TestFixture::new();
    let log = fixture.sample_run();

    let result = fixture.json(&["job", log.to_str().unwrap(), "2"]);
    assert_eq!(result["id"], 2);
    assert_eq!(result["state"], "failed");
    assert_eq!(result["threads"], 2);
    let events: Vec<&str> = result["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["event"].as_str().unwrap())
        .collect();
    assert_eq!(events, vec!["job_info", "job_started", "job_error"]);
}

#[test]
fn test_job_not_found() {
    let fixture = TestFixture::new();
    let log = fixture.sample_run();

    fixture
        .command()
        .arg("job")
        .arg(&log)
        .arg("9")
        .assert()
        .failure()
        .stderr("Error: Job 9 not found\n");
}
