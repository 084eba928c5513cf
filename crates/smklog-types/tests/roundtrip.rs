use smklog_testing::{example_records, example_records_snakemake};
use smklog_types::*;

#[test]
fn test_every_variant_round_trips_single_line() {
    for record in example_records() {
        let text = serde_json::to_string(&record).unwrap();
        assert!(!text.contains('\n'), "single-line encoding spans lines: {}", text);

        let decoded: Record = serde_json::from_str(&text)
            .unwrap_or_else(|err| panic!("failed to decode {}: {}", text, err));
        assert_eq!(decoded, record);
    }
}

#[test]
fn test_every_variant_round_trips_pretty() {
    for record in example_records() {
        let text = serde_json::to_string_pretty(&record).unwrap();
        assert!(text.starts_with("{\n"));
        assert!(text.ends_with("\n}"));

        let decoded: Record = serde_json::from_str(&text)
            .unwrap_or_else(|err| panic!("failed to decode {}: {}", text, err));
        assert_eq!(decoded, record);
    }
}

#[test]
fn test_examples_cover_every_registered_variant() {
    let covered: Vec<RecordKind> = example_records().iter().map(Record::kind).collect();
    for entry in registry().entries() {
        assert!(
            covered.contains(&entry.kind),
            "no example record for {}",
            entry.name
        );
    }
}

#[test]
fn test_snakemake_examples_report_associated_jobs() {
    let jobs: Vec<(String, Vec<i64>)> = example_records_snakemake()
        .iter()
        .filter(|record| !record.associated_jobs().is_empty())
        .map(|record| (record.kind().to_string(), record.associated_jobs()))
        .collect();

    assert_eq!(
        jobs,
        vec![
            ("snakemake/job_info".to_string(), vec![123]),
            ("snakemake/job_started".to_string(), vec![1, 2, 3]),
            ("snakemake/job_finished".to_string(), vec![123]),
            ("snakemake/shellcmd".to_string(), vec![123]),
            ("snakemake/job_error".to_string(), vec![123]),
            ("snakemake/group_info".to_string(), vec![56, 78]),
        ]
    );
}

#[test]
fn test_single_line_encoding() {
    let record: Record = ProgressRecord {
        base: RecordBase::new(level::INFO, Some("3 of 7 steps done".to_string()), 1.5),
        done: 3,
        total: 7,
    }
    .into();

    insta::assert_snapshot!(
        serde_json::to_string(&record).unwrap(),
        @r#"{"type":"snakemake","event":"progress","levelname":"INFO","message":"3 of 7 steps done","levelno":20,"created":1.5,"done":3,"total":7}"#
    );
}

#[test]
fn test_pretty_encoding_of_meta_record() {
    let record: Record = LoggingStartedRecord {
        base: RecordBase::new(
            level::INFO,
            Some("JSON logging plugin initialized".to_string()),
            2.25,
        ),
        pid: 4242,
        proc_started: None,
    }
    .into();

    insta::assert_snapshot!(serde_json::to_string_pretty(&record).unwrap(), @r#"
    {
      "type": "meta",
      "event": "logging_started",
      "levelname": "INFO",
      "message": "JSON logging plugin initialized",
      "levelno": 20,
      "created": 2.25,
      "pid": 4242,
      "proc_started": null
    }
    "#);
}

#[test]
fn test_exception_info_from_error() {
    let err = "x".parse::<i64>().unwrap_err();
    let info = ExceptionInfo::from_error(&err);
    assert_eq!(info.message, "invalid digit found in string");
    assert!(info.type_name.ends_with("ParseIntError"));

    let record: Record = StandardRecord::new(
        RecordBase::new(level::ERROR, Some("boom".to_string()), 3.0).with_exc_info(info.clone()),
    )
    .into();
    let decoded: Record = serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();
    assert_eq!(decoded.exc_info(), Some(&info));
}
