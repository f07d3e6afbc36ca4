use std::fs;

use tempfile::tempdir;

use wsrmse_core::ingestion::{discover_input_files, ingest_files, FileInput};
use wsrmse_core::PipelineError;

fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../wsrmse-parser/tests/data")
        .join(name);
    std::fs::read_to_string(path).expect("read fixture")
}

#[test]
fn ingestion_merges_every_file() {
    let json = fixture("wsdata_2013_01_01.json");
    let toml = fixture("wsdata_2013_01_02.toml");
    let inputs = [
        FileInput {
            path: "wsdata_2013_01_01.json",
            contents: json.as_bytes(),
        },
        FileInput {
            path: "wsdata_2013_01_02.toml",
            contents: toml.as_bytes(),
        },
    ];

    let batch = ingest_files(&inputs).expect("ingestion succeeds");

    assert_eq!(batch.observations.len(), 4);
    assert_eq!(batch.forecasts.len(), 4);
    assert_eq!(batch.reports.len(), 2);
    assert_eq!(batch.reports[0].format, "json_batch");
    assert_eq!(batch.reports[1].format, "toml_batch");
    assert_eq!(batch.reports[0].hash.len(), 64);
}

#[test]
fn identical_files_are_flagged_but_merged() {
    let json = fixture("wsdata_2013_01_01.json");
    let inputs = [
        FileInput {
            path: "first.json",
            contents: json.as_bytes(),
        },
        FileInput {
            path: "copy.json",
            contents: json.as_bytes(),
        },
    ];

    let batch = ingest_files(&inputs).expect("ingestion succeeds");

    assert_eq!(batch.forecasts.len(), 6);
    assert_eq!(batch.reports[0].duplicate_of, None);
    assert_eq!(batch.reports[1].duplicate_of.as_deref(), Some("first.json"));
    assert_eq!(batch.reports[0].hash, batch.reports[1].hash);
}

#[test]
fn invalid_utf8_is_fatal() {
    let inputs = [FileInput {
        path: "binary.dat",
        contents: &[0xff, 0xfe, 0x00],
    }];

    let err = ingest_files(&inputs).expect_err("binary input must fail");
    assert!(matches!(err, PipelineError::Encoding { ref path } if path == "binary.dat"));
}

#[test]
fn parse_failure_names_the_file() {
    let good = fixture("wsdata_2013_01_01.json");
    let inputs = [
        FileInput {
            path: "good.json",
            contents: good.as_bytes(),
        },
        FileInput {
            path: "broken.json",
            contents: b"{ \"weatherForecasts\": 3 }",
        },
    ];

    let err = ingest_files(&inputs).expect_err("broken file must fail");
    assert!(matches!(err, PipelineError::Parse { ref path, .. } if path == "broken.json"));
}

#[test]
fn discovery_is_sorted_and_skips_directories() {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join("b.json"), "{}").unwrap();
    fs::write(dir.path().join("a.json"), "{}").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    fs::create_dir(dir.path().join("c.json")).unwrap();

    let all = discover_input_files(dir.path(), "*").expect("discover all");
    let names: Vec<String> = all
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.json", "b.json", "notes.txt"]);

    let json_only = discover_input_files(dir.path(), "*.json").expect("discover json");
    assert_eq!(json_only.len(), 2);
}

#[test]
fn discovery_of_missing_directory_is_empty() {
    let dir = tempdir().expect("temp dir");
    let files = discover_input_files(&dir.path().join("nope"), "*").expect("no error");
    assert!(files.is_empty());
}
