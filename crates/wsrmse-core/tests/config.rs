use std::collections::HashMap;
use std::path::PathBuf;

use wsrmse_core::config::{Config, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_PATH};
use wsrmse_core::outputs::OutputFormat;
use wsrmse_core::rmse::MAX_LEAD_CEILING;
use wsrmse_core::{BucketPolicy, PipelineError, MAX_LEAD};

#[test]
fn defaults_match_legacy_locations() {
    let config = Config::default();

    assert_eq!(config.input_dir, PathBuf::from(DEFAULT_INPUT_DIR));
    assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    assert_eq!(config.max_lead, MAX_LEAD);
    assert_eq!(config.bucket_policy, BucketPolicy::AllValues);
    assert_eq!(config.resolved_output_format(), OutputFormat::Json);
    config.validate().expect("defaults are valid");
}

#[test]
fn toml_file_overrides_selected_fields() {
    let config = Config::from_toml_str(
        r#"
input_dir = "/data/ws"
output_path = "/out/curve.csv"
bucket_policy = "distinct_values"
"#,
    )
    .expect("valid config");

    assert_eq!(config.input_dir, PathBuf::from("/data/ws"));
    assert_eq!(config.input_pattern, "*");
    assert_eq!(config.max_lead, 50);
    assert_eq!(config.bucket_policy, BucketPolicy::DistinctValues);
    assert_eq!(config.resolved_output_format(), OutputFormat::Csv);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = Config::from_toml_str("max_leed = 10").expect_err("typo must fail");
    assert!(matches!(err, PipelineError::Toml(_)));
}

#[test]
fn environment_overrides_file_values() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("WSRMSE_INPUT_DIR", "/env/in"),
        ("WSRMSE_MAX_LEAD", "24"),
        ("WSRMSE_OUTPUT_FORMAT", "csv"),
        ("WSRMSE_BUCKET_POLICY", "distinct"),
    ]);
    let mut config = Config::default();

    config
        .apply_env(|key| vars.get(key).map(|value| value.to_string()))
        .expect("env applies");

    assert_eq!(config.input_dir, PathBuf::from("/env/in"));
    assert_eq!(config.max_lead, 24);
    assert_eq!(config.output_format, Some(OutputFormat::Csv));
    assert_eq!(config.bucket_policy, BucketPolicy::DistinctValues);
}

#[test]
fn bad_environment_values_are_errors() {
    let mut config = Config::default();
    let err = config
        .apply_env(|key| (key == "WSRMSE_MAX_LEAD").then(|| "fifty".to_string()))
        .expect_err("non-numeric max lead");
    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn zero_max_lead_is_invalid() {
    let config = Config {
        max_lead: 0,
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn oversized_max_lead_from_env_is_invalid() {
    let mut config = Config::default();
    config
        .apply_env(|key| (key == "WSRMSE_MAX_LEAD").then(|| "4000000000".to_string()))
        .expect("value parses as u32");

    let err = config.validate().expect_err("max lead above the ceiling");
    assert!(matches!(err, PipelineError::Config(_)));

    let at_ceiling = Config {
        max_lead: MAX_LEAD_CEILING,
        ..Config::default()
    };
    at_ceiling.validate().expect("ceiling itself is allowed");
}
