//! Integration tests for normalisation through the public API

use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wpt_runner::options::{BaseDirResolver, StdFileSystem};
use wpt_runner::testing::{assert_defaults, assert_key_count, assert_normalised, assert_test_names};
use wpt_runner::{Normaliser, Options, SourceKind, SourceStatus, WptError};

fn normaliser(temp: &TempDir) -> Normaliser {
    Normaliser::new(StdFileSystem, BaseDirResolver::new(temp.path()))
}

#[test]
fn test_layers_flags_config_tests_and_defaults() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".wptrc"),
        r#"{"uri":"https://wpt.example.com","location":"London_EC2:Firefox","connection":"3G"}"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("tests.json"),
        r#"{"home":"https://example.com/"}"#,
    )
    .unwrap();

    let mut options = Options::new();
    options.insert("connection", "Cable");

    let sources = normaliser(&temp)
        .normalise_with_sources(&mut options)
        .unwrap();

    assert_normalised(&options);
    assert_eq!(options.connection(), Some("Cable"));
    assert_eq!(options.location(), Some("London_EC2:Firefox"));
    assert_eq!(options.runs(), Some(9));
    assert_test_names(&options, &["home", "uri"]);

    assert_eq!(sources.loaded_count(), 2);
    assert_eq!(
        sources.get(SourceKind::Config).unwrap().path,
        temp.path().join(".wptrc")
    );
}

#[test]
fn test_second_pass_changes_nothing() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".wptrc"), r#"{"key":"abc"}"#).unwrap();

    let normaliser = normaliser(&temp);
    let mut options = Options::new();
    normaliser.normalise(&mut options).unwrap();
    let first = options.clone();

    // Changing the files on disk must not leak into a normalised object
    fs::write(temp.path().join(".wptrc"), r#"{"key":"changed"}"#).unwrap();
    let sources = normaliser.normalise_with_sources(&mut options).unwrap();

    assert_eq!(options, first);
    assert!(sources.is_empty());
}

#[test]
fn test_missing_files_fall_back_to_defaults() {
    let temp = TempDir::new().unwrap();
    let sources = {
        let mut options = Options::new();
        let sources = normaliser(&temp)
            .normalise_with_sources(&mut options)
            .unwrap();
        assert_defaults(&options);
        assert_key_count(&options, 5);
        sources
    };

    assert_eq!(sources.len(), 2);
    assert_eq!(
        sources.get(SourceKind::Tests).unwrap().status,
        SourceStatus::Missing
    );
}

#[test]
fn test_tests_path_from_config_file() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("suites")).unwrap();
    fs::write(
        temp.path().join(".wptrc"),
        r#"{"tests":"suites/smoke.json"}"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("suites/smoke.json"),
        r#"{"smoke":"https://example.com/"}"#,
    )
    .unwrap();

    let mut options = Options::new();
    normaliser(&temp).normalise(&mut options).unwrap();

    assert_test_names(&options, &["smoke"]);
}

#[test]
fn test_normalise_value_rejects_non_objects() {
    let temp = TempDir::new().unwrap();
    let normaliser = normaliser(&temp);

    assert!(matches!(
        normaliser.normalise_value(serde_json::Value::Null),
        Err(WptError::MissingOptions)
    ));
    assert!(matches!(
        normaliser.normalise_value(json!("location")),
        Err(WptError::InvalidOptions { found: "a string" })
    ));
}

#[test]
fn test_malformed_tests_file_names_path() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("tests.json"), "{ nope").unwrap();

    let err = normaliser(&temp)
        .normalise_value(json!({}))
        .unwrap_err();

    assert!(err.is_source_error());
    assert!(err.to_string().contains("tests.json"));
}
