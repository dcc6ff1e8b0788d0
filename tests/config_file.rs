//! Integration tests for configuration loading
//!
//! Covers the generated template, the optional default path, and the error
//! context attached to each loading phase.

use sentiprobe::cli::generate_config_template;
use sentiprobe::config::Config;
use sentiprobe::error::AppError;
use sentiprobe::models::DEFAULT_CANDIDATES;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

/// Helper to create temporary directory for file operations
fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

#[test]
fn test_generated_template_loads_as_defaults() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("sentiprobe.toml");
    fs::write(&config_path, generate_config_template()).expect("Failed to write template");

    let config =
        Config::from_file(&config_path).expect("Generated template should load as valid Config");

    let ids: Vec<_> = config.models.candidates.iter().map(|c| c.as_str()).collect();
    assert_eq!(ids, DEFAULT_CANDIDATES);
    assert_eq!(config.api.request_timeout(), Duration::from_secs(30));
    assert_eq!(config.retry.cold_start_delay(), Duration::from_secs(10));
}

#[test]
fn test_missing_default_file_uses_defaults() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("absent.toml");

    let config = Config::load(&config_path, false).expect("defaults should be used");
    assert_eq!(config.models.candidates.len(), DEFAULT_CANDIDATES.len());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("absent.toml");

    let err = Config::load(&config_path, true).unwrap_err();
    match err {
        AppError::ConfigFileRead { path, .. } => assert!(path.ends_with("absent.toml")),
        other => panic!("expected ConfigFileRead, got {:?}", other),
    }
}

#[test]
fn test_parse_error_names_file() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(&config_path, "[api\nrequest_timeout_seconds = ").unwrap();

    let err = Config::from_file(&config_path).unwrap_err();
    assert!(matches!(err, AppError::ConfigParseFailed { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn test_validation_error_carries_reason() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("invalid.toml");
    fs::write(
        &config_path,
        r#"
[models]
candidates = []
"#,
    )
    .unwrap();

    let err = Config::from_file(&config_path).unwrap_err();
    match err {
        AppError::ConfigValidationFailed { reason, .. } => {
            assert!(reason.contains("at least one model"), "reason: {}", reason)
        }
        other => panic!("expected ConfigValidationFailed, got {:?}", other),
    }
}

#[test]
fn test_partial_file_overrides_only_given_fields() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("partial.toml");
    fs::write(
        &config_path,
        r#"
[retry]
cold_start_delay_seconds = 3

[observability]
log_level = "debug"
"#,
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(config.retry.cold_start_delay(), Duration::from_secs(3));
    assert_eq!(config.observability.log_level, "debug");
    assert_eq!(config.api.request_timeout_seconds, 30);
    assert_eq!(config.models.candidates.len(), DEFAULT_CANDIDATES.len());
}

#[test]
fn test_padded_candidate_ids_are_trimmed() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("padded.toml");
    fs::write(
        &config_path,
        r#"
[models]
candidates = [" org/model ", "\tother/model"]
"#,
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();
    let ids: Vec<_> = config.models.candidates.iter().map(|c| c.as_str()).collect();
    assert_eq!(ids, vec!["org/model", "other/model"]);
}

#[test]
fn test_blank_candidate_id_is_rejected() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("blank.toml");
    fs::write(
        &config_path,
        r#"
[models]
candidates = ["org/model", "   "]
"#,
    )
    .unwrap();

    let err = Config::from_file(&config_path).unwrap_err();
    assert!(matches!(err, AppError::ConfigParseFailed { .. }));
    assert!(err.to_string().contains("cannot be empty"), "got: {}", err);
}
