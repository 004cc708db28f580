/*!
 * Tests for application configuration
 */

use std::str::FromStr;

use anyhow::Result;
use sqlporter::app_config::{Config, TranslationEngineKind};

/// Test that the default config selects the remote engine and sane dialects
#[test]
fn test_default_shouldUseRemoteEngineAndDefaults() {
    let config = Config::default();

    assert_eq!(config.translation.engine, TranslationEngineKind::Remote);
    assert_eq!(config.source_dialect, "teradata");
    assert_eq!(config.target_dialect, "bigquery");
    assert!(config.macros_path.is_none());
    assert_eq!(config.translation.concurrent_requests, 4);
}

/// Test that a minimal JSON document picks up field defaults
#[test]
fn test_deserialize_withMinimalJson_shouldApplyDefaults() -> Result<()> {
    let json = r#"{
        "source_dialect": "oracle",
        "target_dialect": "bigquery",
        "translation": {}
    }"#;

    let config: Config = serde_json::from_str(json)?;
    assert_eq!(config.source_dialect, "oracle");
    assert_eq!(config.translation.engine, TranslationEngineKind::Remote);
    assert_eq!(config.translation.timeout_secs, 60);
    assert!(config.macros_path.is_none());

    Ok(())
}

/// Test that the macro map path round-trips through serialization
#[test]
fn test_serialize_withMacrosPath_shouldRoundTrip() -> Result<()> {
    let mut config = Config::default();
    config.macros_path = Some("macros.yaml".to_string());

    let json = serde_json::to_string(&config)?;
    let parsed: Config = serde_json::from_str(&json)?;
    assert_eq!(parsed.macros_path.as_deref(), Some("macros.yaml"));

    Ok(())
}

/// Test that an empty dialect fails validation
#[test]
fn test_validate_withEmptyDialect_shouldFail() {
    let mut config = Config::default();
    config.translation.api_key = "key".to_string();
    config.source_dialect = "  ".to_string();

    assert!(config.validate().is_err());
}

/// Test that identical source and target dialects fail validation
#[test]
fn test_validate_withSameDialects_shouldFail() {
    let mut config = Config::default();
    config.translation.api_key = "key".to_string();
    config.target_dialect = "Teradata".to_string();

    assert!(config.validate().is_err());
}

/// Test that the remote engine requires an API key
#[test]
fn test_validate_withRemoteEngineAndNoApiKey_shouldFail() {
    let config = Config::default();
    assert!(config.validate().is_err());
}

/// Test that the mock engine needs neither endpoint nor key
#[test]
fn test_validate_withMockEngine_shouldNotRequireApiKey() {
    let mut config = Config::default();
    config.translation.engine = TranslationEngineKind::Mock;
    config.translation.endpoint = String::new();

    assert!(config.validate().is_ok());
}

/// Test that zero concurrency is rejected
#[test]
fn test_validate_withZeroConcurrentRequests_shouldFail() {
    let mut config = Config::default();
    config.translation.engine = TranslationEngineKind::Mock;
    config.translation.concurrent_requests = 0;

    assert!(config.validate().is_err());
}

/// Test engine kind parsing and display
#[test]
fn test_engine_kind_fromStrAndDisplay_shouldRoundTrip() -> Result<()> {
    assert_eq!(
        TranslationEngineKind::from_str("remote")?,
        TranslationEngineKind::Remote
    );
    assert_eq!(
        TranslationEngineKind::from_str("MOCK")?,
        TranslationEngineKind::Mock
    );
    assert!(TranslationEngineKind::from_str("bogus").is_err());

    assert_eq!(TranslationEngineKind::Remote.to_string(), "remote");
    assert_eq!(TranslationEngineKind::Mock.display_name(), "Mock");

    Ok(())
}
