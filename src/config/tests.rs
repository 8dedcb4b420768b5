//! Tests for configuration parsing and validation.

use super::duration::parse_duration;
use super::*;
use std::time::Duration;

fn parse(yaml: &str) -> Config {
    serde_yaml::from_str(yaml).unwrap()
}

const VALID_YAML: &str = r#"
app:
  name: storefront
  env: test
  log_level: debug

api:
  base_url: http://localhost:8080
  timeout: 5s

pricing:
  default_vat_rate: "0.12"
  display_mode: incl

storage:
  enabled: true
  path: state.db
"#;

// ==================== Duration tests ====================

#[test]
fn test_parse_duration_units() {
    assert_eq!(parse_duration("10s").unwrap(), Duration::from_secs(10));
    assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
    assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
    assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
}

#[test]
fn test_parse_duration_bare_number_is_seconds() {
    assert_eq!(parse_duration("30").unwrap(), Duration::from_secs(30));
}

#[test]
fn test_parse_duration_empty_is_zero() {
    assert_eq!(parse_duration("").unwrap(), Duration::ZERO);
    assert_eq!(parse_duration("  ").unwrap(), Duration::ZERO);
}

#[test]
fn test_parse_duration_rejects_garbage() {
    assert!(parse_duration("10x").is_err());
    assert!(parse_duration("fast").is_err());
}

// ==================== Parsing tests ====================

#[test]
fn test_full_config_parses() {
    let config = parse(VALID_YAML);

    assert_eq!(config.app.name, "storefront");
    assert_eq!(config.api.base_url, "http://localhost:8080");
    assert_eq!(
        config.api.timeout_duration().unwrap(),
        Duration::from_secs(5)
    );

    let pricing = config.pricing.as_ref().unwrap();
    assert_eq!(pricing.display_mode.as_deref(), Some("incl"));

    let storage = config.storage.as_ref().unwrap();
    assert!(storage.enabled);
    assert_eq!(storage.path.as_deref(), Some("state.db"));
}

#[test]
fn test_minimal_config_parses() {
    let config = parse(
        r#"
app:
  name: storefront
  env: test
api:
  base_url: https://api.example.com
"#,
    );

    assert!(config.pricing.is_none());
    assert!(config.storage.is_none());
    // Unset timeout falls back to the default.
    assert_eq!(
        config.api.timeout_duration().unwrap(),
        Duration::from_secs(10)
    );
    config.validate().unwrap();
}

#[test]
fn test_token_never_comes_from_yaml() {
    let config = parse(VALID_YAML);
    assert_eq!(config.api.token, None);
}

// ==================== Validation tests ====================

#[test]
fn test_valid_config_passes() {
    parse(VALID_YAML).validate().unwrap();
}

#[test]
fn test_empty_app_name_fails() {
    let mut config = parse(VALID_YAML);
    config.app.name = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_non_http_base_url_fails() {
    let mut config = parse(VALID_YAML);
    config.api.base_url = "ftp://example.com".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_bad_timeout_fails() {
    let mut config = parse(VALID_YAML);
    config.api.timeout = Some("soon".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_negative_vat_rate_fails() {
    let mut config = parse(VALID_YAML);
    config.pricing.as_mut().unwrap().default_vat_rate = "-0.1".parse().unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_unknown_display_mode_fails() {
    let mut config = parse(VALID_YAML);
    config.pricing.as_mut().unwrap().display_mode = Some("gross".to_string());
    assert!(config.validate().is_err());
}
