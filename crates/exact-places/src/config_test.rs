use super::{load_eval_config, validate_eval_config, EvalConfig, EvalConfigError, GUARD_DIGITS};
use exact_numeric::RoundingMode;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[test]
fn default_config_uses_two_guard_digits_and_half_up() {
    let config = EvalConfig::default();
    assert_eq!(config.guard_digits, GUARD_DIGITS);
    assert_eq!(config.guard_digits, 2);
    assert_eq!(config.rounding, RoundingMode::HalfUp);
    assert!(validate_eval_config(&config).is_empty());
}

#[test]
fn load_eval_config_parses_yaml() {
    let path = write_temp_file(
        "yaml",
        "yaml",
        r#"
schema: exact-places/0.1
guard_digits: 4
rounding: half_even
"#,
    );
    let config = load_eval_config(path.as_path()).expect("config must load");
    assert_eq!(config.guard_digits, 4);
    assert_eq!(config.rounding, RoundingMode::HalfEven);
}

#[test]
fn load_eval_config_parses_json_with_defaults() {
    let path = write_temp_file("json", "json", r#"{"guard_digits": 3}"#);
    let config = load_eval_config(path.as_path()).expect("config must load");
    assert_eq!(config.guard_digits, 3);
    assert_eq!(config.rounding, RoundingMode::HalfUp);
    assert_eq!(config.schema, "exact-places/0.1");
}

#[test]
fn load_eval_config_falls_back_for_unknown_extension() {
    let path = write_temp_file("fallback", "conf", r#"{"rounding": "floor"}"#);
    let config = load_eval_config(path.as_path()).expect("config must load");
    assert_eq!(config.rounding, RoundingMode::Floor);
}

#[test]
fn load_eval_config_expands_env_placeholders() {
    std::env::set_var("EXACT_PLACES_TEST_GUARD", "5");
    let path = write_temp_file("env", "yaml", "guard_digits: ${EXACT_PLACES_TEST_GUARD}\n");
    let config = load_eval_config(path.as_path()).expect("config must load");
    assert_eq!(config.guard_digits, 5);
}

#[test]
fn load_eval_config_reports_missing_env_var() {
    let path = write_temp_file(
        "env-missing",
        "yaml",
        "guard_digits: ${EXACT_PLACES_TEST_UNSET_VARIABLE}\n",
    );
    let err = load_eval_config(path.as_path()).expect_err("must fail");
    assert!(matches!(err, EvalConfigError::Placeholder(_)), "{err}");
}

#[test]
fn load_eval_config_rejects_unknown_fields() {
    let path = write_temp_file("unknown", "json", r#"{"precision": 3}"#);
    let err = load_eval_config(path.as_path()).expect_err("must fail");
    assert!(matches!(err, EvalConfigError::Parse(_)), "{err}");
}

#[test]
fn load_eval_config_reports_validation_issues() {
    let path = write_temp_file(
        "invalid",
        "yaml",
        "schema: exact-places/9.9\nguard_digits: 0\n",
    );
    let err = load_eval_config(path.as_path()).expect_err("must fail");
    let EvalConfigError::Validation(issues) = err else {
        panic!("expected validation error");
    };
    assert_eq!(issues.len(), 2);
    assert!(issues[0].contains("exact-places/9.9"));
    assert!(issues[1].contains("guard_digits"));
}

#[test]
fn load_eval_config_reports_missing_file() {
    let mut path = std::env::temp_dir();
    path.push("exact-places-config-does-not-exist.yaml");
    let err = load_eval_config(path.as_path()).expect_err("must fail");
    assert!(matches!(err, EvalConfigError::ReadFile { .. }));
}

#[test]
fn validate_eval_config_caps_guard_digits() {
    let config = EvalConfig {
        guard_digits: 65,
        ..EvalConfig::default()
    };
    assert_eq!(validate_eval_config(&config).len(), 1);
}

fn write_temp_file(prefix: &str, extension: &str, content: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time must be monotonic")
        .as_nanos();
    path.push(format!(
        "exact-places-{prefix}-{}-{nanos}.{extension}",
        std::process::id()
    ));
    fs::write(&path, content).expect("must write temp file");
    path
}
