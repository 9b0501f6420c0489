use exact_numeric::RoundingMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_SCHEMA: &str = "exact-places/0.1";

/// Guard digits added at every level of an evaluation.
pub const GUARD_DIGITS: u32 = 2;

const MAX_GUARD_DIGITS: u32 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvalConfig {
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default = "default_guard_digits")]
    pub guard_digits: u32,
    #[serde(default)]
    pub rounding: RoundingMode,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            guard_digits: GUARD_DIGITS,
            rounding: RoundingMode::HalfUp,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EvalConfigError {
    #[error("read eval config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("eval config placeholder error: {0}")]
    Placeholder(String),
    #[error("eval config parse failed: {0}")]
    Parse(String),
    #[error("eval config validation failed: {0:?}")]
    Validation(Vec<String>),
}

/// Loads a JSON or YAML config. `${NAME}` placeholders are replaced from the
/// environment before decoding.
pub fn load_eval_config(path: &Path) -> Result<EvalConfig, EvalConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| EvalConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let expanded = expand_env_placeholders(raw.as_str())?;
    let config: EvalConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(expanded.as_str())
            .map_err(|error| EvalConfigError::Parse(format!("json decode error: {error}")))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(expanded.as_str())
            .map_err(|error| EvalConfigError::Parse(format!("yaml decode error: {error}")))?,
        _ => serde_yaml::from_str(expanded.as_str())
            .or_else(|_| serde_json::from_str(expanded.as_str()))
            .map_err(|error| EvalConfigError::Parse(error.to_string()))?,
    };

    let issues = validate_eval_config(&config);
    if !issues.is_empty() {
        return Err(EvalConfigError::Validation(issues));
    }
    tracing::debug!(
        path = %path.display(),
        guard_digits = config.guard_digits,
        rounding = ?config.rounding,
        "loaded eval config"
    );
    Ok(config)
}

pub fn validate_eval_config(config: &EvalConfig) -> Vec<String> {
    let mut issues = Vec::new();
    if config.schema != CONFIG_SCHEMA {
        issues.push(format!(
            "unsupported eval config schema `{}` (expected `{CONFIG_SCHEMA}`)",
            config.schema
        ));
    }
    if config.guard_digits == 0 {
        issues.push("guard_digits must be > 0".to_string());
    }
    if config.guard_digits > MAX_GUARD_DIGITS {
        issues.push(format!("guard_digits must be <= {MAX_GUARD_DIGITS}"));
    }
    issues
}

fn expand_env_placeholders(input: &str) -> Result<String, EvalConfigError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let end = after_open.find('}').ok_or_else(|| {
            EvalConfigError::Placeholder("unterminated placeholder `${...`".to_string())
        })?;
        let name = &after_open[..end];
        if name.is_empty() {
            return Err(EvalConfigError::Placeholder("empty placeholder `${}`".to_string()));
        }
        let value = std::env::var(name).map_err(|_| {
            EvalConfigError::Placeholder(format!("missing env var for `${{{name}}}`"))
        })?;
        out.push_str(value.as_str());
        rest = &after_open[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn default_schema() -> String {
    CONFIG_SCHEMA.to_string()
}

fn default_guard_digits() -> u32 {
    GUARD_DIGITS
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
