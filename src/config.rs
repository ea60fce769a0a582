use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;

use crate::types::{Config, MetricType, MetricValue};

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    let metric_type_raw = env
        .get_var("METRIC_TYPE")
        .ok_or_else(|| anyhow!("METRIC_TYPE env var must be set (number or boolean)"))?;
    let metric_type = MetricType::from_name(metric_type_raw.trim()).ok_or_else(|| {
        anyhow!(
            "Invalid METRIC_TYPE \"{}\", expected \"number\" or \"boolean\"",
            metric_type_raw
        )
    })?;

    let thresholds_raw = env
        .get_var("THRESHOLD_RULES")
        .ok_or_else(|| anyhow!("THRESHOLD_RULES env var must be set (JSON rule set)"))?;
    let thresholds: serde_json::Value =
        serde_json::from_str(&thresholds_raw).context("Invalid THRESHOLD_RULES")?;

    // An absent or empty value means the metric reading is unavailable;
    // the evaluator reports that as its own failure mode.
    let value = match env.get_var("METRIC_VALUE").filter(|v| !v.trim().is_empty()) {
        Some(raw) => Some(parse_metric_value(raw.trim(), metric_type)?),
        None => None,
    };

    let metric_name = env.get_var("METRIC_NAME").filter(|v| !v.is_empty());

    Ok(Config {
        metric_name,
        metric_type,
        thresholds,
        value,
    })
}

fn parse_metric_value(raw: &str, metric_type: MetricType) -> Result<MetricValue> {
    match metric_type {
        MetricType::Number => raw
            .parse::<f64>()
            .map(MetricValue::Number)
            .with_context(|| format!("Invalid METRIC_VALUE \"{}\" for a number metric", raw)),
        MetricType::Boolean => match raw {
            "true" => Ok(MetricValue::Boolean(true)),
            "false" => Ok(MetricValue::Boolean(false)),
            _ => Err(anyhow!(
                "Invalid METRIC_VALUE \"{}\" for a boolean metric, use \"true\" or \"false\"",
                raw
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_loading_with_env() {
        let env = MockEnvironment::new()
            .with_var("METRIC_NAME", "open-issues")
            .with_var("METRIC_TYPE", "number")
            .with_var(
                "THRESHOLD_RULES",
                r#"{"rules":[{"key":"error","expression":">=200"}]}"#,
            )
            .with_var("METRIC_VALUE", "42");

        let config = load_config_with_env(&env).unwrap();

        assert_eq!(config.metric_name, Some("open-issues".to_string()));
        assert_eq!(config.metric_type, MetricType::Number);
        assert_eq!(
            config.thresholds,
            json!({"rules": [{"key": "error", "expression": ">=200"}]})
        );
        assert_eq!(config.value, Some(MetricValue::Number(42.0)));
    }

    #[test]
    fn test_config_loading_boolean_metric() {
        let env = MockEnvironment::new()
            .with_var("METRIC_TYPE", "boolean")
            .with_var("THRESHOLD_RULES", r#"{"rules":[]}"#)
            .with_var("METRIC_VALUE", "true");

        let config = load_config_with_env(&env).unwrap();
        assert_eq!(config.metric_type, MetricType::Boolean);
        assert_eq!(config.value, Some(MetricValue::Boolean(true)));
        assert_eq!(config.metric_name, None);
    }

    #[test]
    fn test_config_loading_missing_value_is_not_an_error() {
        // The reading being unavailable is the evaluator's concern
        let env = MockEnvironment::new()
            .with_var("METRIC_TYPE", "number")
            .with_var("THRESHOLD_RULES", r#"{"rules":[]}"#);

        let config = load_config_with_env(&env).unwrap();
        assert_eq!(config.value, None);

        let env = MockEnvironment::new()
            .with_var("METRIC_TYPE", "number")
            .with_var("THRESHOLD_RULES", r#"{"rules":[]}"#)
            .with_var("METRIC_VALUE", "  ");
        let config = load_config_with_env(&env).unwrap();
        assert_eq!(config.value, None);
    }

    #[test]
    fn test_config_loading_missing_required() {
        let env = MockEnvironment::new().with_var("THRESHOLD_RULES", r#"{"rules":[]}"#);
        let result = load_config_with_env(&env);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("METRIC_TYPE"));

        let env = MockEnvironment::new().with_var("METRIC_TYPE", "number");
        let result = load_config_with_env(&env);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("THRESHOLD_RULES"));
    }

    #[test]
    fn test_config_loading_invalid_metric_type() {
        let env = MockEnvironment::new()
            .with_var("METRIC_TYPE", "string")
            .with_var("THRESHOLD_RULES", r#"{"rules":[]}"#);

        let result = load_config_with_env(&env);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("METRIC_TYPE"));
    }

    #[test]
    fn test_config_loading_invalid_rules_json() {
        let env = MockEnvironment::new()
            .with_var("METRIC_TYPE", "number")
            .with_var("THRESHOLD_RULES", "{not json");

        let result = load_config_with_env(&env);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("THRESHOLD_RULES"));
    }

    #[test]
    fn test_config_loading_invalid_metric_value() {
        let env = MockEnvironment::new()
            .with_var("METRIC_TYPE", "number")
            .with_var("THRESHOLD_RULES", r#"{"rules":[]}"#)
            .with_var("METRIC_VALUE", "not-a-number");
        assert!(load_config_with_env(&env).is_err());

        // Boolean readings follow the same exact-spelling rule as expressions
        let env = MockEnvironment::new()
            .with_var("METRIC_TYPE", "boolean")
            .with_var("THRESHOLD_RULES", r#"{"rules":[]}"#)
            .with_var("METRIC_VALUE", "TRUE");
        assert!(load_config_with_env(&env).is_err());
    }

    #[test]
    fn test_rules_json_is_kept_raw() {
        // Structurally broken rule sets still load; validation happens in
        // the engine so the caller can surface its message
        let env = MockEnvironment::new()
            .with_var("METRIC_TYPE", "number")
            .with_var("THRESHOLD_RULES", r#"{"rules":"x"}"#);

        let config = load_config_with_env(&env).unwrap();
        assert_eq!(config.thresholds, json!({"rules": "x"}));
    }
}
