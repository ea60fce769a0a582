use serde::{Deserialize, Serialize};
use std::fmt;

/// Value domain a metric produces. Decides which expression forms are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Number,
    Boolean,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Number => "number",
            MetricType::Boolean => "boolean",
        }
    }

    pub fn from_name(name: &str) -> Option<MetricType> {
        match name {
            "number" => Some(MetricType::Number),
            "boolean" => Some(MetricType::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete metric reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Boolean(bool),
}

impl MetricValue {
    pub fn metric_type(&self) -> MetricType {
        match self {
            MetricValue::Number(_) => MetricType::Number,
            MetricValue::Boolean(_) => MetricType::Boolean,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(v) => write!(f, "{}", v),
            MetricValue::Boolean(v) => write!(f, "{}", v),
        }
    }
}

/// Classification a matching rule assigns to a metric value.
/// Closed, case-sensitive set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKey {
    Error,
    Warning,
    Success,
}

impl RuleKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKey::Error => "error",
            RuleKey::Warning => "warning",
            RuleKey::Success => "success",
        }
    }

    pub fn from_name(name: &str) -> Option<RuleKey> {
        match name {
            "error" => Some(RuleKey::Error),
            "warning" => Some(RuleKey::Warning),
            "success" => Some(RuleKey::Success),
            _ => None,
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named rule as authored in configuration. The expression stays
/// raw here; it is re-parsed on every validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub key: RuleKey,
    pub expression: String,
}

/// The full rule set governing classification for one metric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub rules: Vec<ThresholdRule>,
}

/// Whether evaluation itself could run, independent of which rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationStatus {
    Success,
    Error,
}

/// Outcome of matching a metric value against a rule set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdResult {
    pub status: EvaluationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<RuleKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ThresholdResult {
    /// A rule matched; the metric is classified under its key.
    pub fn matched(key: RuleKey) -> Self {
        Self {
            status: EvaluationStatus::Success,
            evaluation: Some(key),
            error: None,
        }
    }

    /// Evaluation ran to completion but no rule matched the value.
    pub fn no_match() -> Self {
        Self {
            status: EvaluationStatus::Success,
            evaluation: None,
            error: None,
        }
    }

    /// Evaluation could not run (bad config, missing or mistyped value).
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: EvaluationStatus::Error,
            evaluation: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub metric_name: Option<String>,
    pub metric_type: MetricType,
    pub thresholds: serde_json::Value,
    pub value: Option<MetricValue>,
}
