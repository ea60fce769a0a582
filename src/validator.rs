//! Structural and semantic validation of a threshold rule set.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::ThresholdConfigFormatError;
use crate::parser::parse_expression;
use crate::types::{MetricType, RuleKey, ThresholdConfig, ThresholdRule};

/// Validate a raw rule set (typically deserialized JSON from configuration
/// or an API response) against the metric's declared type.
///
/// Fails fast on the first violation: shape, per-rule format, key legality,
/// duplicate keys, then expression parseability, in array order. On success
/// the typed [`ThresholdConfig`] is returned; expressions stay raw and are
/// re-parsed at evaluation time.
pub fn validate_config(
    thresholds: &Value,
    expected_metric_type: MetricType,
) -> Result<ThresholdConfig, ThresholdConfigFormatError> {
    let raw_rules = thresholds
        .as_object()
        .and_then(|obj| obj.get("rules"))
        .and_then(|rules| rules.as_array())
        .ok_or(ThresholdConfigFormatError::InvalidConfigShape)?;

    let mut seen: HashSet<RuleKey> = HashSet::new();
    let mut rules = Vec::with_capacity(raw_rules.len());

    for raw_rule in raw_rules {
        let (key_text, expression) = raw_rule
            .as_object()
            .and_then(|obj| {
                let key = obj.get("key")?.as_str()?;
                let expression = obj.get("expression")?.as_str()?;
                Some((key, expression))
            })
            .ok_or_else(|| ThresholdConfigFormatError::InvalidRuleFormat {
                rule: raw_rule.to_string(),
            })?;

        let key = RuleKey::from_name(key_text).ok_or_else(|| {
            ThresholdConfigFormatError::InvalidRuleKey {
                key: key_text.to_string(),
            }
        })?;

        if !seen.insert(key) {
            return Err(ThresholdConfigFormatError::DuplicateRuleKey {
                key,
                expression: expression.to_string(),
            });
        }

        parse_expression(expression, expected_metric_type)?;
        rules.push(ThresholdRule {
            key,
            expression: expression.to_string(),
        });
    }

    Ok(ThresholdConfig { rules })
}
