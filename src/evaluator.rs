//! Classification of a metric value against a validated rule set.

use serde_json::Value;
use tracing::debug;

use crate::parser::{parse_expression, ComparisonOperator, ThresholdExpression};
use crate::types::{MetricType, MetricValue, ThresholdResult};
use crate::validator::validate_config;

/// Evaluate a metric value against a raw rule set.
///
/// The rule set is validated first; a validation failure or a missing value
/// makes evaluation itself impossible and yields an error result. Otherwise
/// rules are tested in array order and the first match wins. Overlapping
/// rules are the config author's responsibility. A completed evaluation
/// where nothing matched is still a success, just without a classification.
pub fn evaluate(
    value: Option<MetricValue>,
    thresholds: &Value,
    metric_type: MetricType,
) -> ThresholdResult {
    let config = match validate_config(thresholds, metric_type) {
        Ok(config) => config,
        Err(err) => return ThresholdResult::failed(err.to_string()),
    };

    let Some(value) = value else {
        return ThresholdResult::failed(
            "Metric value is missing, thresholds cannot be evaluated",
        );
    };

    if value.metric_type() != metric_type {
        return ThresholdResult::failed(format!(
            "Expected a \"{}\" metric value, got \"{}\"",
            metric_type,
            value.metric_type()
        ));
    }

    for rule in &config.rules {
        // Cannot fail after validation, but the parser owns that judgement.
        let expression = match parse_expression(&rule.expression, metric_type) {
            Ok(expression) => expression,
            Err(err) => return ThresholdResult::failed(err.to_string()),
        };
        if expression_matches(&expression, value) {
            debug!(key = rule.key.as_str(), expression = %rule.expression, "threshold rule matched");
            return ThresholdResult::matched(rule.key);
        }
    }

    debug!("no threshold rule matched");
    ThresholdResult::no_match()
}

/// Test a single parsed expression against a value.
pub fn expression_matches(expression: &ThresholdExpression, value: MetricValue) -> bool {
    match (expression, value) {
        (
            ThresholdExpression::Comparison {
                operator,
                value: expected,
            },
            actual,
        ) => match (actual, expected) {
            (MetricValue::Number(actual), MetricValue::Number(expected)) => {
                compare(actual, *operator, *expected)
            }
            (MetricValue::Boolean(actual), MetricValue::Boolean(expected)) => {
                compare(actual, *operator, *expected)
            }
            _ => false,
        },
        (ThresholdExpression::Range { min, max }, MetricValue::Number(actual)) => {
            // Inclusive on both bounds
            *min <= actual && actual <= *max
        }
        (ThresholdExpression::Range { .. }, MetricValue::Boolean(_)) => false,
    }
}

fn compare<T: PartialOrd>(actual: T, operator: ComparisonOperator, expected: T) -> bool {
    match operator {
        ComparisonOperator::Gte => actual >= expected,
        ComparisonOperator::Lte => actual <= expected,
        ComparisonOperator::Gt => actual > expected,
        ComparisonOperator::Lt => actual < expected,
        ComparisonOperator::Eq => actual == expected,
        ComparisonOperator::Ne => actual != expected,
    }
}
