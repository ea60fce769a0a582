//! Threshold expression grammar.
//!
//! An expression is either a comparison (`>=20`, `==true`) or an inclusive
//! numeric range (`10-50`). Parsing is type-directed: the metric's declared
//! type picks the value-parser strategy, the grammar itself is shared.

use crate::error::ThresholdConfigFormatError;
use crate::types::{MetricType, MetricValue};

/// Comparison operator token of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Gte,
    Lte,
    Gt,
    Lt,
    Eq,
    Ne,
}

impl ComparisonOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Gte => ">=",
            ComparisonOperator::Lte => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Eq => "==",
            ComparisonOperator::Ne => "!=",
        }
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed form of a threshold expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdExpression {
    Comparison {
        operator: ComparisonOperator,
        value: MetricValue,
    },
    /// Inclusive numeric range with strictly ordered bounds.
    Range { min: f64, max: f64 },
}

/// Strategy for turning the value text of a comparison into a typed value.
pub trait ValueParser {
    fn metric_type(&self) -> MetricType;
    fn supports_ranges(&self) -> bool;
    fn parse_value(
        &self,
        text: &str,
        expression: &str,
    ) -> Result<MetricValue, ThresholdConfigFormatError>;
}

pub struct NumberValueParser;

impl ValueParser for NumberValueParser {
    fn metric_type(&self) -> MetricType {
        MetricType::Number
    }

    fn supports_ranges(&self) -> bool {
        true
    }

    fn parse_value(
        &self,
        text: &str,
        expression: &str,
    ) -> Result<MetricValue, ThresholdConfigFormatError> {
        text.parse::<f64>().map(MetricValue::Number).map_err(|_| {
            ThresholdConfigFormatError::UnparseableNumber {
                value: text.to_string(),
                expression: expression.to_string(),
            }
        })
    }
}

pub struct BooleanValueParser;

impl ValueParser for BooleanValueParser {
    fn metric_type(&self) -> MetricType {
        MetricType::Boolean
    }

    fn supports_ranges(&self) -> bool {
        false
    }

    fn parse_value(
        &self,
        text: &str,
        expression: &str,
    ) -> Result<MetricValue, ThresholdConfigFormatError> {
        // Exact lowercase spellings only; "TRUE", "1", "yes" are rejected.
        match text {
            "true" => Ok(MetricValue::Boolean(true)),
            "false" => Ok(MetricValue::Boolean(false)),
            _ => Err(ThresholdConfigFormatError::UnparseableBoolean {
                value: text.to_string(),
                expression: expression.to_string(),
            }),
        }
    }
}

// Order matters: two-character tokens first, so ">=" is never read as ">"
// followed by "=...".
const COMPARISON_OPERATORS: &[(&str, ComparisonOperator)] = &[
    (">=", ComparisonOperator::Gte),
    ("<=", ComparisonOperator::Lte),
    ("==", ComparisonOperator::Eq),
    ("!=", ComparisonOperator::Ne),
    (">", ComparisonOperator::Gt),
    ("<", ComparisonOperator::Lt),
];

/// Parse a threshold expression for a metric of the given type.
///
/// Alternatives are tried in order, first match wins: range form, then
/// comparison form, then failure. Surrounding whitespace and whitespace
/// between operator and value are tolerated.
pub fn parse_expression(
    expression: &str,
    metric_type: MetricType,
) -> Result<ThresholdExpression, ThresholdConfigFormatError> {
    match metric_type {
        MetricType::Number => parse_with(&NumberValueParser, expression),
        MetricType::Boolean => parse_with(&BooleanValueParser, expression),
    }
}

/// Shared grammar, parameterized by the value-parser strategy.
pub fn parse_with<P: ValueParser>(
    parser: &P,
    expression: &str,
) -> Result<ThresholdExpression, ThresholdConfigFormatError> {
    let expression = expression.trim();

    if let Some((min_text, max_text)) = split_range(expression) {
        if !parser.supports_ranges() {
            return Err(ThresholdConfigFormatError::RangeNotSupported {
                metric_type: parser.metric_type(),
                expression: expression.to_string(),
            });
        }
        let (min, max) = match (min_text.parse::<f64>(), max_text.parse::<f64>()) {
            (Ok(min), Ok(max)) => (min, max),
            _ => {
                return Err(ThresholdConfigFormatError::UnparseableRangeValues {
                    min: min_text.to_string(),
                    max: max_text.to_string(),
                    expression: expression.to_string(),
                })
            }
        };
        // Equal bounds are invalid, not a single-point range.
        if min >= max {
            return Err(ThresholdConfigFormatError::InvalidRangeOrder { min, max });
        }
        return Ok(ThresholdExpression::Range { min, max });
    }

    for (token, operator) in COMPARISON_OPERATORS {
        if let Some(rest) = expression.strip_prefix(token) {
            let value_text = rest.trim();
            if value_text.is_empty() {
                // Lone operator; report the whole expression as invalid.
                break;
            }
            let value = parser.parse_value(value_text, expression)?;
            return Ok(ThresholdExpression::Comparison {
                operator: *operator,
                value,
            });
        }
    }

    Err(ThresholdConfigFormatError::InvalidExpression {
        expression: expression.to_string(),
    })
}

/// Split `min-max` into its bound texts. Both sides must look like plain
/// decimal numbers (digits and dots, no sign, no operator characters);
/// anything else is left for the comparison alternative.
fn split_range(expression: &str) -> Option<(&str, &str)> {
    let (min, max) = expression.split_once('-')?;
    let (min, max) = (min.trim(), max.trim());
    if is_range_bound(min) && is_range_bound(max) {
        Some((min, max))
    } else {
        None
    }
}

fn is_range_bound(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}
