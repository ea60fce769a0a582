use thiserror::Error;

use crate::types::{MetricType, RuleKey};

/// Authoring mistake in a threshold configuration. Terminal and
/// non-retryable; the caller decides whether to surface the message or fall
/// back to "no thresholds configured".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdConfigFormatError {
    #[error("Invalid threshold expression: \"{expression}\".")]
    InvalidExpression { expression: String },

    #[error("Range expressions are only supported for number metrics, got: \"{metric_type}\" metric for expression \"{expression}\"")]
    RangeNotSupported {
        metric_type: MetricType,
        expression: String,
    },

    #[error("Cannot parse range values {min} and {max} from expression: \"{expression}\"")]
    UnparseableRangeValues {
        min: String,
        max: String,
        expression: String,
    },

    #[error("Invalid range: minimum value ({min}) must be less than maximum value ({max})")]
    InvalidRangeOrder { min: f64, max: f64 },

    #[error("Cannot parse \"{value}\" as number from expression: \"{expression}\"")]
    UnparseableNumber { value: String, expression: String },

    #[error("Cannot parse \"{value}\" as boolean from expression: \"{expression}\". Use \"true\" or \"false\"")]
    UnparseableBoolean { value: String, expression: String },

    #[error("Invalid type for ThresholdConfig, must have a rules property that is an array")]
    InvalidConfigShape,

    #[error("Invalid threshold rule format \"{rule}\": must be an object with \"key\" and \"expression\" string properties")]
    InvalidRuleFormat { rule: String },

    #[error("Invalid threshold rule key \"{key}\": only supported values are \"error\", \"warning\", \"success\"")]
    InvalidRuleKey { key: String },

    #[error("Duplicate key detected for \"{key}\" with expression \"{expression}\"")]
    DuplicateRuleKey { key: RuleKey, expression: String },
}
