use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Minimal-ROI ladder: elapsed minutes since entry mapped to the profit that
/// closes the trade. Values must shrink as the minutes grow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoiLadder(BTreeMap<u32, Decimal>);

impl RoiLadder {
    pub fn from_steps(steps: &[(u32, Decimal)]) -> Self {
        Self(steps.iter().copied().collect())
    }

    pub fn get(&self, minutes: u32) -> Option<Decimal> {
        self.0.get(&minutes).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Decimal)> + '_ {
        self.0.iter().map(|(m, roi)| (*m, *roi))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every rung multiplied by `factor`; `None` on overflow.
    pub fn scaled(&self, factor: Decimal) -> Option<RoiLadder> {
        self.0
            .iter()
            .map(|(m, roi)| roi.checked_mul(factor).map(|v| (*m, v)))
            .collect::<Option<BTreeMap<_, _>>>()
            .map(RoiLadder)
    }

    pub fn is_strictly_decreasing(&self) -> bool {
        self.0
            .values()
            .zip(self.0.values().skip(1))
            .all(|(earlier, later)| later < earlier)
    }

    fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(m, roi)| (m.to_string(), decimal_number(*roi)))
                .collect(),
        )
    }
}

/// Tunable trading parameters of a preset, in Freqtrade naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSet {
    pub minimal_roi: RoiLadder,
    pub stoploss: Decimal,
    pub trailing_stop: bool,
    pub trailing_stop_positive: Decimal,
    pub trailing_stop_positive_offset: Decimal,
    pub trailing_only_offset_is_reached: bool,
    pub freqai_conf: FreqaiConfig,
}

impl ParamSet {
    pub const FIELDS: [&'static str; 7] = [
        "minimal_roi",
        "stoploss",
        "trailing_stop",
        "trailing_stop_positive",
        "trailing_stop_positive_offset",
        "trailing_only_offset_is_reached",
        "freqai_conf",
    ];

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.stoploss >= Decimal::ZERO {
            errors.push("stoploss must be negative".to_string());
        }
        if self.minimal_roi.is_empty() {
            errors.push("minimal_roi must have at least one step".to_string());
        } else if !self.minimal_roi.is_strictly_decreasing() {
            errors.push("minimal_roi values must decrease as minutes increase".to_string());
        }
        if self.trailing_stop_positive < Decimal::ZERO {
            errors.push("trailing_stop_positive must be >= 0".to_string());
        }
        if self.trailing_stop_positive_offset < Decimal::ZERO {
            errors.push("trailing_stop_positive_offset must be >= 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Freqtrade config fragment with plain JSON numbers.
    pub fn to_freqtrade_json(&self) -> Value {
        let features = &self.freqai_conf.feature_parameters;
        let training = &self.freqai_conf.model_training_parameters;
        json!({
            "minimal_roi": self.minimal_roi.to_json(),
            "stoploss": decimal_number(self.stoploss),
            "trailing_stop": self.trailing_stop,
            "trailing_stop_positive": decimal_number(self.trailing_stop_positive),
            "trailing_stop_positive_offset": decimal_number(self.trailing_stop_positive_offset),
            "trailing_only_offset_is_reached": self.trailing_only_offset_is_reached,
            "freqai": {
                "enabled": true,
                "feature_parameters": {
                    "principale_component_analysis": features.principal_component_analysis,
                    "use_SVM_to_remove_outliers": features.use_svm_to_remove_outliers,
                    "DI_threshold": decimal_number(features.di_threshold),
                    "use_DBSCAN_to_remove_outliers": features.use_dbscan_to_remove_outliers,
                    "outlier_protection_percentage": features.outlier_protection_percentage,
                },
                "model_training_parameters": {
                    "n_estimators": training.n_estimators,
                    "learning_rate": decimal_number(training.learning_rate),
                    "max_depth": training.max_depth,
                    "verbosity": training.verbosity,
                    "boosting_type": training.boosting_type,
                },
            },
        })
    }
}

/// Model training block handed through to FreqAI untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreqaiConfig {
    pub feature_parameters: FeatureParameters,
    pub model_training_parameters: ModelTrainingParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureParameters {
    #[serde(rename = "principale_component_analysis")]
    pub principal_component_analysis: bool,
    #[serde(rename = "use_SVM_to_remove_outliers")]
    pub use_svm_to_remove_outliers: bool,
    #[serde(rename = "DI_threshold")]
    pub di_threshold: Decimal,
    #[serde(rename = "use_DBSCAN_to_remove_outliers")]
    pub use_dbscan_to_remove_outliers: bool,
    pub outlier_protection_percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTrainingParameters {
    pub n_estimators: u32,
    pub learning_rate: Decimal,
    pub max_depth: u32,
    pub verbosity: i32,
    pub boosting_type: String,
}

fn decimal_number(value: Decimal) -> Value {
    value
        .normalize()
        .to_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
