pub mod params;
pub mod catalog;

pub use params::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::types::RiskLevel;

/// Catalog templates every preset derives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyId {
    Conservative,
    Balanced,
    Aggressive,
    TrendFollowing,
    MeanReversion,
}

impl StrategyId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyId::Conservative => "conservative",
            StrategyId::Balanced => "balanced",
            StrategyId::Aggressive => "aggressive",
            StrategyId::TrendFollowing => "trendFollowing",
            StrategyId::MeanReversion => "meanReversion",
        }
    }

    pub fn all() -> [StrategyId; 5] {
        [
            StrategyId::Conservative,
            StrategyId::Balanced,
            StrategyId::Aggressive,
            StrategyId::TrendFollowing,
            StrategyId::MeanReversion,
        ]
    }

    /// Position of the template in `all()`.
    pub fn index(&self) -> usize {
        match self {
            StrategyId::Conservative => 0,
            StrategyId::Balanced => 1,
            StrategyId::Aggressive => 2,
            StrategyId::TrendFollowing => 3,
            StrategyId::MeanReversion => 4,
        }
    }

    /// Accepts the catalog keys case-insensitively, with or without separators.
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "conservative" => Some(StrategyId::Conservative),
            "balanced" => Some(StrategyId::Balanced),
            "aggressive" => Some(StrategyId::Aggressive),
            "trendfollowing" => Some(StrategyId::TrendFollowing),
            "meanreversion" => Some(StrategyId::MeanReversion),
            _ => None,
        }
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyPreset {
    pub id: String,
    pub base: StrategyId,
    pub name: String,
    pub description: String,
    pub risk_level: RiskLevel,
    pub expected_return: String,
    pub success_rate: String,
    pub params: ParamSet,
}

impl StrategyPreset {
    /// True for presets derived from a template rather than the template itself.
    pub fn is_custom(&self) -> bool {
        self.id != self.base.as_str()
    }

    /// Deep copy of `self` with a fresh id and the customization applied.
    pub fn customize(
        &self,
        customization: StrategyCustomization,
        ids: &dyn IdGenerator,
    ) -> StrategyPreset {
        let mut derived = self.clone();
        derived.id = ids.next_id();
        derived.name = customization.name;
        derived.description = customization.description;

        if let Some(params) = customization.params {
            derived.params = params;
        }
        if let Some(risk_level) = customization.risk_level {
            derived.risk_level = risk_level;
        }
        if let Some(expected_return) = customization.expected_return {
            derived.expected_return = expected_return;
        }
        if let Some(success_rate) = customization.success_rate {
            derived.success_rate = success_rate;
        }
        derived
    }

    pub fn to_freqtrade_config(&self) -> Value {
        let mut config = self.params.to_freqtrade_json();
        if let Value::Object(map) = &mut config {
            map.insert("strategy_id".to_string(), Value::String(self.id.clone()));
            map.insert("strategy_name".to_string(), Value::String(self.name.clone()));
        }
        config
    }
}

/// Overrides applied when deriving a preset from a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyCustomization {
    pub name: String,
    pub description: String,
    pub params: Option<ParamSet>,
    pub risk_level: Option<RiskLevel>,
    pub expected_return: Option<String>,
    pub success_rate: Option<String>,
}

impl StrategyCustomization {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            ..Self::default()
        }
    }

    pub fn with_params(mut self, params: ParamSet) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = Some(risk_level);
        self
    }

    pub fn with_expected_return(mut self, expected_return: &str) -> Self {
        self.expected_return = Some(expected_return.to_string());
        self
    }

    pub fn with_success_rate(mut self, success_rate: &str) -> Self {
        self.success_rate = Some(success_rate.to_string());
        self
    }
}

/// Source of synthetic ids for derived presets.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        format!("custom_{}", Uuid::new_v4().simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_strategy_id_parsing() {
        assert_eq!(StrategyId::from_str("trendFollowing"), Some(StrategyId::TrendFollowing));
        assert_eq!(StrategyId::from_str("mean-reversion"), Some(StrategyId::MeanReversion));
        assert_eq!(StrategyId::from_str("MEAN_REVERSION"), Some(StrategyId::MeanReversion));
        assert_eq!(StrategyId::from_str("scalper"), None);
        for id in StrategyId::all() {
            assert_eq!(StrategyId::from_str(id.as_str()), Some(id));
            assert_eq!(StrategyId::all()[id.index()], id);
        }
    }

    #[test]
    fn test_customize_uses_generated_id() {
        let mut ids = MockIdGenerator::new();
        ids.expect_next_id()
            .times(1)
            .returning(|| "custom_fixed".to_string());

        let template = catalog::get(StrategyId::Balanced);
        let derived = template.customize(
            StrategyCustomization::new("Modified Balanced Strategy", "Tweaked")
                .with_risk_level(RiskLevel::Low)
                .with_expected_return("10-20%"),
            &ids,
        );

        assert_eq!(derived.id, "custom_fixed");
        assert_eq!(derived.base, StrategyId::Balanced);
        assert_eq!(derived.name, "Modified Balanced Strategy");
        assert_eq!(derived.risk_level, RiskLevel::Low);
        assert_eq!(derived.expected_return, "10-20%");
        assert_eq!(derived.success_rate, template.success_rate);
        assert_eq!(derived.params, template.params);
        assert!(derived.is_custom());
        assert!(!template.is_custom());
    }

    #[test]
    fn test_customize_replaces_params_without_touching_template() {
        let template = catalog::get(StrategyId::Aggressive);
        let mut params = template.params.clone();
        params.stoploss = dec!(-0.2);

        let derived = template.customize(
            StrategyCustomization::new("Wide Stop", "Wider stoploss").with_params(params),
            &UuidIdGenerator,
        );

        assert_eq!(derived.params.stoploss, dec!(-0.2));
        assert_eq!(catalog::get(StrategyId::Aggressive).params.stoploss, dec!(-0.08));
    }

    #[test]
    fn test_uuid_ids_are_prefixed_and_distinct() {
        let a = UuidIdGenerator.next_id();
        let b = UuidIdGenerator.next_id();
        assert!(a.starts_with("custom_"));
        assert_eq!(a.len(), "custom_".len() + 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_freqtrade_config_carries_identity() {
        let config = catalog::get(StrategyId::Conservative).to_freqtrade_config();
        assert_eq!(config["strategy_id"], "conservative");
        assert_eq!(config["stoploss"], serde_json::json!(-0.03));
        assert_eq!(config["minimal_roi"]["30"], serde_json::json!(0.05));
        assert_eq!(config["freqai"]["model_training_parameters"]["n_estimators"], 400);
    }
}
