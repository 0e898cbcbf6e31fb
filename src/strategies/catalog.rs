use rust_decimal_macros::dec;
use std::sync::OnceLock;

use super::{
    FeatureParameters, FreqaiConfig, ModelTrainingParameters, ParamSet, RoiLadder, StrategyId,
    StrategyPreset,
};
use crate::types::RiskLevel;

static CATALOG: OnceLock<Vec<StrategyPreset>> = OnceLock::new();

/// The five canonical presets, in `StrategyId::all()` order.
pub fn all() -> &'static [StrategyPreset] {
    CATALOG.get_or_init(|| StrategyId::all().iter().map(|id| id.template()).collect())
}

pub fn get(id: StrategyId) -> &'static StrategyPreset {
    &all()[id.index()]
}

/// Looks a template up by its catalog key.
pub fn find(key: &str) -> Option<&'static StrategyPreset> {
    StrategyId::from_str(key).map(get)
}

impl StrategyId {
    pub fn name(&self) -> &str {
        match self {
            Self::Conservative => "Conservative Strategy",
            Self::Balanced => "Balanced Strategy",
            Self::Aggressive => "Aggressive Growth Strategy",
            Self::TrendFollowing => "Trend Following Strategy",
            Self::MeanReversion => "Mean Reversion Strategy",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Conservative =>
                "A low-risk strategy focusing on stable assets with strong fundamentals. \
                 Uses longer timeframes and tighter risk management.",
            Self::Balanced =>
                "A medium-risk strategy balancing risk and reward. \
                 Suitable for most market conditions with adaptive position sizing.",
            Self::Aggressive =>
                "A high-risk strategy targeting substantial returns. \
                 Uses shorter timeframes and more aggressive entry/exit conditions.",
            Self::TrendFollowing =>
                "A strategy that focuses on identifying and following established trends. \
                 Works best in trending markets with clear directional movement.",
            Self::MeanReversion =>
                "A strategy that capitalizes on price reversions to the mean. \
                 Effective in ranging markets with oscillating price movements.",
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        match self {
            Self::Conservative => RiskLevel::Low,
            Self::Balanced | Self::TrendFollowing | Self::MeanReversion => RiskLevel::Medium,
            Self::Aggressive => RiskLevel::High,
        }
    }

    pub fn expected_return(&self) -> &str {
        match self {
            Self::Conservative => "5-15%",
            Self::Balanced | Self::MeanReversion => "15-25%",
            Self::Aggressive => "25-40%",
            Self::TrendFollowing => "20-30%",
        }
    }

    pub fn success_rate(&self) -> &str {
        match self {
            Self::Conservative => "75-85%",
            Self::Balanced | Self::MeanReversion => "65-75%",
            Self::Aggressive => "55-65%",
            Self::TrendFollowing => "60-70%",
        }
    }

    /// Freshly built preset for this template.
    pub fn template(&self) -> StrategyPreset {
        StrategyPreset {
            id: self.as_str().to_string(),
            base: *self,
            name: self.name().to_string(),
            description: self.description().to_string(),
            risk_level: self.risk_level(),
            expected_return: self.expected_return().to_string(),
            success_rate: self.success_rate().to_string(),
            params: self.params(),
        }
    }

    pub fn params(&self) -> ParamSet {
        match self {
            // Longer holds, tight stop
            Self::Conservative => ParamSet {
                minimal_roi: RoiLadder::from_steps(&[
                    (0, dec!(0.07)),
                    (30, dec!(0.05)),
                    (60, dec!(0.03)),
                ]),
                stoploss: dec!(-0.03),
                trailing_stop: true,
                trailing_stop_positive: dec!(0.005),
                trailing_stop_positive_offset: dec!(0.025),
                trailing_only_offset_is_reached: true,
                freqai_conf: freqai(false, true, dec!(2), false, 30, 400, dec!(0.0025), 6),
            },
            Self::Balanced => ParamSet {
                minimal_roi: RoiLadder::from_steps(&[
                    (0, dec!(0.1)),
                    (20, dec!(0.07)),
                    (40, dec!(0.04)),
                ]),
                stoploss: dec!(-0.05),
                trailing_stop: true,
                trailing_stop_positive: dec!(0.01),
                trailing_stop_positive_offset: dec!(0.02),
                trailing_only_offset_is_reached: true,
                freqai_conf: freqai(true, true, dec!(1.5), false, 20, 600, dec!(0.005), 8),
            },
            // Short ladder, trails from the first tick
            Self::Aggressive => ParamSet {
                minimal_roi: RoiLadder::from_steps(&[
                    (0, dec!(0.15)),
                    (10, dec!(0.1)),
                    (20, dec!(0.05)),
                ]),
                stoploss: dec!(-0.08),
                trailing_stop: true,
                trailing_stop_positive: dec!(0.02),
                trailing_stop_positive_offset: dec!(0.03),
                trailing_only_offset_is_reached: false,
                freqai_conf: freqai(true, false, dec!(1.0), true, 10, 800, dec!(0.01), 10),
            },
            Self::TrendFollowing => ParamSet {
                minimal_roi: RoiLadder::from_steps(&[
                    (0, dec!(0.12)),
                    (30, dec!(0.06)),
                    (60, dec!(0.03)),
                ]),
                stoploss: dec!(-0.06),
                trailing_stop: true,
                trailing_stop_positive: dec!(0.015),
                trailing_stop_positive_offset: dec!(0.025),
                trailing_only_offset_is_reached: false,
                freqai_conf: freqai(true, true, dec!(1.2), false, 15, 700, dec!(0.007), 9),
            },
            Self::MeanReversion => ParamSet {
                minimal_roi: RoiLadder::from_steps(&[
                    (0, dec!(0.08)),
                    (20, dec!(0.05)),
                    (40, dec!(0.03)),
                ]),
                stoploss: dec!(-0.04),
                trailing_stop: true,
                trailing_stop_positive: dec!(0.01),
                trailing_stop_positive_offset: dec!(0.015),
                trailing_only_offset_is_reached: true,
                freqai_conf: freqai(false, true, dec!(1.8), true, 25, 500, dec!(0.0035), 7),
            },
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn freqai(
    pca: bool,
    svm_outliers: bool,
    di_threshold: rust_decimal::Decimal,
    dbscan_outliers: bool,
    outlier_protection_percentage: u32,
    n_estimators: u32,
    learning_rate: rust_decimal::Decimal,
    max_depth: u32,
) -> FreqaiConfig {
    FreqaiConfig {
        feature_parameters: FeatureParameters {
            principal_component_analysis: pca,
            use_svm_to_remove_outliers: svm_outliers,
            di_threshold,
            use_dbscan_to_remove_outliers: dbscan_outliers,
            outlier_protection_percentage,
        },
        model_training_parameters: ModelTrainingParameters {
            n_estimators,
            learning_rate,
            max_depth,
            verbosity: 0,
            boosting_type: "gbdt".to_string(),
        },
    }
}
