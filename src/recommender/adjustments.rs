use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::strategies::{RoiLadder, StrategyPreset};
use crate::types::{MarketState, RiskLevel, Trend, VolatilityLevel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Number(Decimal),
    RoiLadder(RoiLadder),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Number(value) => write!(f, "{}", value),
            ParameterValue::RoiLadder(ladder) => {
                let steps: Vec<String> = ladder.iter().map(|(m, roi)| format!("{}m: {}", m, roi)).collect();
                write!(f, "{{{}}}", steps.join(", "))
            }
        }
    }
}

/// Advisory change to one preset parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterAdjustment {
    pub parameter: String,
    pub current_value: ParameterValue,
    pub recommended_value: ParameterValue,
    pub reason: String,
}

impl ParameterAdjustment {
    fn number(parameter: &str, current: Decimal, factor: Decimal, reason: &str) -> Option<Self> {
        let recommended = current.checked_mul(factor)?;
        Some(Self {
            parameter: parameter.to_string(),
            current_value: ParameterValue::Number(current),
            recommended_value: ParameterValue::Number(recommended),
            reason: reason.to_string(),
        })
    }

    fn ladder(current: &RoiLadder, factor: Decimal, reason: &str) -> Option<Self> {
        let recommended = current.scaled(factor)?;
        Some(Self {
            parameter: "minimal_roi".to_string(),
            current_value: ParameterValue::RoiLadder(current.clone()),
            recommended_value: ParameterValue::RoiLadder(recommended),
            reason: reason.to_string(),
        })
    }
}

/// Suggested parameter changes for `strategy` under `state`. The preset is left untouched.
pub fn parameter_adjustments(strategy: &StrategyPreset, state: &MarketState) -> Vec<ParameterAdjustment> {
    let params = &strategy.params;
    let wide_stoploss = dec!(-0.05);
    let mut candidates = Vec::with_capacity(4);

    // Stoploss
    if state.volatility == VolatilityLevel::High && params.stoploss > wide_stoploss {
        candidates.push(ParameterAdjustment::number(
            "stoploss",
            params.stoploss,
            dec!(1.2),
            "Increase stoploss to account for higher volatility",
        ));
    }
    if state.volatility == VolatilityLevel::Low && params.stoploss < wide_stoploss {
        candidates.push(ParameterAdjustment::number(
            "stoploss",
            params.stoploss,
            dec!(0.8),
            "Tighten stoploss in low volatility conditions",
        ));
    }

    // ROI ladder
    if state.trend == Trend::Uptrend && strategy.risk_level != RiskLevel::High {
        candidates.push(ParameterAdjustment::ladder(
            &params.minimal_roi,
            dec!(1.1),
            "Increase profit targets in uptrending market",
        ));
    }
    if state.trend == Trend::Downtrend {
        candidates.push(ParameterAdjustment::ladder(
            &params.minimal_roi,
            dec!(0.9),
            "Lower profit targets in downtrending market",
        ));
    }

    // Trailing stop
    if state.trend == Trend::Uptrend && params.trailing_stop {
        candidates.push(ParameterAdjustment::number(
            "trailing_stop_positive",
            params.trailing_stop_positive,
            dec!(1.2),
            "Increase trailing stop to capture more profit in uptrends",
        ));
    }

    let total = candidates.len();
    let adjustments: Vec<ParameterAdjustment> = candidates.into_iter().flatten().collect();
    if adjustments.len() < total {
        debug!("Dropped {} overflowing adjustments for {}", total - adjustments.len(), strategy.id);
    }
    adjustments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::{catalog, StrategyId};
    use crate::types::VolumeLevel;

    fn state(trend: Trend, volatility: VolatilityLevel) -> MarketState {
        MarketState::new(trend, volatility, VolumeLevel::Medium)
    }

    fn find<'a>(adjustments: &'a [ParameterAdjustment], parameter: &str) -> Option<&'a ParameterAdjustment> {
        adjustments.iter().find(|a| a.parameter == parameter)
    }

    #[test]
    fn test_high_volatility_widens_tight_stoploss() {
        let preset = catalog::get(StrategyId::MeanReversion);
        let adjustments = parameter_adjustments(preset, &state(Trend::Sideways, VolatilityLevel::High));
        assert_eq!(adjustments.len(), 1);
        let stop = &adjustments[0];
        assert_eq!(stop.parameter, "stoploss");
        assert_eq!(stop.current_value, ParameterValue::Number(dec!(-0.04)));
        assert_eq!(stop.recommended_value, ParameterValue::Number(dec!(-0.048)));
    }

    #[test]
    fn test_stoploss_at_limit_not_adjusted() {
        // Balanced sits exactly at -0.05
        let preset = catalog::get(StrategyId::Balanced);
        for volatility in VolatilityLevel::all() {
            let adjustments = parameter_adjustments(preset, &state(Trend::Sideways, volatility));
            assert!(find(&adjustments, "stoploss").is_none());
        }
    }

    #[test]
    fn test_low_volatility_tightens_wide_stoploss() {
        let preset = catalog::get(StrategyId::Aggressive);
        let adjustments = parameter_adjustments(preset, &state(Trend::Sideways, VolatilityLevel::Low));
        let stop = find(&adjustments, "stoploss").unwrap();
        assert_eq!(stop.recommended_value, ParameterValue::Number(dec!(-0.064)));
    }

    #[test]
    fn test_uptrend_raises_roi_and_trailing_stop() {
        let preset = catalog::get(StrategyId::Conservative);
        let adjustments = parameter_adjustments(preset, &state(Trend::Uptrend, VolatilityLevel::Medium));
        assert_eq!(adjustments.len(), 2);

        let roi = find(&adjustments, "minimal_roi").unwrap();
        assert_eq!(roi.current_value, ParameterValue::RoiLadder(preset.params.minimal_roi.clone()));
        let expected = RoiLadder::from_steps(&[(0, dec!(0.077)), (30, dec!(0.055)), (60, dec!(0.033))]);
        assert_eq!(roi.recommended_value, ParameterValue::RoiLadder(expected));

        let trailing = find(&adjustments, "trailing_stop_positive").unwrap();
        assert_eq!(trailing.recommended_value, ParameterValue::Number(dec!(0.006)));
    }

    #[test]
    fn test_high_risk_uptrend_keeps_roi() {
        let preset = catalog::get(StrategyId::Aggressive);
        let adjustments = parameter_adjustments(preset, &state(Trend::Uptrend, VolatilityLevel::Medium));
        assert!(find(&adjustments, "minimal_roi").is_none());
        let trailing = find(&adjustments, "trailing_stop_positive").unwrap();
        assert_eq!(trailing.recommended_value, ParameterValue::Number(dec!(0.024)));
    }

    #[test]
    fn test_downtrend_lowers_every_roi_step() {
        let preset = catalog::get(StrategyId::Balanced);
        let adjustments = parameter_adjustments(preset, &state(Trend::Downtrend, VolatilityLevel::Medium));
        let roi = find(&adjustments, "minimal_roi").unwrap();
        let expected = RoiLadder::from_steps(&[(0, dec!(0.09)), (20, dec!(0.063)), (40, dec!(0.036))]);
        assert_eq!(roi.recommended_value, ParameterValue::RoiLadder(expected));
    }

    #[test]
    fn test_adjustments_do_not_mutate_preset() {
        let preset = catalog::get(StrategyId::TrendFollowing).clone();
        for s in MarketState::all() {
            let _ = parameter_adjustments(&preset, &s);
        }
        assert_eq!(preset, StrategyId::TrendFollowing.template());
    }

    #[test]
    fn test_adjustment_serializes_as_plain_values() {
        let preset = catalog::get(StrategyId::MeanReversion);
        let adjustments = parameter_adjustments(preset, &state(Trend::Downtrend, VolatilityLevel::High));
        let json = serde_json::to_value(&adjustments).unwrap();
        assert_eq!(json[0]["parameter"], "stoploss");
        assert_eq!(json[0]["recommendedValue"], "-0.048");
        assert_eq!(json[1]["currentValue"]["20"], "0.05");
    }

    #[test]
    fn test_parameter_value_display() {
        assert_eq!(ParameterValue::Number(dec!(-0.048)).to_string(), "-0.048");
        let ladder = RoiLadder::from_steps(&[(0, dec!(0.05)), (30, dec!(0.02))]);
        assert_eq!(ParameterValue::RoiLadder(ladder).to_string(), "{0m: 0.05, 30m: 0.02}");
    }
}
