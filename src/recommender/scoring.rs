use crate::strategies::{StrategyId, StrategyPreset};
use crate::types::{MarketState, RiskLevel, Trend, VolatilityLevel, VolumeLevel};

pub const MAX_SUITABILITY: u8 = 10;

/// How well a preset fits the market state, from 0 to 10.
pub fn suitability_score(strategy: &StrategyPreset, state: &MarketState) -> u8 {
    let score = risk_volatility_points(strategy.risk_level, state.volatility)
        + trend_points(strategy.base, state.trend)
        + volume_points(strategy.risk_level, state.volume);

    score.clamp(0, i32::from(MAX_SUITABILITY)) as u8
}

fn risk_volatility_points(risk_level: RiskLevel, volatility: VolatilityLevel) -> i32 {
    match (risk_level, volatility) {
        (RiskLevel::Low, VolatilityLevel::Low) => 3,
        (RiskLevel::Low, VolatilityLevel::Medium) => 2,
        (RiskLevel::Low, VolatilityLevel::High) => 1,
        (RiskLevel::Medium, VolatilityLevel::Medium) => 3,
        (RiskLevel::Medium, _) => 2,
        (RiskLevel::High, VolatilityLevel::Low) => 1,
        (RiskLevel::High, VolatilityLevel::Medium) => 2,
        (RiskLevel::High, VolatilityLevel::High) => 3,
    }
}

fn trend_points(base: StrategyId, trend: Trend) -> i32 {
    match base {
        StrategyId::TrendFollowing => {
            if trend.is_trending() {
                3
            } else {
                1
            }
        }
        StrategyId::MeanReversion => {
            if trend == Trend::Sideways {
                3
            } else {
                1
            }
        }
        StrategyId::Conservative => 2,
        StrategyId::Balanced | StrategyId::Aggressive => 0,
    }
}

fn volume_points(risk_level: RiskLevel, volume: VolumeLevel) -> i32 {
    match (volume, risk_level) {
        (VolumeLevel::High, RiskLevel::Medium | RiskLevel::High) => 1,
        (VolumeLevel::Low, RiskLevel::Low) => 1,
        _ => 0,
    }
}
