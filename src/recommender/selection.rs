use crate::strategies::{StrategyCustomization, StrategyId};
use crate::types::{MarketState, RiskLevel, Trend, VolatilityLevel};

/// A derived preset to offer next to the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondaryPick {
    pub template: StrategyId,
    pub name: &'static str,
    pub description: &'static str,
}

impl SecondaryPick {
    const fn new(template: StrategyId, name: &'static str, description: &'static str) -> Self {
        Self {
            template,
            name,
            description,
        }
    }

    pub fn customization(&self) -> StrategyCustomization {
        StrategyCustomization::new(self.name, self.description)
    }
}

const MODIFIED_BALANCED: SecondaryPick = SecondaryPick::new(
    StrategyId::Balanced,
    "Modified Balanced Strategy",
    "A moderately conservative approach for uptrending markets.",
);

const CONSERVATIVE_MEAN_REVERSION: SecondaryPick = SecondaryPick::new(
    StrategyId::MeanReversion,
    "Conservative Mean Reversion",
    "Lower-risk mean reversion strategy for sideways markets.",
);

const VOLATILITY_ADJUSTED_CONSERVATIVE: SecondaryPick = SecondaryPick::new(
    StrategyId::Conservative,
    "Volatility-Adjusted Conservative",
    "Conservative approach for high volatility conditions.",
);

const LIMITED_AGGRESSIVE: SecondaryPick = SecondaryPick::new(
    StrategyId::Aggressive,
    "Limited Aggressive Approach",
    "Cautiously aggressive strategy for low volatility trending markets.",
);

const AGGRESSIVE_TREND_FOLLOWING: SecondaryPick = SecondaryPick::new(
    StrategyId::TrendFollowing,
    "Aggressive Trend Following",
    "High-octane trend following strategy for strong uptrends.",
);

const VOLATILITY_AWARE_BALANCED: SecondaryPick = SecondaryPick::new(
    StrategyId::Balanced,
    "Volatility-Aware Balanced",
    "More controlled approach for high volatility conditions.",
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub primary: StrategyId,
    pub secondaries: Vec<SecondaryPick>,
}

/// Picks the primary template and up to two derived secondaries for a risk level.
pub fn select_strategies(state: &MarketState, risk_level: RiskLevel) -> Selection {
    let mut secondaries = Vec::with_capacity(2);

    let primary = match risk_level {
        RiskLevel::Low => {
            if state.trend == Trend::Uptrend && state.volatility != VolatilityLevel::High {
                secondaries.push(MODIFIED_BALANCED);
            }
            if state.trend == Trend::Sideways {
                secondaries.push(CONSERVATIVE_MEAN_REVERSION);
            }
            StrategyId::Conservative
        }
        RiskLevel::Medium => {
            if state.volatility == VolatilityLevel::High {
                secondaries.push(VOLATILITY_ADJUSTED_CONSERVATIVE);
            }
            if state.volatility == VolatilityLevel::Low && state.trend.is_trending() {
                secondaries.push(LIMITED_AGGRESSIVE);
            }
            match state.trend {
                Trend::Uptrend => StrategyId::TrendFollowing,
                Trend::Sideways => StrategyId::MeanReversion,
                Trend::Downtrend => StrategyId::Balanced,
            }
        }
        RiskLevel::High => {
            if state.trend == Trend::Uptrend {
                secondaries.push(AGGRESSIVE_TREND_FOLLOWING);
            }
            if state.volatility == VolatilityLevel::High {
                secondaries.push(VOLATILITY_AWARE_BALANCED);
            }
            StrategyId::Aggressive
        }
    };

    Selection {
        primary,
        secondaries,
    }
}
