use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Uptrend,
    Downtrend,
    #[default]
    Sideways,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Uptrend => "uptrend",
            Trend::Downtrend => "downtrend",
            Trend::Sideways => "sideways",
        }
    }

    pub fn all() -> [Trend; 3] {
        [Trend::Uptrend, Trend::Downtrend, Trend::Sideways]
    }

    pub fn is_trending(&self) -> bool {
        !matches!(self, Trend::Sideways)
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl VolatilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityLevel::Low => "low",
            VolatilityLevel::Medium => "medium",
            VolatilityLevel::High => "high",
        }
    }

    pub fn all() -> [VolatilityLevel; 3] {
        [VolatilityLevel::Low, VolatilityLevel::Medium, VolatilityLevel::High]
    }
}

impl fmt::Display for VolatilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeLevel {
    Low,
    #[default]
    Medium,
    High,
    /// The candles carry no volume information.
    Unknown,
}

impl VolumeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeLevel::Low => "low",
            VolumeLevel::Medium => "medium",
            VolumeLevel::High => "high",
            VolumeLevel::Unknown => "unknown",
        }
    }

    pub fn all() -> [VolumeLevel; 4] {
        [
            VolumeLevel::Low,
            VolumeLevel::Medium,
            VolumeLevel::High,
            VolumeLevel::Unknown,
        ]
    }
}

impl fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bucketed view of the market over the analysed candle window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketState {
    pub trend: Trend,
    pub volatility: VolatilityLevel,
    pub volume: VolumeLevel,
}

impl MarketState {
    pub fn new(trend: Trend, volatility: VolatilityLevel, volume: VolumeLevel) -> Self {
        Self {
            trend,
            volatility,
            volume,
        }
    }

    /// Every trend/volatility/volume combination.
    pub fn all() -> Vec<MarketState> {
        let mut states = Vec::with_capacity(36);
        for trend in Trend::all() {
            for volatility in VolatilityLevel::all() {
                for volume in VolumeLevel::all() {
                    states.push(MarketState::new(trend, volatility, volume));
                }
            }
        }
        states
    }
}

impl fmt::Display for MarketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "trend={} volatility={} volume={}",
            self.trend, self.volatility, self.volume
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = MarketState::default();
        assert_eq!(state.trend, Trend::Sideways);
        assert_eq!(state.volatility, VolatilityLevel::Medium);
        assert_eq!(state.volume, VolumeLevel::Medium);
    }

    #[test]
    fn test_all_states_cover_every_combination() {
        let states = MarketState::all();
        assert_eq!(states.len(), 36);
        let unique: std::collections::HashSet<_> = states.iter().collect();
        assert_eq!(unique.len(), 36);
    }

    #[test]
    fn test_partial_state_deserializes_with_defaults() {
        let state: MarketState = serde_json::from_str(r#"{"trend": "uptrend"}"#).unwrap();
        assert_eq!(state.trend, Trend::Uptrend);
        assert_eq!(state.volatility, VolatilityLevel::Medium);
        assert_eq!(state.volume, VolumeLevel::Medium);
    }
}
