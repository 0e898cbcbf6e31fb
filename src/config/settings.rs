use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Thresholds and windows used by the market state classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderSettings {
    pub trend: TrendSettings,
    pub volatility: VolatilitySettings,
    pub volume: VolumeSettings,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            trend: TrendSettings::default(),
            volatility: VolatilitySettings::default(),
            volume: VolumeSettings::default(),
        }
    }
}

impl RecommenderSettings {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        // Trend validation
        if self.trend.short_period == 0 || self.trend.long_period == 0 {
            errors.push("trend: periods must be > 0".to_string());
        }
        if self.trend.short_period >= self.trend.long_period {
            errors.push("trend: short_period must be < long_period".to_string());
        }
        if self.trend.band < Decimal::ZERO || self.trend.band >= Decimal::ONE {
            errors.push("trend: band must be between 0 and 1".to_string());
        }

        // Volatility validation
        if self.volatility.window == 0 {
            errors.push("volatility: window must be > 0".to_string());
        }
        if self.volatility.low_threshold < Decimal::ZERO {
            errors.push("volatility: low_threshold must be >= 0".to_string());
        }
        if self.volatility.low_threshold >= self.volatility.high_threshold {
            errors.push("volatility: low_threshold must be < high_threshold".to_string());
        }

        // Volume validation
        if self.volume.recent_window == 0 {
            errors.push("volume: recent_window must be > 0".to_string());
        }
        if self.volume.low_ratio <= Decimal::ZERO {
            errors.push("volume: low_ratio must be > 0".to_string());
        }
        if self.volume.low_ratio >= self.volume.high_ratio {
            errors.push("volume: low_ratio must be < high_ratio".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendSettings {
    pub short_period: usize,
    pub long_period: usize,
    /// Relative distance between the averages before a trend is declared.
    pub band: Decimal,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            short_period: 10,
            long_period: 50,
            band: dec!(0.02),
        }
    }
}

impl TrendSettings {
    pub fn upper_factor(&self) -> Decimal {
        Decimal::ONE + self.band
    }

    pub fn lower_factor(&self) -> Decimal {
        Decimal::ONE - self.band
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilitySettings {
    /// Number of most recent price transitions averaged.
    pub window: usize,
    pub low_threshold: Decimal,
    pub high_threshold: Decimal,
}

impl Default for VolatilitySettings {
    fn default() -> Self {
        Self {
            window: 20,
            low_threshold: dec!(0.005),
            high_threshold: dec!(0.015),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeSettings {
    pub recent_window: usize,
    pub high_ratio: Decimal,
    pub low_ratio: Decimal,
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            recent_window: 5,
            high_ratio: dec!(1.5),
            low_ratio: dec!(0.75),
        }
    }
}
