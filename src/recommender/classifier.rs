use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::RecommenderSettings;
use crate::error::ClassifyError;
use crate::indicators::{is_high_volume, is_low_volume, mean_abs_change, relative_volume, sma_tail};
use crate::types::{CandleBuffer, MarketState, Trend, VolatilityLevel, VolumeLevel};

/// Buckets a candle window into trend, volatility and volume levels.
#[derive(Debug, Clone, Default)]
pub struct MarketClassifier {
    settings: RecommenderSettings,
}

impl MarketClassifier {
    pub fn new(settings: RecommenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RecommenderSettings {
        &self.settings
    }

    /// Never fails: empty or malformed windows yield `MarketState::default()`.
    pub fn classify(&self, candles: &CandleBuffer) -> MarketState {
        match self.try_classify(candles) {
            Ok(state) => state,
            Err(ClassifyError::InsufficientData) => {
                debug!("No candles supplied, using default market state");
                MarketState::default()
            }
            Err(e) => {
                warn!("Market analysis failed ({}), using default market state", e);
                MarketState::default()
            }
        }
    }

    pub fn try_classify(&self, candles: &CandleBuffer) -> Result<MarketState, ClassifyError> {
        if candles.is_empty() {
            return Err(ClassifyError::InsufficientData);
        }

        let closes = candles.closes();
        if let Some(index) = closes.iter().position(|c| *c <= Decimal::ZERO) {
            return Err(ClassifyError::NonPositivePrice { index });
        }

        let trend = self.detect_trend(&closes)?;
        let volatility = self.detect_volatility(&closes)?;
        let volume = self.detect_volume(candles)?;

        let state = MarketState::new(trend, volatility, volume);
        debug!("Classified {} candles: {}", candles.len(), state);
        Ok(state)
    }

    fn detect_trend(&self, closes: &[Decimal]) -> Result<Trend, ClassifyError> {
        let trend = &self.settings.trend;
        let short_sma = sma_tail(closes, trend.short_period).ok_or(ClassifyError::Overflow("short SMA"))?;
        let long_sma = sma_tail(closes, trend.long_period).ok_or(ClassifyError::Overflow("long SMA"))?;

        let upper = long_sma
            .checked_mul(trend.upper_factor())
            .ok_or(ClassifyError::Overflow("trend band"))?;
        let lower = long_sma
            .checked_mul(trend.lower_factor())
            .ok_or(ClassifyError::Overflow("trend band"))?;

        debug!("SMA short={:.6} long={:.6}", short_sma, long_sma);

        Ok(if short_sma > upper {
            Trend::Uptrend
        } else if short_sma < lower {
            Trend::Downtrend
        } else {
            Trend::Sideways
        })
    }

    fn detect_volatility(&self, closes: &[Decimal]) -> Result<VolatilityLevel, ClassifyError> {
        let settings = &self.settings.volatility;
        let volatility = mean_abs_change(closes, settings.window)?;
        debug!("Mean absolute change={:.6}", volatility);

        Ok(if volatility < settings.low_threshold {
            VolatilityLevel::Low
        } else if volatility > settings.high_threshold {
            VolatilityLevel::High
        } else {
            VolatilityLevel::Medium
        })
    }

    fn detect_volume(&self, candles: &CandleBuffer) -> Result<VolumeLevel, ClassifyError> {
        let carries_volume = candles.first().map(|c| c.has_volume()).unwrap_or(false);
        if !carries_volume {
            return Ok(VolumeLevel::Unknown);
        }

        let volumes = candles
            .candles
            .iter()
            .enumerate()
            .map(|(index, c)| c.volume.ok_or(ClassifyError::MissingVolume { index }))
            .collect::<Result<Vec<_>, _>>()?;

        let settings = &self.settings.volume;
        let ratio = relative_volume(&volumes, settings.recent_window)
            .ok_or(ClassifyError::Overflow("volume ratio"))?;
        debug!("Relative volume={:.4}", ratio);

        Ok(if is_high_volume(ratio, settings.high_ratio) {
            VolumeLevel::High
        } else if is_low_volume(ratio, settings.low_ratio) {
            VolumeLevel::Low
        } else {
            VolumeLevel::Medium
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Candle;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn buffer(closes: &[Decimal], volumes: Option<&[Decimal]>) -> CandleBuffer {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| {
                Candle::new(
                    start + Duration::minutes(5 * i as i64),
                    *close,
                    *close,
                    *close,
                    *close,
                    volumes.map(|v| v[i]),
                )
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_empty_window_uses_default() {
        let classifier = MarketClassifier::default();
        let empty = CandleBuffer::default();
        assert_eq!(classifier.try_classify(&empty), Err(ClassifyError::InsufficientData));
        assert_eq!(
            classifier.classify(&empty),
            MarketState::new(Trend::Sideways, VolatilityLevel::Medium, VolumeLevel::Medium)
        );
    }

    #[test]
    fn test_flat_prices_without_volume() {
        let classifier = MarketClassifier::default();
        let state = classifier.classify(&buffer(&[dec!(100); 60], None));
        assert_eq!(state.trend, Trend::Sideways);
        assert_eq!(state.volatility, VolatilityLevel::Low);
        assert_eq!(state.volume, VolumeLevel::Unknown);
    }

    #[test]
    fn test_uptrend_detection() {
        let mut closes = vec![dec!(1); 40];
        closes.extend(vec![dec!(1.05); 10]);
        // short = 1.05, long = 1.01
        let state = MarketClassifier::default().classify(&buffer(&closes, None));
        assert_eq!(state.trend, Trend::Uptrend);
        assert_eq!(state.volatility, VolatilityLevel::Low);
    }

    #[test]
    fn test_single_jump_stays_sideways() {
        let mut closes = vec![dec!(1); 49];
        closes.push(dec!(1.05));
        // short = 1.005, long = 1.001
        let state = MarketClassifier::default().classify(&buffer(&closes, None));
        assert_eq!(state.trend, Trend::Sideways);
    }

    #[test]
    fn test_downtrend_detection() {
        let mut closes = vec![dec!(100); 40];
        closes.extend(vec![dec!(90); 10]);
        let state = MarketClassifier::default().classify(&buffer(&closes, None));
        assert_eq!(state.trend, Trend::Downtrend);
    }

    #[test]
    fn test_volatility_buckets() {
        let classifier = MarketClassifier::default();

        // 0.4% steps
        let calm: Vec<Decimal> = (0..30)
            .map(|i| if i % 2 == 0 { dec!(100) } else { dec!(100.4) })
            .collect();
        assert_eq!(classifier.classify(&buffer(&calm, None)).volatility, VolatilityLevel::Low);

        // 1% steps
        let normal: Vec<Decimal> = (0..30)
            .map(|i| if i % 2 == 0 { dec!(100) } else { dec!(101) })
            .collect();
        assert_eq!(classifier.classify(&buffer(&normal, None)).volatility, VolatilityLevel::Medium);

        // 3% steps
        let wild: Vec<Decimal> = (0..30)
            .map(|i| if i % 2 == 0 { dec!(100) } else { dec!(103) })
            .collect();
        assert_eq!(classifier.classify(&buffer(&wild, None)).volatility, VolatilityLevel::High);
    }

    #[test]
    fn test_volume_buckets() {
        let classifier = MarketClassifier::default();
        let closes = vec![dec!(100); 20];

        let mut spike = vec![dec!(100); 15];
        spike.extend(vec![dec!(400); 5]);
        assert_eq!(classifier.classify(&buffer(&closes, Some(&spike))).volume, VolumeLevel::High);

        let mut drying = vec![dec!(100); 15];
        drying.extend(vec![dec!(10); 5]);
        assert_eq!(classifier.classify(&buffer(&closes, Some(&drying))).volume, VolumeLevel::Low);

        let steady = vec![dec!(100); 20];
        assert_eq!(classifier.classify(&buffer(&closes, Some(&steady))).volume, VolumeLevel::Medium);
    }

    #[test]
    fn test_zero_first_volume_is_unknown() {
        let closes = vec![dec!(100); 3];
        let volumes = [Decimal::ZERO, dec!(5), dec!(5)];
        let state = MarketClassifier::default().classify(&buffer(&closes, Some(&volumes)));
        assert_eq!(state.volume, VolumeLevel::Unknown);
    }

    #[test]
    fn test_malformed_windows_fall_back() {
        let classifier = MarketClassifier::default();

        let bad_price = buffer(&[dec!(100), dec!(0), dec!(100)], None);
        assert_eq!(
            classifier.try_classify(&bad_price),
            Err(ClassifyError::NonPositivePrice { index: 1 })
        );
        assert_eq!(classifier.classify(&bad_price), MarketState::default());

        let mut gap = buffer(&[dec!(100); 3], Some(&[dec!(5), dec!(5), dec!(5)]));
        gap.candles[2].volume = None;
        assert_eq!(
            classifier.try_classify(&gap),
            Err(ClassifyError::MissingVolume { index: 2 })
        );
        assert_eq!(classifier.classify(&gap), MarketState::default());
    }

    #[test]
    fn test_single_candle() {
        let state = MarketClassifier::default().classify(&buffer(&[dec!(42)], Some(&[dec!(7)])));
        assert_eq!(state.trend, Trend::Sideways);
        assert_eq!(state.volatility, VolatilityLevel::Low);
        assert_eq!(state.volume, VolumeLevel::Medium);
    }

    #[test]
    fn test_classification_always_in_range() {
        let classifier = MarketClassifier::default();
        for n in 1..80usize {
            let closes: Vec<Decimal> = (0..n)
                .map(|i| Decimal::from(100 + (i * 7 % 13) as i64))
                .collect();
            let volumes: Vec<Decimal> = (0..n).map(|i| Decimal::from(1 + (i % 9) as i64)).collect();
            let state = classifier.classify(&buffer(&closes, Some(&volumes)));
            assert!(Trend::all().contains(&state.trend));
            assert!(VolatilityLevel::all().contains(&state.volatility));
            assert!(VolumeLevel::all().contains(&state.volume));
        }
    }
}
