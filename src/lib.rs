//! Market-state classification and Freqtrade strategy recommendations.
//!
//! A candle window is bucketed into trend, volatility and volume levels,
//! matched against five strategy presets and returned as ranked, scored
//! recommendations with advisory parameter adjustments. Everything is
//! synchronous and side-effect free.

pub mod types;
pub mod indicators;
pub mod config;
pub mod strategies;
pub mod recommender;
pub mod error;

pub use config::RecommenderSettings;
pub use error::{ApplyError, ClassifyError, SettingsError};
pub use recommender::{
    apply_strategy, MarketAnalysis, ParamOverrides, Recommendation, StrategyApplication,
    StrategyRecommender,
};
pub use strategies::{StrategyId, StrategyPreset};
pub use types::{Candle, CandleBuffer, MarketState, RiskLevel, UserPreferences};
