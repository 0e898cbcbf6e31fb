pub mod classifier;
pub mod selection;
pub mod scoring;
pub mod adjustments;
pub mod apply;

pub use classifier::MarketClassifier;
pub use selection::{select_strategies, SecondaryPick, Selection};
pub use scoring::{suitability_score, MAX_SUITABILITY};
pub use adjustments::{parameter_adjustments, ParameterAdjustment, ParameterValue};
pub use apply::{apply_strategy, merge_overrides, ParamOverrides, StrategyApplication};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::RecommenderSettings;
use crate::error::ClassifyError;
use crate::strategies::{catalog, IdGenerator, StrategyPreset, UuidIdGenerator};
use crate::types::{CandleBuffer, MarketState, UserPreferences};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsights {
    pub market_state: MarketState,
    pub suitability: u8,
    pub recommendations: Vec<ParameterAdjustment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub strategy: StrategyPreset,
    pub market_insights: MarketInsights,
}

impl Recommendation {
    pub fn id(&self) -> &str {
        &self.strategy.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub market_state: MarketState,
    pub recommendations: Vec<Recommendation>,
}

impl MarketAnalysis {
    pub fn primary(&self) -> Option<&Recommendation> {
        self.recommendations.first()
    }
}

/// Entry point tying classification, selection and scoring together.
pub struct StrategyRecommender {
    classifier: MarketClassifier,
    ids: Box<dyn IdGenerator + Send + Sync>,
}

impl StrategyRecommender {
    pub fn new(settings: RecommenderSettings) -> Self {
        Self {
            classifier: MarketClassifier::new(settings),
            ids: Box::new(UuidIdGenerator),
        }
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + Send + Sync + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn settings(&self) -> &RecommenderSettings {
        self.classifier.settings()
    }

    pub fn available_strategies() -> &'static [StrategyPreset] {
        catalog::all()
    }

    pub fn classify(&self, candles: &CandleBuffer) -> MarketState {
        self.classifier.classify(candles)
    }

    pub fn try_classify(&self, candles: &CandleBuffer) -> Result<MarketState, ClassifyError> {
        self.classifier.try_classify(candles)
    }

    /// Ranked recommendations, primary strategy first.
    pub fn generate_recommendations(
        &self,
        state: &MarketState,
        preferences: &UserPreferences,
    ) -> Vec<Recommendation> {
        let selection = select_strategies(state, preferences.risk_level);

        let mut strategies = Vec::with_capacity(1 + selection.secondaries.len());
        strategies.push(catalog::get(selection.primary).clone());
        for pick in &selection.secondaries {
            strategies.push(
                catalog::get(pick.template).customize(pick.customization(), self.ids.as_ref()),
            );
        }

        strategies
            .into_iter()
            .map(|strategy| {
                let market_insights = MarketInsights {
                    market_state: *state,
                    suitability: suitability_score(&strategy, state),
                    recommendations: parameter_adjustments(&strategy, state),
                };
                Recommendation {
                    strategy,
                    market_insights,
                }
            })
            .collect()
    }

    pub fn analyze_market_data(
        &self,
        candles: &CandleBuffer,
        preferences: &UserPreferences,
    ) -> MarketAnalysis {
        let market_state = self.classify(candles);
        let recommendations = self.generate_recommendations(&market_state, preferences);

        if let Some(primary) = recommendations.first() {
            info!(
                "Market {} (risk {}): {} recommendations, primary {} scored {}/{}",
                market_state,
                preferences.risk_level,
                recommendations.len(),
                primary.strategy.id,
                primary.market_insights.suitability,
                MAX_SUITABILITY
            );
        }

        MarketAnalysis {
            market_state,
            recommendations,
        }
    }
}

impl Default for StrategyRecommender {
    fn default() -> Self {
        Self::new(RecommenderSettings::default())
    }
}
