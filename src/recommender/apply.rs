use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::error::ApplyError;
use crate::strategies::{ParamSet, StrategyPreset};

/// Top-level `ParamSet` fields to replace, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamOverrides(BTreeMap<String, Value>);

impl ParamOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, parameter: &str, value: Value) -> Self {
        self.insert(parameter, value);
        self
    }

    pub fn insert(&mut self, parameter: &str, value: Value) {
        self.0.insert(parameter.to_string(), value);
    }

    /// Parses a `name=<json>` assignment; values that are not valid JSON are taken as strings.
    pub fn parse_assignment(assignment: &str) -> Result<(String, Value), ApplyError> {
        let (name, raw) = assignment.split_once('=').ok_or_else(|| ApplyError::InvalidValue {
            parameter: assignment.to_string(),
            reason: "expected name=value".to_string(),
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ApplyError::UnknownParameter(String::new()));
        }
        let raw = raw.trim();
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        Ok((name.to_string(), value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyApplication {
    pub success: bool,
    pub message: String,
    pub strategy: StrategyPreset,
}

/// Shallow merge of `overrides` into a copy of `params`.
pub fn merge_overrides(params: &ParamSet, overrides: &ParamOverrides) -> Result<ParamSet, ApplyError> {
    let base = match serde_json::to_value(params) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => {
            return Err(ApplyError::InvalidValue {
                parameter: "params".to_string(),
                reason: "parameters did not serialize to an object".to_string(),
            })
        }
        Err(e) => {
            return Err(ApplyError::InvalidValue {
                parameter: "params".to_string(),
                reason: e.to_string(),
            })
        }
    };

    let mut merged = base.clone();
    for (parameter, value) in overrides.iter() {
        if !ParamSet::FIELDS.contains(&parameter.as_str()) {
            return Err(ApplyError::UnknownParameter(parameter.clone()));
        }

        // Type-check each override on its own so the error names the field.
        let mut single: Map<String, Value> = base.clone();
        single.insert(parameter.clone(), value.clone());
        serde_json::from_value::<ParamSet>(Value::Object(single)).map_err(|e| ApplyError::InvalidValue {
            parameter: parameter.clone(),
            reason: e.to_string(),
        })?;

        merged.insert(parameter.clone(), value.clone());
    }

    let params: ParamSet = serde_json::from_value(Value::Object(merged)).map_err(|e| ApplyError::InvalidValue {
        parameter: "params".to_string(),
        reason: e.to_string(),
    })?;
    params.validate().map_err(ApplyError::Validation)?;
    Ok(params)
}

/// Builds the configuration the caller would submit to the trading backend.
///
/// Nothing is sent anywhere: on failure the unchanged strategy comes back
/// with `success == false` and the reason in `message`.
pub fn apply_strategy(strategy: &StrategyPreset, overrides: &ParamOverrides) -> StrategyApplication {
    match merge_overrides(&strategy.params, overrides) {
        Ok(params) => {
            let mut applied = strategy.clone();
            applied.params = params;
            info!("Applying strategy {} ({}) with {} overrides", applied.name, applied.id, overrides.len());
            StrategyApplication {
                success: true,
                message: "Strategy applied successfully".to_string(),
                strategy: applied,
            }
        }
        Err(e) => {
            warn!("Could not apply strategy {}: {}", strategy.id, e);
            StrategyApplication {
                success: false,
                message: e.to_string(),
                strategy: strategy.clone(),
            }
        }
    }
}
