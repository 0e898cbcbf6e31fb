use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub fn all() -> [RiskLevel; 3] {
        [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }

    /// Unrecognised values are treated as medium risk.
    pub fn from_str_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            warn!("Unknown risk level '{}', using medium", s);
            RiskLevel::Medium
        })
    }
}

impl From<String> for RiskLevel {
    fn from(s: String) -> Self {
        Self::from_str_or_default(&s)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Desired return profile. Carried with the preferences but not used for selection yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ReturnTarget {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

impl ReturnTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnTarget::Conservative => "conservative",
            ReturnTarget::Balanced => "balanced",
            ReturnTarget::Aggressive => "aggressive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Some(ReturnTarget::Conservative),
            "balanced" => Some(ReturnTarget::Balanced),
            "aggressive" => Some(ReturnTarget::Aggressive),
            _ => None,
        }
    }
}

impl From<String> for ReturnTarget {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or_default()
    }
}

impl fmt::Display for ReturnTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Desired trading frequency. Carried with the preferences but not used for selection yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TradingFrequency {
    Low,
    #[default]
    Medium,
    High,
}

impl TradingFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradingFrequency::Low => "low",
            TradingFrequency::Medium => "medium",
            TradingFrequency::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(TradingFrequency::Low),
            "medium" => Some(TradingFrequency::Medium),
            "high" => Some(TradingFrequency::High),
            _ => None,
        }
    }
}

impl From<String> for TradingFrequency {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or_default()
    }
}

impl fmt::Display for TradingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPreferences {
    pub risk_level: RiskLevel,
    pub return_target: ReturnTarget,
    pub trading_frequency: TradingFrequency,
}

impl UserPreferences {
    pub fn with_risk(risk_level: RiskLevel) -> Self {
        Self {
            risk_level,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_parsing() {
        assert_eq!(RiskLevel::from_str("LOW"), Some(RiskLevel::Low));
        assert_eq!(RiskLevel::from_str(" high "), Some(RiskLevel::High));
        assert_eq!(RiskLevel::from_str("extreme"), None);
        assert_eq!(RiskLevel::from_str_or_default("extreme"), RiskLevel::Medium);
    }

    #[test]
    fn test_preferences_defaults_when_fields_missing() {
        let prefs: UserPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, UserPreferences::default());
        assert_eq!(prefs.risk_level, RiskLevel::Medium);
        assert_eq!(prefs.return_target, ReturnTarget::Balanced);
        assert_eq!(prefs.trading_frequency, TradingFrequency::Medium);
    }

    #[test]
    fn test_preferences_unknown_risk_falls_back_to_medium() {
        let prefs: UserPreferences =
            serde_json::from_str(r#"{"riskLevel": "yolo", "tradingFrequency": "high"}"#).unwrap();
        assert_eq!(prefs.risk_level, RiskLevel::Medium);
        assert_eq!(prefs.trading_frequency, TradingFrequency::High);
    }

    #[test]
    fn test_risk_level_serializes_lowercase() {
        let json = serde_json::to_string(&RiskLevel::High).unwrap();
        assert_eq!(json, r#""high""#);
    }
}
