use thiserror::Error;

/// Reasons a candle window could not be classified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("No candles to analyze")]
    InsufficientData,

    #[error("Candle {index} has a non-positive close price")]
    NonPositivePrice { index: usize },

    #[error("Candle {index} is missing volume while the window carries volume data")]
    MissingVolume { index: usize },

    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplyError {
    #[error("Unknown strategy parameter: {0}")]
    UnknownParameter(String),

    #[error("Invalid value for {parameter}: {reason}")]
    InvalidValue { parameter: String, reason: String },

    #[error("Strategy parameters failed validation: {}", .0.join(", "))]
    Validation(Vec<String>),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid settings: {}", .0.join(", "))]
    Invalid(Vec<String>),
}
