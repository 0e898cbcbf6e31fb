use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use tracing::{debug, info};

use super::settings::RecommenderSettings;
use crate::error::SettingsError;

pub const ENV_PREFIX: &str = "ADVISOR";

/// Layers built-in defaults, an optional TOML file and `ADVISOR__*`
/// environment variables, then validates the result.
pub fn load_settings(path: Option<&Path>) -> Result<RecommenderSettings, SettingsError> {
    let mut builder = Config::builder().add_source(Config::try_from(&RecommenderSettings::default())?);

    if let Some(path) = path {
        debug!("Reading settings file {}", path.display());
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
    }

    let settings: RecommenderSettings = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()?;

    settings.validate().map_err(SettingsError::Invalid)?;
    info!(
        "Settings loaded: sma={}/{}, volatility window={}, volume window={}",
        settings.trend.short_period,
        settings.trend.long_period,
        settings.volatility.window,
        settings.volume.recent_window
    );
    Ok(settings)
}

/// Parses settings from a TOML document layered over the defaults.
pub fn settings_from_toml(document: &str) -> Result<RecommenderSettings, SettingsError> {
    let settings: RecommenderSettings = Config::builder()
        .add_source(Config::try_from(&RecommenderSettings::default())?)
        .add_source(File::from_str(document, FileFormat::Toml))
        .build()?
        .try_deserialize()?;

    settings.validate().map_err(SettingsError::Invalid)?;
    Ok(settings)
}
