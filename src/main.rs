use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use strategy_advisor::config::load_settings;
use strategy_advisor::recommender::{apply_strategy, MarketAnalysis, ParamOverrides, StrategyRecommender};
use strategy_advisor::strategies::{catalog, StrategyPreset};
use strategy_advisor::types::{CandleBuffer, ReturnTarget, RiskLevel, TradingFrequency, UserPreferences};

#[derive(Parser)]
#[command(name = "strategy-advisor")]
#[command(author = "Trading Bot")]
#[command(version = "0.1.0")]
#[command(about = "Recommends Freqtrade strategy presets from recent market data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file path
    #[arg(short, long, default_value = "advisor.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a candle window and recommend strategies
    Analyze {
        /// JSON file holding an array of candles
        #[arg(short = 'f', long)]
        candles: PathBuf,
        /// Risk preference (low, medium, high)
        #[arg(short, long, default_value = "medium")]
        risk: String,
        /// Return target (conservative, balanced, aggressive)
        #[arg(long, default_value = "balanced")]
        return_target: String,
        /// Trading frequency (low, medium, high)
        #[arg(long, default_value = "medium")]
        frequency: String,
        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the built-in strategy presets
    Strategies {
        /// Print the presets as JSON
        #[arg(long)]
        json: bool,
    },
    /// Merge parameter overrides into a preset and print the result
    Apply {
        /// Preset id (e.g. conservative, trendFollowing)
        #[arg(short, long)]
        strategy: String,
        /// Parameter override as name=<json>, repeatable
        #[arg(long = "set", value_name = "NAME=VALUE")]
        overrides: Vec<String>,
        /// Print a Freqtrade config fragment instead of the preset
        #[arg(long)]
        freqtrade: bool,
    },
    /// Print the effective settings as TOML
    Settings,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env before the logger so RUST_LOG and ADVISOR__* can come from it
    dotenvy::dotenv().ok();
    init_logging(cli.verbose, cli.log_json)?;

    let settings = load_settings(Some(Path::new(&cli.config)))?;
    let recommender = StrategyRecommender::new(settings);

    match cli.command {
        Commands::Analyze { candles, risk, return_target, frequency, json } => {
            let preferences = parse_preferences(&risk, &return_target, &frequency);
            run_analysis(&recommender, &candles, &preferences, json)?;
        }
        Commands::Strategies { json } => {
            list_strategies(json)?;
        }
        Commands::Apply { strategy, overrides, freqtrade } => {
            run_apply(&strategy, &overrides, freqtrade)?;
        }
        Commands::Settings => {
            print!("{}", toml::to_string_pretty(recommender.settings())?);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, json: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow!("Failed to install logger: {}", e))
}

fn parse_preferences(risk: &str, return_target: &str, frequency: &str) -> UserPreferences {
    let return_target = ReturnTarget::from_str(return_target).unwrap_or_else(|| {
        warn!("Unknown return target '{}', using balanced", return_target);
        ReturnTarget::default()
    });
    let trading_frequency = TradingFrequency::from_str(frequency).unwrap_or_else(|| {
        warn!("Unknown trading frequency '{}', using medium", frequency);
        TradingFrequency::default()
    });
    UserPreferences {
        risk_level: RiskLevel::from_str_or_default(risk),
        return_target,
        trading_frequency,
    }
}

fn run_analysis(
    recommender: &StrategyRecommender,
    path: &Path,
    preferences: &UserPreferences,
    json: bool,
) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read candles from {}", path.display()))?;
    let candles: CandleBuffer = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid candle data in {}", path.display()))?;
    info!("Loaded {} candles from {}", candles.len(), path.display());

    let analysis = recommender.analyze_market_data(&candles, preferences);
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis, candles.len());
    }
    Ok(())
}

fn print_analysis(analysis: &MarketAnalysis, candle_count: usize) {
    let state = &analysis.market_state;
    println!("\n=== Market Analysis ===");
    println!("Candles: {}", candle_count);
    println!(
        "Trend: {} | Volatility: {} | Volume: {}",
        state.trend, state.volatility, state.volume
    );

    for (rank, rec) in analysis.recommendations.iter().enumerate() {
        let strategy = &rec.strategy;
        println!("\n--- #{} {} ({}) ---", rank + 1, strategy.name, strategy.id);
        println!("{}", strategy.description);
        println!(
            "Risk: {} | Expected return: {} | Success rate: {}",
            strategy.risk_level, strategy.expected_return, strategy.success_rate
        );
        println!("Suitability: {}/10", rec.market_insights.suitability);

        if rec.market_insights.recommendations.is_empty() {
            println!("No parameter changes suggested");
        }
        for adjustment in &rec.market_insights.recommendations {
            println!(
                "  {}: {} -> {} ({})",
                adjustment.parameter,
                adjustment.current_value,
                adjustment.recommended_value,
                adjustment.reason
            );
        }
    }
}

fn list_strategies(json: bool) -> Result<()> {
    let presets = StrategyRecommender::available_strategies();
    if json {
        println!("{}", serde_json::to_string_pretty(presets)?);
        return Ok(());
    }

    println!("\n=== Strategy Presets ===");
    for preset in presets {
        println!(
            "{:<16} {:<28} risk={:<6} return={:<7} success={:<7} stoploss={}",
            preset.id,
            preset.name,
            preset.risk_level,
            preset.expected_return,
            preset.success_rate,
            preset.params.stoploss
        );
    }
    Ok(())
}

fn run_apply(strategy_id: &str, assignments: &[String], freqtrade: bool) -> Result<()> {
    let preset: &StrategyPreset = catalog::find(strategy_id).ok_or_else(|| {
        anyhow!(
            "Unknown strategy: {}. Use one of: {}",
            strategy_id,
            catalog::all().iter().map(|p| p.id.as_str()).collect::<Vec<_>>().join(", ")
        )
    })?;

    let mut overrides = ParamOverrides::new();
    for assignment in assignments {
        let (name, value) = ParamOverrides::parse_assignment(assignment)?;
        overrides.insert(&name, value);
    }

    let application = apply_strategy(preset, &overrides);
    if !application.success {
        bail!(application.message);
    }
    info!("{}", application.message);

    let output = if freqtrade {
        application.strategy.to_freqtrade_config()
    } else {
        serde_json::to_value(&application)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
