use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;

use macro_analyzer_lib::config::Config;
use macro_analyzer_lib::core::alerts::{check_alert, AlertCondition, AlertRule};
use macro_analyzer_lib::logging::init_logging;
use macro_analyzer_lib::AppContext;

#[derive(Parser)]
#[command(name = "macro-analyzer")]
#[command(about = "Macroeconomic indicator fetcher and trend analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the indicator catalog
    Indicators,
    /// Print the normalized series for an indicator
    Fetch {
        code: String,
        /// Bypass the cache and hit the provider
        #[arg(short, long)]
        force: bool,
    },
    /// Trend summary for an indicator
    Trend { code: String },
    /// Compare several indicators over an optional date range
    Compare {
        #[arg(required = true)]
        codes: Vec<String>,
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,
    },
    /// Check one alert rule against fresh data
    Alert {
        code: String,
        condition: AlertCondition,
        #[arg(allow_negative_numbers = true)]
        threshold: f64,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("Invalid date (YYYY-MM-DD): {}", e))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_logging(&config.log_level, &config.log_format);

    let app = AppContext::new(&config)?;

    match cli.command {
        Commands::Indicators => print_json(&app.fetcher.get_available_indicators()),
        Commands::Fetch { code, force } => {
            if app.fetcher.get_indicator(&code).is_none() {
                println!("Indicator '{}' not found. Run `macro-analyzer indicators` for the catalog.", code);
                return Ok(());
            }
            let series = app.fetcher.fetch(&code, force).await;
            if series.is_empty() {
                tracing::warn!(code = %code, "Indicator data not found");
            }
            print_json(&series)
        }
        Commands::Trend { code } => {
            if app.fetcher.get_indicator(&code).is_none() {
                println!("Indicator '{}' not found. Run `macro-analyzer indicators` for the catalog.", code);
                return Ok(());
            }
            print_json(&app.calculator.get_indicator_trend(&code).await)
        }
        Commands::Compare { codes, start, end } => {
            print_json(&app.calculator.compare_indicators(&codes, start, end).await)
        }
        Commands::Alert { code, condition, threshold } => {
            let rule = AlertRule { indicator_code: code, condition, threshold };
            print_json(&check_alert(&app.fetcher, &rule).await)
        }
    }
}
