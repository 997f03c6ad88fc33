//! Command line configuration

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use rust_decimal::Decimal;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Courier delivery estimator configuration
#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Estimate delivery costs and times for a courier fleet",
    long_about = None
)]
pub struct CourierConfig {
    /// Named scenario under `fixtures/scenarios`
    #[arg(short, long, env = "COURIER_FIXTURE", default_value = "sample")]
    pub fixture: String,

    /// Path to a scenario file, used instead of `--fixture`
    #[arg(short, long, env = "COURIER_SCENARIO")]
    pub scenario: Option<PathBuf>,

    /// Override the scenario's base delivery cost
    #[arg(short, long, env = "COURIER_BASE_COST")]
    pub base_cost: Option<Decimal>,

    /// Override the scenario's currency (GBP, USD, EUR, INR)
    #[arg(short, long, env = "COURIER_CURRENCY")]
    pub currency: Option<String>,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl CourierConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_to_sample_fixture() -> TestResult {
        let config = CourierConfig::try_parse_from(["courier", "--log-level", "info"])?;

        assert_eq!(config.fixture, "sample");
        assert!(config.scenario.is_none());
        assert!(config.base_cost.is_none());
        assert_eq!(config.logging.log_format, LogFormat::Compact);

        Ok(())
    }

    #[test]
    fn parses_overrides() -> TestResult {
        let config = CourierConfig::try_parse_from([
            "courier",
            "--scenario",
            "run.yml",
            "--base-cost",
            "125.50",
            "--currency",
            "usd",
            "--log-format",
            "json",
        ])?;

        assert_eq!(config.scenario, Some(PathBuf::from("run.yml")));
        assert_eq!(config.base_cost, Some(Decimal::new(12550, 2)));
        assert_eq!(config.currency.as_deref(), Some("usd"));
        assert_eq!(config.logging.log_format, LogFormat::Json);

        Ok(())
    }

    #[test]
    fn rejects_non_numeric_base_cost() {
        let result = CourierConfig::try_parse_from(["courier", "--base-cost", "cheap"]);

        assert!(result.is_err());
    }
}
