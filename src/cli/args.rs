use crate::core::CheckoutConfig;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay a checkout event script and report each step
#[derive(Parser, Debug)]
#[command(name = "checkout-flow")]
#[command(about = "Replay a checkout event script and report each step", long_about = None)]
pub struct CliArgs {
    /// Event script path
    #[arg(value_name = "INPUT", help = "Path to the event script CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy used to reach the payment processor
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for in-line verdicts or 'async' for a processor task"
    )]
    pub strategy: StrategyType,

    /// Currency charged for every order
    #[arg(
        long = "currency",
        value_name = "CODE",
        default_value = CheckoutConfig::DEFAULT_CURRENCY,
        help = "ISO currency code of the order amount"
    )]
    pub currency: String,

    /// First card expiry year offered (defaults to the clock's year)
    #[arg(
        long = "current-year",
        value_name = "YEAR",
        value_parser = clap::value_parser!(i32).range(1000..=9999),
        help = "First card expiry year offered (default: the current year)"
    )]
    pub current_year: Option<i32>,

    /// Date printed on receipts (defaults to the clock's date)
    #[arg(
        long = "payment-date",
        value_name = "YYYY-MM-DD",
        help = "Date printed on receipts (default: today)"
    )]
    pub payment_date: Option<NaiveDate>,
}

/// Available processing strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a CheckoutConfig from CLI arguments
    ///
    /// The currency is upper-cased; a missing year falls back to the clock.
    pub fn to_config(&self) -> CheckoutConfig {
        let defaults = CheckoutConfig::default();
        CheckoutConfig {
            currency: self.currency.trim().to_uppercase(),
            current_year: self.current_year.unwrap_or(defaults.current_year),
            payment_date: self.payment_date,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program", "input.csv"], StrategyType::Async)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "input.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "input.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match (&parsed.strategy, &expected) {
            (StrategyType::Sync, StrategyType::Sync) => (),
            (StrategyType::Async, StrategyType::Async) => (),
            _ => panic!("Expected {:?}, got {:?}", expected, parsed.strategy),
        }
    }

    #[rstest]
    #[case::defaults(&["program", "input.csv"], "BRL", None)]
    #[case::currency(&["program", "--currency", "usd", "input.csv"], "USD", None)]
    #[case::year(&["program", "--current-year", "2025", "input.csv"], "BRL", Some(2025))]
    #[case::all_options(
        &["program", "--strategy", "sync", "--currency", "EUR", "--current-year", "2030", "input.csv"],
        "EUR",
        Some(2030)
    )]
    fn test_config_conversion(
        #[case] args: &[&str],
        #[case] expected_currency: &str,
        #[case] expected_year: Option<i32>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_config();

        assert_eq!(config.currency, expected_currency);
        assert_eq!(config.expiry_year_span, CheckoutConfig::DEFAULT_EXPIRY_YEAR_SPAN);
        if let Some(year) = expected_year {
            assert_eq!(config.current_year, year);
        }
    }

    #[test]
    fn test_payment_date_parsing() {
        let parsed = CliArgs::try_parse_from(["program", "--payment-date", "2025-11-28", "input.csv"]).unwrap();
        let config = parsed.to_config();
        assert_eq!(config.payment_date, NaiveDate::from_ymd_opt(2025, 11, 28));
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "input.csv"])]
    #[case::invalid_year(&["program", "--current-year", "soon", "input.csv"])]
    #[case::year_too_large(&["program", "--current-year", "2147483647", "input.csv"])]
    #[case::year_too_small(&["program", "--current-year", "-5", "input.csv"])]
    #[case::invalid_payment_date(&["program", "--payment-date", "28/11/2025", "input.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
