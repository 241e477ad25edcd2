//! Checkout Flow CLI
//!
//! Replays a checkout event script through the checkout flow and writes a
//! step report.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- events.csv > report.csv
//! cargo run -- --strategy sync events.csv > report.csv
//! cargo run -- --strategy async --currency USD --current-year 2025 --payment-date 2025-11-28 events.csv > report.csv
//! RUST_LOG=checkout_flow=info cargo run -- events.csv > report.csv
//! ```
//!
//! The report goes to stdout; logs go to stderr.
//!
//! # Processing Strategies
//!
//! - **sync**: Processor verdicts are applied in-line on the calling thread
//! - **async**: Requests and verdicts travel through a simulated processor task (default)
//!
//! # Exit Codes
//!
//! - 0: Success (including scripts with rejected events)
//! - 1: Error (missing arguments, script not found, report not writable, etc.)

use checkout_flow::cli;
use checkout_flow::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();
    let config = args.to_config();
    tracing::debug!(
        currency = %config.currency,
        current_year = config.current_year,
        strategy = ?args.strategy,
        "Loaded configuration"
    );

    let strategy = strategy::create_strategy(args.strategy, config);

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
