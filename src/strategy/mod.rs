//! Processing strategy module for script replay
//!
//! This module defines the Strategy pattern for complete replay pipelines:
//! reading an event script, driving a checkout flow through it and writing
//! the step report. The strategies differ in how payment requests reach a
//! processor and how its verdicts come back:
//!
//! - `sync` - Requests are recorded in-line; verdicts are applied directly
//! - `async` - Requests travel over tokio channels to a simulated processor task
//!
//! Both strategies produce identical reports for the same script.

use crate::cli::StrategyType;
use crate::core::CheckoutConfig;
use crate::types::CheckoutError;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod session;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, ChannelGateway};
pub use session::CheckoutSession;
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete replay pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Replay the script at `input_path` and write the step report to `output`
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the event script
    /// * `output` - Mutable reference to a writer for the step report
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The script cannot be opened (file not found, permission denied)
    /// - The report cannot be written
    /// - The simulated processor stops (async strategy)
    ///
    /// Rejected events and malformed rows are not errors: they are logged
    /// and recorded in the report, and replay continues with the next row.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), CheckoutError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Checkout configuration handed to every flow the strategy drives
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: CheckoutConfig,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(config)),
        StrategyType::Async => Box::new(AsyncProcessingStrategy::new(config)),
    }
}
