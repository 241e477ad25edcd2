//! Synchronous processing strategy
//!
//! Replays a script on the calling thread. Payment requests go to a
//! [`RecordingGateway`] and the script's verdict rows are delivered to the
//! flow as soon as they are read.

use crate::core::{CheckoutConfig, RecordingGateway};
use crate::io::script_format::write_report_csv;
use crate::io::script_reader::ScriptReader;
use crate::strategy::session::CheckoutSession;
use crate::strategy::ProcessingStrategy;
use crate::types::CheckoutError;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use checkout_flow::core::CheckoutConfig;
/// use checkout_flow::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(CheckoutConfig::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("events.csv"), &mut output)
///     .expect("Replay failed");
/// ```
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    config: CheckoutConfig,
}

impl SyncProcessingStrategy {
    pub fn new(config: CheckoutConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), CheckoutError> {
        let reader = ScriptReader::new(input_path)?;
        let mut session = CheckoutSession::new(self.config.clone(), RecordingGateway::new());

        let rows: Vec<_> = reader
            .map(|event| match event {
                Ok(event) => session.apply(event),
                Err(e) => session.reject(e),
            })
            .collect();

        info!(
            steps = rows.len(),
            dispatched = session.flow().gateway().requests().len(),
            "Script replayed"
        );

        write_report_csv(&rows, output)
    }
}
