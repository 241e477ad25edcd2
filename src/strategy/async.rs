//! Asynchronous processing strategy
//!
//! Replays a script with the payment processor running as a separate task.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy (tokio current-thread runtime)
//!     ├── CheckoutSession ── ChannelGateway ──requests──▶ processor task
//!     │                                                      │
//!     ├── script verdict rows ────────────verdicts──────────▶│
//!     │                                                      │
//!     └── CheckoutSession::deliver ◀──────results────────────┘
//! ```
//!
//! `submit` only hands the request to the channel; the flow stays pending
//! until the processor answers. A verdict row read while nothing is pending
//! never reaches the processor: it is applied directly so the stale result is
//! reported exactly as the synchronous strategy reports it.

use crate::core::{CheckoutConfig, PaymentGateway};
use crate::io::script_format::{write_report_csv, CheckoutEvent};
use crate::io::script_reader::ScriptReader;
use crate::strategy::session::CheckoutSession;
use crate::strategy::ProcessingStrategy;
use crate::types::{CheckoutError, ProcessingRequest, ProcessingResult};
use std::io::Write;
use std::path::Path;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Gateway that forwards requests to a processor task
///
/// `dispatch` never blocks: the unbounded channel buffers the request.
#[derive(Debug, Clone)]
pub struct ChannelGateway {
    requests: UnboundedSender<ProcessingRequest>,
}

impl ChannelGateway {
    pub fn new(requests: UnboundedSender<ProcessingRequest>) -> Self {
        Self { requests }
    }
}

impl PaymentGateway for ChannelGateway {
    fn dispatch(&mut self, request: ProcessingRequest) {
        if let Err(e) = self.requests.send(request) {
            warn!(order_id = %e.0.order_id, "Payment processor is gone; request dropped");
        }
    }
}

/// Simulated payment processor
///
/// Answers each request with the next scripted verdict. Stops when either
/// the request or the verdict channel closes.
async fn run_processor(
    mut requests: UnboundedReceiver<ProcessingRequest>,
    mut verdicts: UnboundedReceiver<ProcessingResult>,
    results: UnboundedSender<ProcessingResult>,
) -> usize {
    let mut answered = 0;

    while let Some(request) = requests.recv().await {
        debug!(
            order_id = %request.order_id,
            variant = %request.variant,
            amount = %request.amount,
            "Processor received request"
        );

        let Some(verdict) = verdicts.recv().await else {
            break;
        };
        if results.send(verdict).is_err() {
            break;
        }
        answered += 1;
    }

    answered
}

/// Asynchronous processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: CheckoutConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: CheckoutConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Replay the script against the processor task
    ///
    /// 1. Creates a tokio current-thread runtime
    /// 2. Spawns the processor task and wires the three channels
    /// 3. Applies each script row; verdicts for a pending submission go
    ///    through the processor and its answer is delivered to the flow
    /// 4. Closes the channels, waits for the processor and writes the report
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), CheckoutError> {
        let runtime = tokio::runtime::Builder::new_current_thread().build()?;

        runtime.block_on(async {
            let reader = ScriptReader::new(input_path)?;

            let (request_tx, request_rx) = mpsc::unbounded_channel();
            let (verdict_tx, verdict_rx) = mpsc::unbounded_channel();
            let (result_tx, mut result_rx) = mpsc::unbounded_channel();
            let processor = tokio::spawn(run_processor(request_rx, verdict_rx, result_tx));

            let mut session = CheckoutSession::new(self.config.clone(), ChannelGateway::new(request_tx));
            let mut rows = Vec::new();

            for event in reader {
                let row = match event {
                    Ok(CheckoutEvent::Verdict(verdict)) if session.is_pending() => {
                        verdict_tx
                            .send(verdict)
                            .map_err(|_| CheckoutError::processor_unavailable("verdict channel closed"))?;
                        let result = result_rx
                            .recv()
                            .await
                            .ok_or_else(|| CheckoutError::processor_unavailable("result channel closed"))?;
                        session.deliver(result)
                    }
                    Ok(event) => session.apply(event),
                    Err(e) => session.reject(e),
                };
                rows.push(row);
            }

            // Closing both inputs lets the processor finish
            drop(verdict_tx);
            drop(session);
            let answered = processor
                .await
                .map_err(|e| CheckoutError::processor_unavailable(e.to_string()))?;

            info!(steps = rows.len(), answered, "Script replayed");
            write_report_csv(&rows, output)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::sync::SyncProcessingStrategy;
    use crate::types::{FieldId, PaymentVariant};
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn config() -> CheckoutConfig {
        CheckoutConfig::new("BRL", 2025)
    }

    #[test]
    fn test_async_strategy_matches_sync_output() {
        let file = create_temp_csv(
            "action,key,value\n\
             succeed,CONF-0,\n\
             start,ORD-1,129.99\n\
             select,boleto,\n\
             submit,,\n\
             edit,document_id,123.456.789-00\n\
             edit,holder_name,Joao Silva\n\
             submit,,\n\
             submit,,\n\
             fail,ERR-5001,declined\n\
             retry,,\n\
             submit,,\n\
             succeed,CONF-1,\n\
             continue,,\n",
        );

        let mut sync_output = Vec::new();
        SyncProcessingStrategy::new(config())
            .process(file.path(), &mut sync_output)
            .unwrap();

        let mut async_output = Vec::new();
        AsyncProcessingStrategy::new(config())
            .process(file.path(), &mut async_output)
            .unwrap();

        assert_eq!(
            String::from_utf8(async_output).unwrap(),
            String::from_utf8(sync_output).unwrap()
        );
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let mut output = Vec::new();
        let result = AsyncProcessingStrategy::new(config()).process(Path::new("nonexistent.csv"), &mut output);
        assert!(matches!(result, Err(CheckoutError::FileNotFound { .. })));
    }

    #[test]
    fn test_async_strategy_leaves_unanswered_request_pending() {
        let file = create_temp_csv(
            "action,key,value\n\
             start,ORD-1,10\n\
             select,pix,\n\
             edit,payer_document,12345678900\n\
             submit,,\n",
        );

        let mut output = Vec::new();
        AsyncProcessingStrategy::new(config())
            .process(file.path(), &mut output)
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output.lines().last().unwrap(),
            "4,submit,method_form,pix,ok,pending,dispatched 10 BRL"
        );
    }

    #[tokio::test]
    async fn test_processor_answers_requests_in_order() {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (verdict_tx, verdict_rx) = mpsc::unbounded_channel();
        let (result_tx, mut result_rx) = mpsc::unbounded_channel();
        let processor = tokio::spawn(run_processor(request_rx, verdict_rx, result_tx));

        let mut gateway = ChannelGateway::new(request_tx);
        let mut session = CheckoutSession::new(config(), &mut gateway);
        session.apply(CheckoutEvent::Start {
            order_id: "ORD-1".to_string(),
            amount: Some(Decimal::ONE),
        });
        session.apply(CheckoutEvent::Select(PaymentVariant::Voucher));
        session.apply(CheckoutEvent::Edit {
            field: FieldId::VoucherCode,
            value: "gift-2025".to_string(),
        });
        session.apply(CheckoutEvent::Submit);
        assert!(session.is_pending());

        verdict_tx.send(ProcessingResult::success("CONF-1")).unwrap();
        let result = result_rx.recv().await.unwrap();
        assert_eq!(result, ProcessingResult::success("CONF-1"));

        let row = session.deliver(result);
        assert_eq!(row.detail, "confirmation=CONF-1 method=Voucher");

        drop(session);
        drop(gateway);
        drop(verdict_tx);
        assert_eq!(processor.await.unwrap(), 1);
    }
}
