//! Checkout Flow Library
//! # Overview
//!
//! This library models a checkout: the screens a customer moves through, the
//! payment method they pick, the fields each method collects and the rules
//! those fields must satisfy before anything is sent to a payment processor.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (variants, fields, schemas, payloads, screens, errors)
//! - [`core`] - Business logic components:
//!   - [`core::schema_registry`] - Field schemas and validation rules per payment variant
//!   - [`core::selector`] - Active payment variant
//!   - [`core::form_controller`] - Field values, errors and the submission guard
//!   - [`core::flow_controller`] - Screen sequencing and cross-screen state
//! - [`io`] - Event script reading and step report writing
//! - [`strategy`] - Sync and async replay drivers
//! - [`cli`] - CLI arguments parsing
//!
//! # Screens
//!
//! ```text
//! Landing ──▶ MethodSelection ◀──▶ MethodForm ──▶ Confirmation ──▶ Landing
//!                                      ▲  │
//!                                      │  ▼
//!                                      Error ──▶ Landing
//! ```
//!
//! # Payment Variants
//!
//! - **Credit Card**: number, holder, expiry month and year, CVV
//! - **PIX**: payer CPF/CNPJ
//! - **Bank Transfer**: bank, account, branch
//! - **Boleto**: CPF/CNPJ and full name
//! - **Voucher**: voucher code
//!
//! # Example
//!
//! ```
//! use checkout_flow::core::{CheckoutConfig, CheckoutFlow, RecordingGateway, SubmitOutcome};
//! use checkout_flow::types::{FieldId, OrderSummary, PaymentVariant, ProcessingResult, Screen};
//! use rust_decimal::Decimal;
//!
//! let mut flow = CheckoutFlow::new(CheckoutConfig::new("BRL", 2025), RecordingGateway::new());
//! flow.start_checkout("ORD-1", OrderSummary::flat(Decimal::new(12999, 2))).unwrap();
//! flow.select_variant(PaymentVariant::Voucher).unwrap();
//! flow.edit(FieldId::VoucherCode, "gift2025").unwrap();
//!
//! assert!(matches!(flow.submit().unwrap(), SubmitOutcome::Accepted(_)));
//! flow.on_processing_result(ProcessingResult::success("CONF-1")).unwrap();
//! assert_eq!(flow.screen(), Screen::Confirmation);
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{CheckoutConfig, CheckoutFlow, FormController, SchemaRegistry, SubmitOutcome};
pub use io::write_report_csv;
pub use types::{
    CheckoutContext, CheckoutError, FieldId, OrderSummary, PaymentVariant, ProcessingRequest,
    ProcessingResult, Screen, ValidatedPayload,
};
