//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `variant`: Payment variants and the fields they collect
//! - `schema`: Declarative field definitions and validation rules
//! - `payload`: Validated payloads and processor messages
//! - `context`: Cross-screen checkout state and outcomes
//! - `order`: Order summary and amounts
//! - `screen`: Screens and flow actions
//! - `error`: Error types for the checkout flow

pub mod context;
pub mod error;
pub mod order;
pub mod payload;
pub mod schema;
pub mod screen;
pub mod variant;

pub use context::{CheckoutContext, FailureReason, PaymentOutcome, Receipt};
pub use error::CheckoutError;
pub use order::{LineItem, OrderId, OrderSummary};
pub use payload::{
    BankTransferDetails, BoletoDetails, CreditCardDetails, PixDetails, ProcessingRequest,
    ProcessingResult, ValidatedPayload, ValidationErrors, VoucherDetails,
};
pub use schema::{FieldDef, FieldKind, FieldRule, FieldSchema, Mask};
pub use screen::{FlowAction, Screen};
pub use variant::{FieldId, PaymentVariant};
