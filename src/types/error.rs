//! Error types for the checkout flow
//!
//! This module defines every error the checkout core and its drivers can
//! report. Field validation failures are deliberately absent: they are data
//! ([`ValidationErrors`](super::ValidationErrors)) shown next to the inputs,
//! not errors that abort an operation.
//!
//! # Error Categories
//!
//! - **Flow Errors**: an action the current screen does not offer, a stale processor result
//! - **Form Errors**: editing a field the bound form does not have, editing while pending
//! - **Registry Errors**: a schema set that does not cover every variant exactly once
//! - **Order Errors**: money arithmetic that overflows
//! - **Driver Errors**: malformed event scripts, file and I/O failures, a stopped processor

use super::screen::{FlowAction, Screen};
use super::variant::{FieldId, PaymentVariant};
use thiserror::Error;

/// Main error type for the checkout flow
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// The action is not available on the current screen
    ///
    /// This is a recoverable error - the flow state is unchanged.
    #[error("Cannot {action} on the {screen} screen")]
    InvalidTransition {
        /// Screen the flow was on
        screen: Screen,
        /// Action that was rejected
        action: FlowAction,
    },

    /// The field does not belong to the bound form
    #[error("Field {field} is not part of the {variant} form")]
    UnknownField {
        /// Field that was edited
        field: FieldId,
        /// Variant whose form is bound
        variant: PaymentVariant,
    },

    /// A submission is waiting for the processor
    ///
    /// Edits and method changes are rejected until the result arrives.
    #[error("A payment submission is pending; wait for the result before changing the form")]
    SubmissionPending,

    /// A processor result arrived with no submission waiting for it
    #[error("No payment submission is pending on the {screen} screen")]
    NoPendingSubmission {
        /// Screen the flow was on
        screen: Screen,
    },

    /// A registry was built without a non-empty schema for some variant
    ///
    /// This is a programming defect, detected when the registry is built.
    #[error("No schema registered for {variant}")]
    MissingSchema {
        /// Variant without a schema
        variant: PaymentVariant,
    },

    /// More than one schema was registered for a variant
    #[error("Duplicate schema registered for {variant}")]
    DuplicateSchema {
        /// Variant registered twice
        variant: PaymentVariant,
    },

    /// A schema lists a field twice
    #[error("Duplicate registration of {field} in the {variant} schema")]
    DuplicateField {
        /// Field registered twice
        field: FieldId,
        /// Schema it appeared in
        variant: PaymentVariant,
    },

    /// A schema for one variant lists a field owned by another
    #[error("Field {field} belongs to {}, not {variant}", field.variant())]
    ForeignField {
        /// Misplaced field
        field: FieldId,
        /// Schema it appeared in
        variant: PaymentVariant,
    },

    /// A name in a script did not match any known variant, field or action
    #[error("Unknown {kind} '{name}'")]
    UnknownName {
        /// What was being parsed
        kind: String,
        /// The unrecognized input
        name: String,
    },

    /// Invalid monetary amount
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The invalid amount string
        amount: String,
    },

    /// A money computation exceeded the range of `Decimal`
    ///
    /// This is a recoverable error - the order is left as it was.
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Computation that would overflow
        operation: String,
    },

    /// The payment processor task stopped before answering
    #[error("Payment processor unavailable: {message}")]
    ProcessorUnavailable {
        /// Why the processor could not be reached
        message: String,
    },

    /// Event script could not be parsed
    ///
    /// This is a recoverable error - the event is skipped.
    #[error("Script parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ScriptParse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Script file not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading a script or writing a report
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for CheckoutError {
    fn from(error: std::io::Error) -> Self {
        CheckoutError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for CheckoutError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        CheckoutError::ScriptParse {
            line,
            message: error.to_string(),
        }
    }
}

impl CheckoutError {
    /// Create an InvalidTransition error
    pub fn invalid_transition(screen: Screen, action: FlowAction) -> Self {
        CheckoutError::InvalidTransition { screen, action }
    }

    /// Create an UnknownField error
    pub fn unknown_field(field: FieldId, variant: PaymentVariant) -> Self {
        CheckoutError::UnknownField { field, variant }
    }

    /// Create a NoPendingSubmission error
    pub fn no_pending_submission(screen: Screen) -> Self {
        CheckoutError::NoPendingSubmission { screen }
    }

    /// Create a MissingSchema error
    pub fn missing_schema(variant: PaymentVariant) -> Self {
        CheckoutError::MissingSchema { variant }
    }

    /// Create a DuplicateSchema error
    pub fn duplicate_schema(variant: PaymentVariant) -> Self {
        CheckoutError::DuplicateSchema { variant }
    }

    /// Create a DuplicateField error
    pub fn duplicate_field(field: FieldId, variant: PaymentVariant) -> Self {
        CheckoutError::DuplicateField { field, variant }
    }

    /// Create a ForeignField error
    pub fn foreign_field(field: FieldId, variant: PaymentVariant) -> Self {
        CheckoutError::ForeignField { field, variant }
    }

    /// Create an UnknownName error
    pub fn unknown_name(kind: &str, name: &str) -> Self {
        CheckoutError::UnknownName {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str) -> Self {
        CheckoutError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        CheckoutError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create a ProcessorUnavailable error
    pub fn processor_unavailable(message: impl Into<String>) -> Self {
        CheckoutError::ProcessorUnavailable {
            message: message.into(),
        }
    }

    /// Create a ScriptParse error
    pub fn script_parse(line: Option<u64>, message: impl Into<String>) -> Self {
        CheckoutError::ScriptParse {
            line,
            message: message.into(),
        }
    }
}
