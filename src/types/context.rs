//! Cross-screen checkout state
//!
//! The [`CheckoutContext`] travels with the user from method selection to the
//! outcome screens. Only the flow controller mutates it; everything else gets
//! a shared reference.

use super::order::OrderId;
use super::variant::PaymentVariant;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Why a payment attempt failed, as reported by the processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReason {
    /// Opaque processor error code, e.g. `ERR-5001`
    pub code: String,

    /// Message shown to the user
    pub message: String,
}

/// Outcome of the latest submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// Submitted; waiting for the processor
    Pending,

    /// Processor accepted the payment
    Success { confirmation_id: String },

    /// Processor rejected the payment
    Failure(FailureReason),
}

impl PaymentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentOutcome::Pending => "pending",
            PaymentOutcome::Success { .. } => "success",
            PaymentOutcome::Failure(_) => "failure",
        }
    }
}

impl fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentOutcome::Pending => f.write_str("pending"),
            PaymentOutcome::Success { confirmation_id } => write!(f, "success({confirmation_id})"),
            PaymentOutcome::Failure(reason) => write!(f, "failure({}: {})", reason.code, reason.message),
        }
    }
}

/// Data shared by every checkout screen
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckoutContext {
    /// Order being paid for; `None` before checkout starts
    pub order_id: Option<OrderId>,

    /// Amount due
    pub amount: Decimal,

    /// ISO currency code
    pub currency: String,

    /// Active payment method
    pub variant: PaymentVariant,

    /// Result of the latest submission, if any
    pub outcome: Option<PaymentOutcome>,
}

impl CheckoutContext {
    /// Whether a submission is waiting for the processor
    pub fn is_pending(&self) -> bool {
        matches!(self.outcome, Some(PaymentOutcome::Pending))
    }
}

/// Proof of a successful payment, shown on the confirmation screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub order_id: OrderId,
    pub confirmation_id: String,
    pub amount: Decimal,
    pub currency: String,

    /// e.g. `Credit Card (•••• 4242)`
    pub payment_method: String,

    pub paid_on: NaiveDate,
}
