//! CSV format handling for event scripts and step reports
//!
//! This module centralizes all CSV format concerns, providing:
//! - ScriptRecord structure for deserialization
//! - Conversion from script records to checkout events
//! - Step report serialization
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Script format
//!
//! Columns `action,key,value`. `key` and `value` are optional and their
//! meaning depends on the action:
//!
//! | action     | key              | value                      |
//! |------------|------------------|----------------------------|
//! | `item`     | item name        | `quantity@unit_price` or `unit_price` |
//! | `shipping` |                  | amount                     |
//! | `tax`      |                  | amount                     |
//! | `start`    | order id         | flat amount (else the cart total) |
//! | `select`   | payment variant  |                            |
//! | `back`     |                  |                            |
//! | `edit`     | field            | raw input                  |
//! | `submit`   |                  |                            |
//! | `succeed`  | confirmation id  |                            |
//! | `fail`     | error code       | message                    |
//! | `retry`, `cancel`, `continue` | |                         |

use crate::types::{CheckoutError, FieldId, PaymentVariant, ProcessingResult, Screen};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScriptRecord {
    pub action: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// One user action or processor verdict from a script
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutEvent {
    /// Add a line item to the cart of the next order
    Item {
        name: String,
        quantity: u32,
        unit_price: Decimal,
    },
    /// Set the shipping charge of the next order
    Shipping(Decimal),
    /// Set the tax charge of the next order
    Tax(Decimal),
    /// Start checkout, charging `amount` if given, else the cart total
    Start {
        order_id: String,
        amount: Option<Decimal>,
    },
    Select(PaymentVariant),
    Back,
    Edit { field: FieldId, value: String },
    Submit,
    /// Processor answer for the pending submission
    Verdict(ProcessingResult),
    Retry,
    Cancel,
    Continue,
}

impl CheckoutEvent {
    /// Script name of the action
    pub fn action(&self) -> &'static str {
        match self {
            CheckoutEvent::Item { .. } => "item",
            CheckoutEvent::Shipping(_) => "shipping",
            CheckoutEvent::Tax(_) => "tax",
            CheckoutEvent::Start { .. } => "start",
            CheckoutEvent::Select(_) => "select",
            CheckoutEvent::Back => "back",
            CheckoutEvent::Edit { .. } => "edit",
            CheckoutEvent::Submit => "submit",
            CheckoutEvent::Verdict(result) => verdict_action(result),
            CheckoutEvent::Retry => "retry",
            CheckoutEvent::Cancel => "cancel",
            CheckoutEvent::Continue => "continue",
        }
    }
}

/// Script name of a processor verdict
pub fn verdict_action(result: &ProcessingResult) -> &'static str {
    match result {
        ProcessingResult::Success { .. } => "succeed",
        ProcessingResult::Failure { .. } => "fail",
    }
}

/// Convert a ScriptRecord to a CheckoutEvent
///
/// # Arguments
///
/// * `record` - The deserialized script record
///
/// # Returns
///
/// Result containing either:
/// - Ok(CheckoutEvent) - Successfully converted record
/// - Err(CheckoutError) - Unknown action, variant or field, missing key, or bad amount
pub fn convert_script_record(record: ScriptRecord) -> Result<CheckoutEvent, CheckoutError> {
    let action = record.action.trim().to_lowercase();
    let key = non_blank(record.key);
    let value = non_blank(record.value);

    let require_key = |what: &str| {
        key.clone()
            .ok_or_else(|| CheckoutError::script_parse(None, format!("{} requires {}", action, what)))
    };

    let event = match action.as_str() {
        "item" => {
            let name = require_key("an item name")?;
            let value = value.ok_or_else(|| {
                CheckoutError::script_parse(None, format!("item '{}' requires a price", name))
            })?;
            let (quantity, unit_price) = parse_item_price(&value)?;
            CheckoutEvent::Item {
                name,
                quantity,
                unit_price,
            }
        }
        "shipping" => CheckoutEvent::Shipping(parse_amount(value.as_deref().unwrap_or_default())?),
        "tax" => CheckoutEvent::Tax(parse_amount(value.as_deref().unwrap_or_default())?),
        "start" => CheckoutEvent::Start {
            order_id: require_key("an order id")?,
            amount: value.as_deref().map(parse_amount).transpose()?,
        },
        "select" => CheckoutEvent::Select(PaymentVariant::from_str(&require_key("a payment variant")?)?),
        "back" => CheckoutEvent::Back,
        "edit" => CheckoutEvent::Edit {
            field: FieldId::from_str(&require_key("a field")?)?,
            value: value.unwrap_or_default(),
        },
        "submit" => CheckoutEvent::Submit,
        "succeed" => CheckoutEvent::Verdict(ProcessingResult::success(require_key("a confirmation id")?)),
        "fail" => CheckoutEvent::Verdict(ProcessingResult::failure(
            require_key("an error code")?,
            value.unwrap_or_default(),
        )),
        "retry" => CheckoutEvent::Retry,
        "cancel" => CheckoutEvent::Cancel,
        "continue" => CheckoutEvent::Continue,
        _ => return Err(CheckoutError::unknown_name("action", record.action.trim())),
    };

    Ok(event)
}

fn non_blank(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

/// Parse a non-negative monetary amount
fn parse_amount(raw: &str) -> Result<Decimal, CheckoutError> {
    match Decimal::from_str(raw.trim()) {
        Ok(amount) if !amount.is_sign_negative() => Ok(amount),
        _ => Err(CheckoutError::invalid_amount(raw)),
    }
}

/// Parse `quantity@unit_price`, or a bare unit price for a single unit
fn parse_item_price(raw: &str) -> Result<(u32, Decimal), CheckoutError> {
    match raw.split_once('@') {
        Some((quantity, price)) => {
            let quantity = quantity
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|q| *q > 0)
                .ok_or_else(|| CheckoutError::script_parse(None, format!("Invalid quantity '{}'", quantity.trim())))?;
            Ok((quantity, parse_amount(price)?))
        }
        None => Ok((1, parse_amount(raw)?)),
    }
}

/// Result of applying one script event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepResult {
    /// The event was applied
    Ok,
    /// Submit found field errors
    Invalid,
    /// Submit while pending; nothing happened
    Ignored,
    /// The event was rejected
    Error,
}

/// One line of the step report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub step: u64,
    pub action: &'static str,
    pub screen: Screen,
    pub variant: PaymentVariant,
    pub result: StepResult,
    /// Payment outcome after the step, empty if none
    pub payment: Option<&'static str>,
    pub detail: String,
}

/// Write step report rows in CSV format
///
/// Writes columns: step, action, screen, variant, result, payment, detail.
/// The header is written even when there are no rows.
///
/// # Arguments
///
/// * `rows` - Report rows in step order
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Errors
///
/// Returns an error if writing to `output` fails.
pub fn write_report_csv(rows: &[ReportRow], output: &mut dyn Write) -> Result<(), CheckoutError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer.write_record(["step", "action", "screen", "variant", "result", "payment", "detail"])?;

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}
