//! Validated payment payloads and the messages exchanged with the processor
//!
//! A form that passes validation is converted into a [`ValidatedPayload`],
//! a tagged union with one concrete struct per payment variant. Fields that
//! belong to another variant have nowhere to live, so they cannot leak into
//! a request.

use super::order::OrderId;
use super::variant::{FieldId, PaymentVariant};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Credit card details
///
/// `card_number` holds digits only; the grouped display form stays in the
/// form state.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CreditCardDetails {
    pub card_number: String,
    pub cardholder_name: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: String,
}

impl CreditCardDetails {
    /// Last four digits of the card number
    pub fn last_four(&self) -> &str {
        let start = self.card_number.len().saturating_sub(4);
        &self.card_number[start..]
    }
}

// Card data must never end up in logs.
impl fmt::Debug for CreditCardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCardDetails")
            .field("card_number", &format_args!("•••• {}", self.last_four()))
            .field("cardholder_name", &self.cardholder_name)
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"***")
            .finish()
    }
}

/// Pix payer identification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixDetails {
    pub payer_document: String,
}

/// Bank transfer details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankTransferDetails {
    pub bank_name: String,
    pub account_number: String,
    pub bank_branch: String,
}

/// Boleto payer details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoletoDetails {
    pub document_id: String,
    pub holder_name: String,
}

/// Voucher redemption details
///
/// `voucher_code` keeps its canonical dashed grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoucherDetails {
    pub voucher_code: String,
}

/// Payment details that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum ValidatedPayload {
    CreditCard(CreditCardDetails),
    Pix(PixDetails),
    BankTransfer(BankTransferDetails),
    Boleto(BoletoDetails),
    Voucher(VoucherDetails),
}

impl ValidatedPayload {
    /// Build the payload for `variant` from validated form values
    ///
    /// Masked card numbers are reduced to digits. Values missing from
    /// `values` become empty strings; the form controller only calls this
    /// after every schema field validated.
    pub fn from_values(variant: PaymentVariant, values: &BTreeMap<FieldId, String>) -> Self {
        let take = |field: FieldId| values.get(&field).cloned().unwrap_or_default();

        match variant {
            PaymentVariant::CreditCard => ValidatedPayload::CreditCard(CreditCardDetails {
                card_number: take(FieldId::CardNumber)
                    .chars()
                    .filter(char::is_ascii_digit)
                    .collect(),
                cardholder_name: take(FieldId::CardholderName),
                expiry_month: take(FieldId::ExpiryMonth),
                expiry_year: take(FieldId::ExpiryYear),
                cvv: take(FieldId::Cvv),
            }),
            PaymentVariant::Pix => ValidatedPayload::Pix(PixDetails {
                payer_document: take(FieldId::PayerDocument),
            }),
            PaymentVariant::BankTransfer => ValidatedPayload::BankTransfer(BankTransferDetails {
                bank_name: take(FieldId::BankName),
                account_number: take(FieldId::AccountNumber),
                bank_branch: take(FieldId::BankBranch),
            }),
            PaymentVariant::Boleto => ValidatedPayload::Boleto(BoletoDetails {
                document_id: take(FieldId::DocumentId),
                holder_name: take(FieldId::HolderName),
            }),
            PaymentVariant::Voucher => ValidatedPayload::Voucher(VoucherDetails {
                voucher_code: take(FieldId::VoucherCode),
            }),
        }
    }

    pub fn variant(&self) -> PaymentVariant {
        match self {
            ValidatedPayload::CreditCard(_) => PaymentVariant::CreditCard,
            ValidatedPayload::Pix(_) => PaymentVariant::Pix,
            ValidatedPayload::BankTransfer(_) => PaymentVariant::BankTransfer,
            ValidatedPayload::Boleto(_) => PaymentVariant::Boleto,
            ValidatedPayload::Voucher(_) => PaymentVariant::Voucher,
        }
    }

    /// Field values keyed by field, in form order
    pub fn values(&self) -> Vec<(FieldId, &str)> {
        match self {
            ValidatedPayload::CreditCard(card) => vec![
                (FieldId::CardNumber, card.card_number.as_str()),
                (FieldId::CardholderName, card.cardholder_name.as_str()),
                (FieldId::ExpiryMonth, card.expiry_month.as_str()),
                (FieldId::ExpiryYear, card.expiry_year.as_str()),
                (FieldId::Cvv, card.cvv.as_str()),
            ],
            ValidatedPayload::Pix(pix) => vec![(FieldId::PayerDocument, pix.payer_document.as_str())],
            ValidatedPayload::BankTransfer(bank) => vec![
                (FieldId::BankName, bank.bank_name.as_str()),
                (FieldId::AccountNumber, bank.account_number.as_str()),
                (FieldId::BankBranch, bank.bank_branch.as_str()),
            ],
            ValidatedPayload::Boleto(boleto) => vec![
                (FieldId::DocumentId, boleto.document_id.as_str()),
                (FieldId::HolderName, boleto.holder_name.as_str()),
            ],
            ValidatedPayload::Voucher(voucher) => {
                vec![(FieldId::VoucherCode, voucher.voucher_code.as_str())]
            }
        }
    }

    /// Payment method description for receipts, e.g. `Credit Card (•••• 4242)`
    pub fn method_label(&self) -> String {
        match self {
            ValidatedPayload::CreditCard(card) => {
                format!("{} (•••• {})", self.variant().label(), card.last_four())
            }
            _ => self.variant().label().to_string(),
        }
    }
}

/// Field errors from a failed validation, in form order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldId, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        ValidationErrors(BTreeMap::new())
    }

    pub fn insert(&mut self, field: FieldId, message: String) {
        self.0.insert(field, message);
    }

    /// Error for `field`, if it failed
    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub(crate) fn into_inner(self) -> BTreeMap<FieldId, String> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Request handed to the payment processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingRequest {
    pub order_id: OrderId,
    pub variant: PaymentVariant,
    pub payload: ValidatedPayload,
    pub amount: Decimal,
    pub currency: String,
}

/// Result reported back by the payment processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingResult {
    /// Payment accepted
    Success { confirmation_id: String },

    /// Payment rejected; code and message are shown to the user unchanged
    Failure { code: String, message: String },
}

impl ProcessingResult {
    pub fn success(confirmation_id: impl Into<String>) -> Self {
        ProcessingResult::Success {
            confirmation_id: confirmation_id.into(),
        }
    }

    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        ProcessingResult::Failure {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_values() -> BTreeMap<FieldId, String> {
        BTreeMap::from([
            (FieldId::CardNumber, "4111 1111 1111 4242".to_string()),
            (FieldId::CardholderName, "Jane Doe".to_string()),
            (FieldId::ExpiryMonth, "07".to_string()),
            (FieldId::ExpiryYear, "2030".to_string()),
            (FieldId::Cvv, "123".to_string()),
        ])
    }

    #[test]
    fn test_card_payload_carries_digits_only() {
        let payload = ValidatedPayload::from_values(PaymentVariant::CreditCard, &card_values());
        match &payload {
            ValidatedPayload::CreditCard(card) => {
                assert_eq!(card.card_number, "4111111111114242");
                assert_eq!(card.last_four(), "4242");
            }
            other => panic!("Expected credit card payload, got {:?}", other),
        }
        assert_eq!(payload.method_label(), "Credit Card (•••• 4242)");
    }

    #[test]
    fn test_card_debug_output_is_redacted() {
        let payload = ValidatedPayload::from_values(PaymentVariant::CreditCard, &card_values());
        let debug = format!("{:?}", payload);
        assert!(!debug.contains("4111111111114242"));
        assert!(!debug.contains("\"123\""));
        assert!(debug.contains("•••• 4242"));
    }

    #[test]
    fn test_payload_ignores_fields_of_other_variants() {
        let mut values = card_values();
        values.insert(FieldId::DocumentId, "123.456.789-00".to_string());
        values.insert(FieldId::HolderName, "Joao Silva".to_string());

        let payload = ValidatedPayload::from_values(PaymentVariant::Boleto, &values);
        assert_eq!(
            payload.values(),
            vec![
                (FieldId::DocumentId, "123.456.789-00"),
                (FieldId::HolderName, "Joao Silva"),
            ]
        );
        assert_eq!(payload.method_label(), "Boleto");
    }

    #[test]
    fn test_validation_errors_display_in_form_order() {
        let mut errors = ValidationErrors::new();
        errors.insert(FieldId::HolderName, "Full name is required".to_string());
        errors.insert(FieldId::DocumentId, "CPF/CNPJ is required".to_string());

        assert_eq!(
            errors.to_string(),
            "document_id: CPF/CNPJ is required; holder_name: Full name is required"
        );
    }
}
