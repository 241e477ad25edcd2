//! Payment variant and field identifiers
//!
//! This module defines the closed set of payment methods a checkout can use
//! and the closed set of input fields those methods collect. Every field
//! belongs to exactly one variant, so a form bound to one method can never
//! carry another method's data.

use super::error::CheckoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment methods supported by the checkout
///
/// Exactly one variant is active at a time. The default is `CreditCard`,
/// matching the tab that is open when the checkout page first loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentVariant {
    /// Card number, holder, expiry and CVV
    #[default]
    CreditCard,

    /// Instant transfer paid out-of-band with a copy-paste code
    Pix,

    /// Bank name, account and branch
    BankTransfer,

    /// Printable payment slip identified by the payer's tax document
    Boleto,

    /// Prepaid voucher code
    Voucher,
}

impl PaymentVariant {
    /// Every variant, in selector order
    pub const ALL: [PaymentVariant; 5] = [
        PaymentVariant::CreditCard,
        PaymentVariant::Pix,
        PaymentVariant::BankTransfer,
        PaymentVariant::Boleto,
        PaymentVariant::Voucher,
    ];

    /// Stable machine name, used in event scripts and reports
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentVariant::CreditCard => "credit_card",
            PaymentVariant::Pix => "pix",
            PaymentVariant::BankTransfer => "bank_transfer",
            PaymentVariant::Boleto => "boleto",
            PaymentVariant::Voucher => "voucher",
        }
    }

    /// Human-readable label shown on receipts
    pub fn label(self) -> &'static str {
        match self {
            PaymentVariant::CreditCard => "Credit Card",
            PaymentVariant::Pix => "PIX",
            PaymentVariant::BankTransfer => "Bank Transfer",
            PaymentVariant::Boleto => "Boleto",
            PaymentVariant::Voucher => "Voucher",
        }
    }

    /// Position of this variant in [`PaymentVariant::ALL`]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PaymentVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentVariant {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "credit_card" => Ok(PaymentVariant::CreditCard),
            "pix" => Ok(PaymentVariant::Pix),
            "bank_transfer" => Ok(PaymentVariant::BankTransfer),
            "boleto" => Ok(PaymentVariant::Boleto),
            "voucher" => Ok(PaymentVariant::Voucher),
            _ => Err(CheckoutError::unknown_name("payment variant", s)),
        }
    }
}

/// Input fields across all payment variants
///
/// Declaration order matches the order fields are laid out in each form,
/// so ordered collections keyed by `FieldId` iterate in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    // Credit card
    CardNumber,
    CardholderName,
    ExpiryMonth,
    ExpiryYear,
    Cvv,

    // Pix
    PayerDocument,

    // Bank transfer
    BankName,
    AccountNumber,
    BankBranch,

    // Boleto
    DocumentId,
    HolderName,

    // Voucher
    VoucherCode,
}

impl FieldId {
    /// Every field, in declaration order
    pub const ALL: [FieldId; 12] = [
        FieldId::CardNumber,
        FieldId::CardholderName,
        FieldId::ExpiryMonth,
        FieldId::ExpiryYear,
        FieldId::Cvv,
        FieldId::PayerDocument,
        FieldId::BankName,
        FieldId::AccountNumber,
        FieldId::BankBranch,
        FieldId::DocumentId,
        FieldId::HolderName,
        FieldId::VoucherCode,
    ];

    /// The variant this field belongs to
    pub fn variant(self) -> PaymentVariant {
        match self {
            FieldId::CardNumber
            | FieldId::CardholderName
            | FieldId::ExpiryMonth
            | FieldId::ExpiryYear
            | FieldId::Cvv => PaymentVariant::CreditCard,
            FieldId::PayerDocument => PaymentVariant::Pix,
            FieldId::BankName | FieldId::AccountNumber | FieldId::BankBranch => {
                PaymentVariant::BankTransfer
            }
            FieldId::DocumentId | FieldId::HolderName => PaymentVariant::Boleto,
            FieldId::VoucherCode => PaymentVariant::Voucher,
        }
    }

    /// Stable machine name
    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::CardNumber => "card_number",
            FieldId::CardholderName => "cardholder_name",
            FieldId::ExpiryMonth => "expiry_month",
            FieldId::ExpiryYear => "expiry_year",
            FieldId::Cvv => "cvv",
            FieldId::PayerDocument => "payer_document",
            FieldId::BankName => "bank_name",
            FieldId::AccountNumber => "account_number",
            FieldId::BankBranch => "bank_branch",
            FieldId::DocumentId => "document_id",
            FieldId::HolderName => "holder_name",
            FieldId::VoucherCode => "voucher_code",
        }
    }

    /// Label shown next to the input
    pub fn label(self) -> &'static str {
        match self {
            FieldId::CardNumber => "Card Number",
            FieldId::CardholderName => "Cardholder Name",
            FieldId::ExpiryMonth => "Expiry Month",
            FieldId::ExpiryYear => "Expiry Year",
            FieldId::Cvv => "CVV",
            FieldId::PayerDocument => "CPF/CNPJ",
            FieldId::BankName => "Bank Name",
            FieldId::AccountNumber => "Account Number",
            FieldId::BankBranch => "Branch",
            FieldId::DocumentId => "CPF/CNPJ",
            FieldId::HolderName => "Full Name",
            FieldId::VoucherCode => "Voucher Code",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        FieldId::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| CheckoutError::unknown_name("field", s))
    }
}
