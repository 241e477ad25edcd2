//! Checkout configuration

use chrono::{Datelike, NaiveDate};

/// Settings that shape the checkout's schemas and context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// ISO currency code charged for every order
    pub currency: String,

    /// First year offered for card expiry
    pub current_year: i32,

    /// Number of years after `current_year` offered for card expiry
    pub expiry_year_span: i32,

    /// Date printed on receipts; `None` reads the local clock at payment time
    pub payment_date: Option<NaiveDate>,
}

impl CheckoutConfig {
    /// Default number of future expiry years
    pub const DEFAULT_EXPIRY_YEAR_SPAN: i32 = 10;

    /// Default currency
    pub const DEFAULT_CURRENCY: &'static str = "BRL";

    /// Create a configuration with an explicit current year
    pub fn new(currency: impl Into<String>, current_year: i32) -> Self {
        CheckoutConfig {
            currency: currency.into(),
            current_year,
            expiry_year_span: Self::DEFAULT_EXPIRY_YEAR_SPAN,
            payment_date: None,
        }
    }

    /// Fix the date printed on receipts
    pub fn with_payment_date(mut self, date: NaiveDate) -> Self {
        self.payment_date = Some(date);
        self
    }

    /// Date of a payment confirmed now
    pub fn receipt_date(&self) -> NaiveDate {
        self.payment_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Expiry years offered by the card form, oldest first
    ///
    /// The list always contains `current_year`; it stops early at `i32::MAX`.
    pub fn expiry_years(&self) -> Vec<String> {
        let last = self.current_year.saturating_add(self.expiry_year_span.max(0));
        (self.current_year..=last)
            .map(|year| year.to_string())
            .collect()
    }
}

impl Default for CheckoutConfig {
    /// Default currency, with the current year read from the local clock
    fn default() -> Self {
        CheckoutConfig::new(Self::DEFAULT_CURRENCY, chrono::Local::now().year())
    }
}
