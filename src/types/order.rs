//! Order-related types for the checkout
//!
//! This module defines the order summary shown beside the payment form and
//! the arithmetic that produces the amount charged.

use super::error::CheckoutError;
use rust_decimal::Decimal;
use serde::Serialize;

/// Order identifier
pub type OrderId = String;

/// A single purchased item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    /// Catalogue identifier of the item
    pub id: String,

    /// Display name
    pub name: String,

    /// Number of units
    pub quantity: u32,

    /// Price of one unit
    pub unit_price: Decimal,
}

impl LineItem {
    /// Create a new line item
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        LineItem {
            id: id.into(),
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Price of all units of this item
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the product does not fit a `Decimal`.
    pub fn line_total(&self) -> Result<Decimal, CheckoutError> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| CheckoutError::arithmetic_overflow(&format!("line total of {}", self.name)))
    }
}

/// Order summary presented during checkout
///
/// The amount sent to the payment processor is always [`OrderSummary::total`];
/// it is derived from the items rather than stored, so it cannot drift from
/// what the customer sees.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderSummary {
    /// Purchased items
    pub items: Vec<LineItem>,

    /// Shipping charge
    pub shipping: Decimal,

    /// Tax charge
    pub tax: Decimal,
}

impl OrderSummary {
    /// Create a summary with no shipping or tax
    pub fn new(items: Vec<LineItem>) -> Self {
        OrderSummary {
            items,
            shipping: Decimal::ZERO,
            tax: Decimal::ZERO,
        }
    }

    /// Create a summary charging a fixed amount with no itemization
    ///
    /// Used when the caller only knows the amount due.
    pub fn flat(amount: Decimal) -> Self {
        OrderSummary::new(vec![LineItem::new("order", "Order total", 1, amount)])
    }

    /// Set the shipping charge
    pub fn with_shipping(mut self, shipping: Decimal) -> Self {
        self.shipping = shipping;
        self
    }

    /// Set the tax charge
    pub fn with_tax(mut self, tax: Decimal) -> Self {
        self.tax = tax;
        self
    }

    /// Sum of every line total
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if a line total or the running sum overflows.
    pub fn subtotal(&self) -> Result<Decimal, CheckoutError> {
        self.items.iter().try_fold(Decimal::ZERO, |sum, item| {
            sum.checked_add(item.line_total()?)
                .ok_or_else(|| CheckoutError::arithmetic_overflow("subtotal"))
        })
    }

    /// Subtotal plus shipping plus tax
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if any step of the sum overflows.
    pub fn total(&self) -> Result<Decimal, CheckoutError> {
        self.subtotal()?
            .checked_add(self.shipping)
            .and_then(|sum| sum.checked_add(self.tax))
            .ok_or_else(|| CheckoutError::arithmetic_overflow("total"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_are_exact() {
        let order = OrderSummary::new(vec![
            LineItem::new("1", "Product 1", 2, Decimal::new(2999, 2)),
            LineItem::new("2", "Product 2", 1, Decimal::new(4999, 2)),
        ])
        .with_shipping(Decimal::new(599, 2))
        .with_tax(Decimal::new(1099, 2));

        assert_eq!(order.subtotal(), Ok(Decimal::new(10997, 2)));
        assert_eq!(order.total(), Ok(Decimal::new(12695, 2)));
    }

    #[test]
    fn test_empty_order_totals_zero() {
        let order = OrderSummary::default();
        assert_eq!(order.subtotal(), Ok(Decimal::ZERO));
        assert_eq!(order.total(), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_flat_order_charges_amount() {
        let order = OrderSummary::flat(Decimal::new(12999, 2));
        assert_eq!(order.total(), Ok(Decimal::new(12999, 2)));
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn test_line_total_overflow_is_an_error() {
        let item = LineItem::new("1", "Big", 2, Decimal::MAX);
        assert_eq!(
            item.line_total(),
            Err(CheckoutError::ArithmeticOverflow {
                operation: "line total of Big".to_string()
            })
        );
    }

    #[test]
    fn test_subtotal_overflow_is_an_error() {
        let order = OrderSummary::new(vec![
            LineItem::new("1", "First", 1, Decimal::MAX),
            LineItem::new("2", "Second", 1, Decimal::ONE),
        ]);
        assert_eq!(order.subtotal(), Err(CheckoutError::arithmetic_overflow("subtotal")));
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let order = OrderSummary::flat(Decimal::MAX).with_tax(Decimal::ONE);
        assert_eq!(order.total(), Err(CheckoutError::arithmetic_overflow("total")));
    }
}
