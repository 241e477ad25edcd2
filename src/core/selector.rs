//! Payment method selector
//!
//! Holds the active payment variant. Selecting a different variant produces
//! a [`VariantChange`] event; the flow controller reacts to it by rebinding
//! the form, so no field value survives a change of method.

use crate::types::PaymentVariant;

/// Emitted when the active variant changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantChange {
    pub from: PaymentVariant,
    pub to: PaymentVariant,
}

/// Tracks the selected payment variant
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentMethodSelector {
    current: PaymentVariant,
}

impl PaymentMethodSelector {
    /// Selector with the default variant (`CreditCard`)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> PaymentVariant {
        self.current
    }

    /// Select `variant`
    ///
    /// Returns `None` when `variant` is already selected; no reset should
    /// follow in that case.
    pub fn select(&mut self, variant: PaymentVariant) -> Option<VariantChange> {
        if variant == self.current {
            return None;
        }

        let change = VariantChange {
            from: self.current,
            to: variant,
        };
        self.current = variant;
        Some(change)
    }

    /// Return to the default variant
    pub fn reset(&mut self) {
        self.current = PaymentVariant::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_credit_card() {
        assert_eq!(PaymentMethodSelector::new().current(), PaymentVariant::CreditCard);
    }

    #[test]
    fn test_reselecting_current_variant_emits_nothing() {
        let mut selector = PaymentMethodSelector::new();
        assert_eq!(selector.select(PaymentVariant::CreditCard), None);
        assert_eq!(selector.current(), PaymentVariant::CreditCard);
    }

    #[test]
    fn test_selecting_new_variant_emits_change() {
        let mut selector = PaymentMethodSelector::new();

        assert_eq!(
            selector.select(PaymentVariant::Pix),
            Some(VariantChange {
                from: PaymentVariant::CreditCard,
                to: PaymentVariant::Pix,
            })
        );
        assert_eq!(selector.current(), PaymentVariant::Pix);
        assert_eq!(selector.select(PaymentVariant::Pix), None);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut selector = PaymentMethodSelector::new();
        selector.select(PaymentVariant::Voucher);
        selector.reset();
        assert_eq!(selector.current(), PaymentVariant::CreditCard);
    }
}
