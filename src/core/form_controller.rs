//! Checkout form controller
//!
//! This module provides the `FormController`, which binds one variant's
//! [`FieldSchema`] to user input.
//!
//! The controller is responsible for:
//! - Storing field values, applying masks so stored values are canonical
//! - Tracking one error per field, surfaced after the first submit attempt
//! - Validating every field at once and producing a typed payload
//! - Guarding against re-submission while a payment is pending
//!
//! # Pending policy
//!
//! While a submission is pending, `submit` is a silent no-op and edits are
//! rejected with [`CheckoutError::SubmissionPending`], so the values the
//! user sees always match the payload in flight.

use crate::types::{CheckoutError, FieldId, FieldSchema, PaymentVariant, ValidatedPayload, ValidationErrors};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Values and errors of the bound form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<FieldId, String>,
    errors: BTreeMap<FieldId, String>,
}

impl FormState {
    /// Empty state with one blank value per schema field
    fn for_schema(schema: &FieldSchema) -> Self {
        FormState {
            values: schema.fields().iter().map(|def| (def.id, String::new())).collect(),
            errors: BTreeMap::new(),
        }
    }

    /// Stored value of `field`
    pub fn value(&self, field: FieldId) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Current error of `field`, if any
    pub fn error(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Every field and its stored value, in form order
    pub fn values(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Every failing field and its error, in form order
    pub fn errors(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether every field is blank
    pub fn is_blank(&self) -> bool {
        self.values.values().all(String::is_empty)
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Form is valid; the controller is now pending
    Accepted(ValidatedPayload),

    /// Form is invalid; errors were stored in the form state
    Rejected(ValidationErrors),

    /// A submission is already pending; nothing happened
    Ignored,
}

/// Binds a schema to user input
#[derive(Debug, Clone)]
pub struct FormController {
    schema: Arc<FieldSchema>,
    state: FormState,
    pending: bool,
    /// Set by the first submit attempt; edits re-validate from then on
    submitted: bool,
}

impl FormController {
    /// Create a controller bound to `schema`
    pub fn new(schema: Arc<FieldSchema>) -> Self {
        let state = FormState::for_schema(&schema);
        FormController {
            schema,
            state,
            pending: false,
            submitted: false,
        }
    }

    /// Replace the form with a fresh one for `schema`
    ///
    /// All values become blank, errors and the pending flag are cleared.
    pub fn bind(&mut self, schema: Arc<FieldSchema>) {
        *self = FormController::new(schema);
    }

    /// Variant of the bound schema
    pub fn variant(&self) -> PaymentVariant {
        self.schema.variant()
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Store a new value for `field`
    ///
    /// Masked fields store their canonical form. After the first submit
    /// attempt, the edited field is re-validated and its error updated.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A submission is pending
    /// - `field` is not part of the bound schema
    pub fn set_field(&mut self, field: FieldId, raw: &str) -> Result<(), CheckoutError> {
        if self.pending {
            return Err(CheckoutError::SubmissionPending);
        }

        let def = self
            .schema
            .field(field)
            .ok_or_else(|| CheckoutError::unknown_field(field, self.schema.variant()))?;

        let stored = def.normalize(raw);

        if self.submitted {
            match def.validate(&stored) {
                Ok(()) => {
                    self.state.errors.remove(&field);
                }
                Err(message) => {
                    self.state.errors.insert(field, message);
                }
            }
        }

        debug!(field = %field, revalidated = self.submitted, "Field updated");
        self.state.values.insert(field, stored);
        Ok(())
    }

    /// Validate every field
    ///
    /// # Errors
    ///
    /// Returns the errors of every failing field, not only the first.
    pub fn validate(&self) -> Result<ValidatedPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for def in self.schema.fields() {
            let value = self.state.value(def.id).unwrap_or_default();
            if let Err(message) = def.validate(value) {
                errors.insert(def.id, message);
            }
        }

        if errors.is_empty() {
            Ok(ValidatedPayload::from_values(self.schema.variant(), &self.state.values))
        } else {
            Err(errors)
        }
    }

    /// Attempt to submit the form
    ///
    /// A valid form moves the controller into the pending state; an invalid
    /// one stores its errors. Either way, the attempt turns on re-validation
    /// of subsequent edits.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.pending {
            debug!(variant = %self.variant(), "Submit ignored while pending");
            return SubmitOutcome::Ignored;
        }

        self.submitted = true;

        match self.validate() {
            Ok(payload) => {
                self.state.errors.clear();
                self.pending = true;
                SubmitOutcome::Accepted(payload)
            }
            Err(errors) => {
                self.state.errors = errors.clone().into_inner();
                SubmitOutcome::Rejected(errors)
            }
        }
    }

    /// Leave the pending state after the processor answered
    pub fn resolve(&mut self) {
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CheckoutConfig;
    use crate::core::schema_registry::SchemaRegistry;

    fn controller(variant: PaymentVariant) -> FormController {
        let registry = SchemaRegistry::standard(&CheckoutConfig::new("BRL", 2025));
        FormController::new(Arc::clone(registry.schema_for(variant)))
    }

    fn fill_card(form: &mut FormController) {
        form.set_field(FieldId::CardNumber, "4111111111111111").unwrap();
        form.set_field(FieldId::CardholderName, "Jane Doe").unwrap();
        form.set_field(FieldId::ExpiryMonth, "07").unwrap();
        form.set_field(FieldId::ExpiryYear, "2030").unwrap();
        form.set_field(FieldId::Cvv, "123").unwrap();
    }

    #[test]
    fn test_new_form_is_blank() {
        let form = controller(PaymentVariant::CreditCard);
        assert!(form.state().is_blank());
        assert!(!form.state().has_errors());
        assert_eq!(form.state().values().count(), 5);
        assert!(!form.is_pending());
    }

    #[test]
    fn test_card_number_is_stored_grouped() {
        let mut form = controller(PaymentVariant::CreditCard);
        form.set_field(FieldId::CardNumber, "4111111111111111").unwrap();
        assert_eq!(form.state().value(FieldId::CardNumber), Some("4111 1111 1111 1111"));
    }

    #[test]
    fn test_plain_fields_are_stored_verbatim() {
        let mut form = controller(PaymentVariant::CreditCard);
        form.set_field(FieldId::CardholderName, "  Jane  ").unwrap();
        assert_eq!(form.state().value(FieldId::CardholderName), Some("  Jane  "));
    }

    #[test]
    fn test_field_of_other_variant_is_rejected() {
        let mut form = controller(PaymentVariant::Boleto);
        let result = form.set_field(FieldId::CardNumber, "4111111111111111");
        assert_eq!(
            result,
            Err(CheckoutError::unknown_field(FieldId::CardNumber, PaymentVariant::Boleto))
        );
        assert_eq!(form.state().value(FieldId::CardNumber), None);
    }

    #[test]
    fn test_edits_do_not_surface_errors_before_first_submit() {
        let mut form = controller(PaymentVariant::CreditCard);
        form.set_field(FieldId::Cvv, "1").unwrap();
        assert!(!form.state().has_errors());
    }

    #[test]
    fn test_empty_boleto_reports_both_errors() {
        let mut form = controller(PaymentVariant::Boleto);

        let errors = match form.submit() {
            SubmitOutcome::Rejected(errors) => errors,
            other => panic!("Expected rejection, got {:?}", other),
        };

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(FieldId::DocumentId), Some("CPF/CNPJ is required"));
        assert_eq!(errors.get(FieldId::HolderName), Some("Full name is required"));
        assert_eq!(form.state().error(FieldId::DocumentId), Some("CPF/CNPJ is required"));
        assert!(!form.is_pending());
    }

    #[test]
    fn test_edit_after_failed_submit_revalidates_field() {
        let mut form = controller(PaymentVariant::CreditCard);
        fill_card(&mut form);
        form.set_field(FieldId::Cvv, "12").unwrap();

        assert!(matches!(form.submit(), SubmitOutcome::Rejected(_)));
        assert_eq!(form.state().error(FieldId::Cvv), Some("CVV must be at least 3 digits"));

        form.set_field(FieldId::Cvv, "1234").unwrap();
        assert_eq!(form.state().error(FieldId::Cvv), None);

        form.set_field(FieldId::Cvv, "12345").unwrap();
        assert_eq!(form.state().error(FieldId::Cvv), Some("CVV cannot exceed 4 digits"));
    }

    #[test]
    fn test_valid_submit_enters_pending_and_ignores_repeats() {
        let mut form = controller(PaymentVariant::CreditCard);
        fill_card(&mut form);

        let payload = match form.submit() {
            SubmitOutcome::Accepted(payload) => payload,
            other => panic!("Expected acceptance, got {:?}", other),
        };
        assert_eq!(payload.variant(), PaymentVariant::CreditCard);
        assert!(form.is_pending());

        assert_eq!(form.submit(), SubmitOutcome::Ignored);
    }

    #[test]
    fn test_edits_rejected_while_pending() {
        let mut form = controller(PaymentVariant::CreditCard);
        fill_card(&mut form);
        form.submit();

        assert_eq!(
            form.set_field(FieldId::Cvv, "999"),
            Err(CheckoutError::SubmissionPending)
        );
        assert_eq!(form.state().value(FieldId::Cvv), Some("123"));

        form.resolve();
        assert!(form.set_field(FieldId::Cvv, "999").is_ok());
    }

    #[test]
    fn test_bind_discards_previous_state() {
        let registry = SchemaRegistry::standard(&CheckoutConfig::new("BRL", 2025));
        let mut form = FormController::new(Arc::clone(registry.schema_for(PaymentVariant::CreditCard)));
        fill_card(&mut form);
        form.submit();

        form.bind(Arc::clone(registry.schema_for(PaymentVariant::CreditCard)));

        assert!(form.state().is_blank());
        assert!(!form.is_pending());
        form.set_field(FieldId::Cvv, "1").unwrap();
        assert!(!form.state().has_errors());
    }

    #[test]
    fn test_validate_does_not_mutate_state() {
        let form = controller(PaymentVariant::BankTransfer);
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(!form.state().has_errors());
    }
}
