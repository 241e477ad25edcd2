//! Checkout flow controller
//!
//! This module provides the `CheckoutFlow`, which sequences the checkout
//! screens and owns every piece of cross-screen state.
//!
//! The flow enforces rules such as:
//! - Screens change only along the edges of [`Screen::can_transition_to`]
//! - Changing payment method discards the previous method's form
//! - A submission reaches the gateway once, however often submit is pressed
//! - Retrying after a failure keeps the values the user already typed
//! - Leaving the outcome screens for the landing page clears everything

use crate::core::config::CheckoutConfig;
use crate::core::form_controller::{FormController, FormState, SubmitOutcome};
use crate::core::schema_registry::SchemaRegistry;
use crate::core::selector::PaymentMethodSelector;
use crate::core::traits::{NoNavigation, Navigator, PaymentGateway};
use crate::types::{
    CheckoutContext, CheckoutError, FailureReason, FieldId, FieldSchema, FlowAction, OrderId,
    OrderSummary, PaymentOutcome, PaymentVariant, ProcessingRequest, ProcessingResult, Receipt,
    Screen,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Checkout flow state machine
///
/// Generic over the payment gateway and the navigator so drivers decide how
/// requests leave the process and how screen changes are routed.
pub struct CheckoutFlow<G: PaymentGateway, N: Navigator = NoNavigation> {
    registry: SchemaRegistry,
    config: CheckoutConfig,
    screen: Screen,
    context: CheckoutContext,
    order: Option<OrderSummary>,
    selector: PaymentMethodSelector,
    form: FormController,
    /// Method label of the submission in flight, used for the receipt
    in_flight_method: Option<String>,
    receipt: Option<Receipt>,
    gateway: G,
    navigator: N,
}

impl<G: PaymentGateway> CheckoutFlow<G, NoNavigation> {
    /// Create a flow with the standard schemas
    pub fn new(config: CheckoutConfig, gateway: G) -> Self {
        let registry = SchemaRegistry::standard(&config);
        Self::with_registry(config, registry, gateway)
    }

    /// Create a flow with a custom schema registry
    pub fn with_registry(config: CheckoutConfig, registry: SchemaRegistry, gateway: G) -> Self {
        let selector = PaymentMethodSelector::new();
        let form = FormController::new(Arc::clone(registry.schema_for(selector.current())));

        CheckoutFlow {
            registry,
            config,
            screen: Screen::Landing,
            context: CheckoutContext::default(),
            order: None,
            selector,
            form,
            in_flight_method: None,
            receipt: None,
            gateway,
            navigator: NoNavigation,
        }
    }
}

impl<G: PaymentGateway, N: Navigator> CheckoutFlow<G, N> {
    /// Replace the navigator informed of screen changes
    pub fn with_navigator<M: Navigator>(self, navigator: M) -> CheckoutFlow<G, M> {
        CheckoutFlow {
            registry: self.registry,
            config: self.config,
            screen: self.screen,
            context: self.context,
            order: self.order,
            selector: self.selector,
            form: self.form,
            in_flight_method: self.in_flight_method,
            receipt: self.receipt,
            gateway: self.gateway,
            navigator,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Cross-screen state, read-only
    pub fn context(&self) -> &CheckoutContext {
        &self.context
    }

    /// Order being paid for, once checkout has started
    pub fn order(&self) -> Option<&OrderSummary> {
        self.order.as_ref()
    }

    pub fn variant(&self) -> PaymentVariant {
        self.selector.current()
    }

    /// Schema of the bound form, for rendering inputs
    pub fn schema(&self) -> &FieldSchema {
        self.form.schema()
    }

    /// Values and errors of the bound form
    pub fn form(&self) -> &FormState {
        self.form.state()
    }

    /// Whether a submission is waiting for the processor
    pub fn is_pending(&self) -> bool {
        self.form.is_pending()
    }

    /// Receipt of the successful payment, on the confirmation screen
    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Leave the landing page and open the payment method tabs
    ///
    /// The amount charged is the order's total; the currency comes from the
    /// configuration. The form is bound to the default variant.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The flow is not on the landing screen
    /// - The order total overflows
    pub fn start_checkout(
        &mut self,
        order_id: impl Into<OrderId>,
        order: OrderSummary,
    ) -> Result<(), CheckoutError> {
        self.require(&[Screen::Landing], FlowAction::StartCheckout)?;
        let amount = order.total()?;

        self.selector.reset();
        self.rebind_form();
        self.context = CheckoutContext {
            order_id: Some(order_id.into()),
            amount,
            currency: self.config.currency.clone(),
            variant: self.selector.current(),
            outcome: None,
        };
        self.order = Some(order);

        info!(
            order_id = self.context.order_id.as_deref().unwrap_or_default(),
            amount = %self.context.amount,
            currency = %self.context.currency,
            "Checkout started"
        );
        self.transition(Screen::MethodSelection);
        Ok(())
    }

    /// Choose a payment method
    ///
    /// From the selection screen this opens the method's form. On the form
    /// screen a different method replaces the form with a blank one;
    /// choosing the current method keeps the values entered so far.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The flow is not on the selection or form screen
    /// - A submission is pending
    pub fn select_variant(&mut self, variant: PaymentVariant) -> Result<(), CheckoutError> {
        self.require(
            &[Screen::MethodSelection, Screen::MethodForm],
            FlowAction::SelectVariant,
        )?;
        if self.form.is_pending() {
            return Err(CheckoutError::SubmissionPending);
        }

        if let Some(change) = self.selector.select(variant) {
            self.rebind_form();
            self.context.variant = change.to;
            info!(from = %change.from, to = %change.to, "Payment method changed");
        }

        if self.screen == Screen::MethodSelection {
            self.transition(Screen::MethodForm);
        }
        Ok(())
    }

    /// Return from the form to the method tabs, discarding the form
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The flow is not on the form screen
    /// - A submission is pending
    pub fn back_to_selection(&mut self) -> Result<(), CheckoutError> {
        self.require(&[Screen::MethodForm], FlowAction::BackToSelection)?;
        if self.form.is_pending() {
            return Err(CheckoutError::SubmissionPending);
        }

        self.rebind_form();
        self.transition(Screen::MethodSelection);
        Ok(())
    }

    /// Update a field of the bound form
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The flow is not on the form screen
    /// - The field belongs to another payment method
    /// - A submission is pending
    pub fn edit(&mut self, field: FieldId, value: &str) -> Result<(), CheckoutError> {
        self.require(&[Screen::MethodForm], FlowAction::Edit)?;
        self.form.set_field(field, value)
    }

    /// Submit the bound form
    ///
    /// A valid form is dispatched to the gateway once and the outcome becomes
    /// `Pending`. An invalid form keeps its errors in the form state and
    /// nothing is dispatched. Submitting while pending does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error unless the flow is on the form screen.
    pub fn submit(&mut self) -> Result<SubmitOutcome, CheckoutError> {
        self.require(&[Screen::MethodForm], FlowAction::Submit)?;

        let outcome = self.form.submit();
        match &outcome {
            SubmitOutcome::Accepted(payload) => {
                let request = ProcessingRequest {
                    order_id: self.context.order_id.clone().unwrap_or_default(),
                    variant: payload.variant(),
                    payload: payload.clone(),
                    amount: self.context.amount,
                    currency: self.context.currency.clone(),
                };

                self.in_flight_method = Some(payload.method_label());
                self.context.outcome = Some(PaymentOutcome::Pending);
                info!(
                    order_id = %request.order_id,
                    variant = %request.variant,
                    amount = %request.amount,
                    "Payment dispatched"
                );
                self.gateway.dispatch(request);
            }
            SubmitOutcome::Rejected(errors) => {
                debug!(errors = errors.len(), "Submission rejected by validation");
            }
            SubmitOutcome::Ignored => {}
        }

        Ok(outcome)
    }

    /// Apply the processor's answer to the pending submission
    ///
    /// Success moves to the confirmation screen with a receipt; failure moves
    /// to the error screen with the processor's code and message.
    ///
    /// # Errors
    ///
    /// Returns an error if no submission is pending.
    pub fn on_processing_result(&mut self, result: ProcessingResult) -> Result<(), CheckoutError> {
        if !self.form.is_pending() {
            return Err(CheckoutError::no_pending_submission(self.screen));
        }
        self.form.resolve();

        match result {
            ProcessingResult::Success { confirmation_id } => {
                info!(confirmation_id = %confirmation_id, "Payment confirmed");
                self.receipt = Some(Receipt {
                    order_id: self.context.order_id.clone().unwrap_or_default(),
                    confirmation_id: confirmation_id.clone(),
                    amount: self.context.amount,
                    currency: self.context.currency.clone(),
                    payment_method: self
                        .in_flight_method
                        .take()
                        .unwrap_or_else(|| self.context.variant.label().to_string()),
                    paid_on: self.config.receipt_date(),
                });
                self.context.outcome = Some(PaymentOutcome::Success { confirmation_id });
                self.transition(Screen::Confirmation);
            }
            ProcessingResult::Failure { code, message } => {
                info!(code = %code, "Payment failed");
                self.in_flight_method = None;
                self.context.outcome = Some(PaymentOutcome::Failure(FailureReason { code, message }));
                self.transition(Screen::Error);
            }
        }
        Ok(())
    }

    /// Go back to the form after a failure, keeping its values
    ///
    /// # Errors
    ///
    /// Returns an error unless the flow is on the error screen.
    pub fn retry(&mut self) -> Result<(), CheckoutError> {
        self.require(&[Screen::Error], FlowAction::Retry)?;

        self.context.outcome = None;
        self.transition(Screen::MethodForm);
        Ok(())
    }

    /// Abandon the payment after a failure
    ///
    /// # Errors
    ///
    /// Returns an error unless the flow is on the error screen.
    pub fn cancel(&mut self) -> Result<(), CheckoutError> {
        self.require(&[Screen::Error], FlowAction::Cancel)?;

        self.clear();
        self.transition(Screen::Landing);
        Ok(())
    }

    /// Leave the confirmation screen
    ///
    /// # Errors
    ///
    /// Returns an error unless the flow is on the confirmation screen.
    pub fn continue_shopping(&mut self) -> Result<(), CheckoutError> {
        self.require(&[Screen::Confirmation], FlowAction::ContinueShopping)?;

        self.clear();
        self.transition(Screen::Landing);
        Ok(())
    }

    fn require(&self, screens: &[Screen], action: FlowAction) -> Result<(), CheckoutError> {
        if screens.contains(&self.screen) {
            Ok(())
        } else {
            Err(CheckoutError::invalid_transition(self.screen, action))
        }
    }

    fn rebind_form(&mut self) {
        let schema = Arc::clone(self.registry.schema_for(self.selector.current()));
        self.form.bind(schema);
    }

    fn clear(&mut self) {
        self.context = CheckoutContext::default();
        self.order = None;
        self.receipt = None;
        self.in_flight_method = None;
        self.selector.reset();
        self.rebind_form();
    }

    fn transition(&mut self, to: Screen) {
        debug_assert!(
            self.screen.can_transition_to(to),
            "no edge from {} to {}",
            self.screen,
            to
        );

        let from = self.screen;
        self.screen = to;
        self.navigator.navigate(from, to);
        info!(from = %from, to = %to, "Screen changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::RecordingGateway;
    use rust_decimal::Decimal;

    #[derive(Debug, Default)]
    struct RecordingNavigator {
        changes: Vec<(Screen, Screen)>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, from: Screen, to: Screen) {
            self.changes.push((from, to));
        }
    }

    fn flow() -> CheckoutFlow<RecordingGateway> {
        CheckoutFlow::new(CheckoutConfig::new("BRL", 2025), RecordingGateway::new())
    }

    fn order() -> OrderSummary {
        OrderSummary::flat(Decimal::new(12999, 2))
    }

    fn flow_on_card_form() -> CheckoutFlow<RecordingGateway> {
        let mut flow = flow();
        flow.start_checkout("ORD-1", order()).unwrap();
        flow.select_variant(PaymentVariant::CreditCard).unwrap();
        flow
    }

    fn fill_card<N: Navigator>(flow: &mut CheckoutFlow<RecordingGateway, N>) {
        flow.edit(FieldId::CardNumber, "4111111111111111").unwrap();
        flow.edit(FieldId::CardholderName, "Jane Doe").unwrap();
        flow.edit(FieldId::ExpiryMonth, "07").unwrap();
        flow.edit(FieldId::ExpiryYear, "2030").unwrap();
        flow.edit(FieldId::Cvv, "123").unwrap();
    }

    #[test]
    fn test_start_checkout_fills_context() {
        let mut flow = flow();
        flow.start_checkout("ORD-1", order()).unwrap();

        assert_eq!(flow.screen(), Screen::MethodSelection);
        assert_eq!(flow.context().order_id.as_deref(), Some("ORD-1"));
        assert_eq!(flow.context().amount, Decimal::new(12999, 2));
        assert_eq!(flow.context().currency, "BRL");
        assert_eq!(flow.context().variant, PaymentVariant::CreditCard);
        assert_eq!(flow.context().outcome, None);
    }

    #[test]
    fn test_overflowing_order_stays_on_landing() {
        let mut flow = flow();
        let order = OrderSummary::flat(Decimal::MAX).with_shipping(Decimal::ONE);

        assert_eq!(
            flow.start_checkout("ORD-1", order),
            Err(CheckoutError::arithmetic_overflow("total"))
        );
        assert_eq!(flow.screen(), Screen::Landing);
        assert_eq!(flow.context(), &CheckoutContext::default());
        assert!(flow.order().is_none());
    }

    #[test]
    fn test_no_skipping_from_landing_to_form() {
        let mut flow = flow();

        assert_eq!(
            flow.select_variant(PaymentVariant::Pix),
            Err(CheckoutError::invalid_transition(Screen::Landing, FlowAction::SelectVariant))
        );
        assert_eq!(
            flow.edit(FieldId::Cvv, "123"),
            Err(CheckoutError::invalid_transition(Screen::Landing, FlowAction::Edit))
        );
        assert_eq!(flow.screen(), Screen::Landing);
    }

    #[test]
    fn test_no_submit_from_selection() {
        let mut flow = flow();
        flow.start_checkout("ORD-1", order()).unwrap();

        assert_eq!(
            flow.submit(),
            Err(CheckoutError::invalid_transition(Screen::MethodSelection, FlowAction::Submit))
        );
        assert!(flow.gateway().requests().is_empty());
    }

    #[test]
    fn test_selecting_default_variant_opens_form() {
        let flow = flow_on_card_form();
        assert_eq!(flow.screen(), Screen::MethodForm);
        assert_eq!(flow.schema().variant(), PaymentVariant::CreditCard);
    }

    #[test]
    fn test_switching_variant_and_back_yields_blank_form() {
        let mut flow = flow_on_card_form();
        fill_card(&mut flow);

        flow.select_variant(PaymentVariant::Pix).unwrap();
        assert_eq!(flow.schema().variant(), PaymentVariant::Pix);
        assert_eq!(flow.context().variant, PaymentVariant::Pix);
        assert_eq!(flow.form().value(FieldId::CardNumber), None);

        flow.select_variant(PaymentVariant::CreditCard).unwrap();
        assert!(flow.form().is_blank());
        assert_eq!(flow.form().value(FieldId::CardNumber), Some(""));
    }

    #[test]
    fn test_reselecting_same_variant_keeps_values() {
        let mut flow = flow_on_card_form();
        fill_card(&mut flow);

        flow.select_variant(PaymentVariant::CreditCard).unwrap();
        assert_eq!(flow.form().value(FieldId::CardholderName), Some("Jane Doe"));
    }

    #[test]
    fn test_back_to_selection_discards_form() {
        let mut flow = flow_on_card_form();
        fill_card(&mut flow);

        flow.back_to_selection().unwrap();
        assert_eq!(flow.screen(), Screen::MethodSelection);
        assert!(flow.form().is_blank());

        flow.select_variant(PaymentVariant::CreditCard).unwrap();
        assert_eq!(flow.screen(), Screen::MethodForm);
    }

    #[test]
    fn test_invalid_submit_dispatches_nothing() {
        let mut flow = flow_on_card_form();
        flow.edit(FieldId::CardNumber, "41111111111").unwrap();

        let outcome = flow.submit().unwrap();
        let errors = match outcome {
            SubmitOutcome::Rejected(errors) => errors,
            other => panic!("Expected rejection, got {:?}", other),
        };

        assert_eq!(errors.get(FieldId::CardNumber), Some("Card number must be at least 16 digits"));
        assert_eq!(errors.len(), 5);
        assert!(flow.gateway().requests().is_empty());
        assert_eq!(flow.context().outcome, None);
        assert_eq!(flow.screen(), Screen::MethodForm);
    }

    #[test]
    fn test_non_numeric_cvv_blocks_submission() {
        let mut flow = flow_on_card_form();
        fill_card(&mut flow);
        flow.edit(FieldId::Cvv, "abc").unwrap();

        match flow.submit().unwrap() {
            SubmitOutcome::Rejected(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors.get(FieldId::Cvv), Some("CVV must contain only digits"));
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
        assert!(flow.gateway().requests().is_empty());
        assert_eq!(flow.screen(), Screen::MethodForm);
    }

    #[test]
    fn test_double_submit_dispatches_once() {
        let mut flow = flow_on_card_form();
        fill_card(&mut flow);

        assert!(matches!(flow.submit().unwrap(), SubmitOutcome::Accepted(_)));
        assert_eq!(flow.submit().unwrap(), SubmitOutcome::Ignored);

        assert_eq!(flow.gateway().requests().len(), 1);
        assert_eq!(flow.context().outcome, Some(PaymentOutcome::Pending));
    }

    #[test]
    fn test_dispatched_request_carries_context() {
        let mut flow = flow_on_card_form();
        fill_card(&mut flow);
        flow.submit().unwrap();

        let request = &flow.gateway().requests()[0];
        assert_eq!(request.order_id, "ORD-1");
        assert_eq!(request.variant, PaymentVariant::CreditCard);
        assert_eq!(request.amount, Decimal::new(12999, 2));
        assert_eq!(request.currency, "BRL");
        assert_eq!(
            request.payload.values()[0],
            (FieldId::CardNumber, "4111111111111111")
        );
    }

    #[test]
    fn test_pending_rejects_edits_and_method_changes() {
        let mut flow = flow_on_card_form();
        fill_card(&mut flow);
        flow.submit().unwrap();

        assert_eq!(flow.edit(FieldId::Cvv, "999"), Err(CheckoutError::SubmissionPending));
        assert_eq!(
            flow.select_variant(PaymentVariant::Pix),
            Err(CheckoutError::SubmissionPending)
        );
        assert_eq!(flow.back_to_selection(), Err(CheckoutError::SubmissionPending));
        assert_eq!(flow.variant(), PaymentVariant::CreditCard);
    }

    #[test]
    fn test_success_reaches_confirmation_with_receipt() {
        let mut flow = flow_on_card_form();
        fill_card(&mut flow);
        flow.submit().unwrap();

        flow.on_processing_result(ProcessingResult::success("CONF-1")).unwrap();

        assert_eq!(flow.screen(), Screen::Confirmation);
        assert_eq!(
            flow.context().outcome,
            Some(PaymentOutcome::Success {
                confirmation_id: "CONF-1".to_string()
            })
        );
        let receipt = flow.receipt().unwrap();
        assert_eq!(receipt.confirmation_id, "CONF-1");
        assert_eq!(receipt.order_id, "ORD-1");
        assert_eq!(receipt.payment_method, "Credit Card (•••• 1111)");
        assert!(!flow.is_pending());
    }

    #[test]
    fn test_receipt_carries_configured_payment_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 11, 28).unwrap();
        let config = CheckoutConfig::new("BRL", 2025).with_payment_date(date);
        let mut flow = CheckoutFlow::new(config, RecordingGateway::new());
        flow.start_checkout("ORD-1", order()).unwrap();
        flow.select_variant(PaymentVariant::Voucher).unwrap();
        flow.edit(FieldId::VoucherCode, "gift2025").unwrap();
        flow.submit().unwrap();

        flow.on_processing_result(ProcessingResult::success("CONF-2")).unwrap();

        assert_eq!(flow.receipt().map(|r| r.paid_on), Some(date));
    }

    #[test]
    fn test_failure_then_retry_keeps_values() {
        let mut flow = flow_on_card_form();
        fill_card(&mut flow);
        flow.submit().unwrap();

        flow.on_processing_result(ProcessingResult::failure("ERR-5001", "declined"))
            .unwrap();
        assert_eq!(flow.screen(), Screen::Error);
        assert_eq!(
            flow.context().outcome,
            Some(PaymentOutcome::Failure(FailureReason {
                code: "ERR-5001".to_string(),
                message: "declined".to_string(),
            }))
        );

        flow.retry().unwrap();
        assert_eq!(flow.screen(), Screen::MethodForm);
        assert_eq!(flow.context().outcome, None);
        assert_eq!(flow.form().value(FieldId::CardNumber), Some("4111 1111 1111 1111"));
        assert_eq!(flow.form().value(FieldId::CardholderName), Some("Jane Doe"));
        assert_eq!(flow.form().value(FieldId::ExpiryMonth), Some("07"));
        assert_eq!(flow.form().value(FieldId::ExpiryYear), Some("2030"));
        assert_eq!(flow.form().value(FieldId::Cvv), Some("123"));

        // The retried form can be submitted again
        assert!(matches!(flow.submit().unwrap(), SubmitOutcome::Accepted(_)));
        assert_eq!(flow.gateway().requests().len(), 2);
    }

    #[test]
    fn test_failure_then_cancel_clears_everything() {
        let mut flow = flow_on_card_form();
        flow.select_variant(PaymentVariant::Voucher).unwrap();
        flow.edit(FieldId::VoucherCode, "abcd1234").unwrap();
        flow.submit().unwrap();
        flow.on_processing_result(ProcessingResult::failure("ERR-7", "expired"))
            .unwrap();

        flow.cancel().unwrap();

        assert_eq!(flow.screen(), Screen::Landing);
        assert_eq!(flow.context(), &CheckoutContext::default());
        assert!(flow.order().is_none());
        assert_eq!(flow.variant(), PaymentVariant::CreditCard);
        assert!(flow.form().is_blank());
        assert_eq!(flow.form().value(FieldId::VoucherCode), None);
    }

    #[test]
    fn test_continue_shopping_clears_receipt() {
        let mut flow = flow_on_card_form();
        fill_card(&mut flow);
        flow.submit().unwrap();
        flow.on_processing_result(ProcessingResult::success("CONF-1")).unwrap();

        flow.continue_shopping().unwrap();

        assert_eq!(flow.screen(), Screen::Landing);
        assert!(flow.receipt().is_none());
        assert_eq!(flow.context().outcome, None);
        assert!(flow.form().is_blank());
    }

    #[test]
    fn test_stale_result_is_rejected() {
        let mut flow = flow_on_card_form();

        assert_eq!(
            flow.on_processing_result(ProcessingResult::success("CONF-1")),
            Err(CheckoutError::no_pending_submission(Screen::MethodForm))
        );
        assert_eq!(flow.screen(), Screen::MethodForm);
    }

    #[rstest::rstest]
    #[case::retry_on_form(Screen::MethodForm, FlowAction::Retry)]
    #[case::cancel_on_form(Screen::MethodForm, FlowAction::Cancel)]
    #[case::continue_on_form(Screen::MethodForm, FlowAction::ContinueShopping)]
    fn test_outcome_actions_rejected_on_form(#[case] screen: Screen, #[case] action: FlowAction) {
        let mut flow = flow_on_card_form();
        let result = match action {
            FlowAction::Retry => flow.retry(),
            FlowAction::Cancel => flow.cancel(),
            FlowAction::ContinueShopping => flow.continue_shopping(),
            other => panic!("Unexpected action {:?}", other),
        };
        assert_eq!(result, Err(CheckoutError::invalid_transition(screen, action)));
        assert_eq!(flow.screen(), screen);
    }

    #[test]
    fn test_navigator_sees_every_screen_change() {
        let mut flow = flow().with_navigator(RecordingNavigator::default());
        flow.start_checkout("ORD-1", order()).unwrap();
        flow.select_variant(PaymentVariant::Boleto).unwrap();
        flow.edit(FieldId::DocumentId, "123.456.789-00").unwrap();
        flow.edit(FieldId::HolderName, "Joao Silva").unwrap();
        flow.submit().unwrap();
        flow.on_processing_result(ProcessingResult::failure("ERR-5001", "declined"))
            .unwrap();
        flow.retry().unwrap();

        assert_eq!(
            flow.navigator().changes,
            vec![
                (Screen::Landing, Screen::MethodSelection),
                (Screen::MethodSelection, Screen::MethodForm),
                (Screen::MethodForm, Screen::Error),
                (Screen::Error, Screen::MethodForm),
            ]
        );
    }
}
