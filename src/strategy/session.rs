//! Script replay session
//!
//! A `CheckoutSession` plays the presentation layer: it owns a
//! [`CheckoutFlow`], applies script events to it and describes the result of
//! each one as a [`ReportRow`]. Both strategies drive a session; they differ
//! only in how processor verdicts reach it.

use crate::core::{CheckoutConfig, CheckoutFlow, PaymentGateway, SubmitOutcome};
use crate::io::script_format::{verdict_action, CheckoutEvent, ReportRow, StepResult};
use crate::types::{CheckoutError, LineItem, OrderSummary, PaymentOutcome, ProcessingResult};
use tracing::warn;

/// Script replay state around one checkout flow
pub struct CheckoutSession<G: PaymentGateway> {
    flow: CheckoutFlow<G>,
    /// Items for the next `start` without a flat amount
    cart: OrderSummary,
    step: u64,
}

impl<G: PaymentGateway> CheckoutSession<G> {
    pub fn new(config: CheckoutConfig, gateway: G) -> Self {
        CheckoutSession {
            flow: CheckoutFlow::new(config, gateway),
            cart: OrderSummary::default(),
            step: 0,
        }
    }

    pub fn flow(&self) -> &CheckoutFlow<G> {
        &self.flow
    }

    /// Whether a submission is waiting for a verdict
    pub fn is_pending(&self) -> bool {
        self.flow.is_pending()
    }

    /// Apply a script event
    ///
    /// Verdicts are delivered to the flow immediately.
    pub fn apply(&mut self, event: CheckoutEvent) -> ReportRow {
        let action = event.action();

        let result = match event {
            CheckoutEvent::Verdict(result) => return self.deliver(result),
            CheckoutEvent::Item {
                name,
                quantity,
                unit_price,
            } => {
                let id = (self.cart.items.len() + 1).to_string();
                self.cart.items.push(LineItem::new(id, name, quantity, unit_price));
                match self.cart.subtotal() {
                    Ok(subtotal) => Ok((StepResult::Ok, format!("subtotal={}", subtotal))),
                    Err(error) => {
                        self.cart.items.pop();
                        Err(error)
                    }
                }
            }
            CheckoutEvent::Shipping(amount) => {
                self.cart.shipping = amount;
                Ok((StepResult::Ok, format!("shipping={}", amount)))
            }
            CheckoutEvent::Tax(amount) => {
                self.cart.tax = amount;
                Ok((StepResult::Ok, format!("tax={}", amount)))
            }
            CheckoutEvent::Start { order_id, amount } => self.start(order_id, amount),
            CheckoutEvent::Select(variant) => self
                .flow
                .select_variant(variant)
                .map(|()| (StepResult::Ok, String::new())),
            CheckoutEvent::Back => self
                .flow
                .back_to_selection()
                .map(|()| (StepResult::Ok, String::new())),
            CheckoutEvent::Edit { field, value } => self.flow.edit(field, &value).map(|()| {
                let stored = self.flow.form().value(field).unwrap_or_default();
                let detail = match self.flow.form().error(field) {
                    Some(error) => format!("{}={} [{}]", field, stored, error),
                    None => format!("{}={}", field, stored),
                };
                (StepResult::Ok, detail)
            }),
            CheckoutEvent::Submit => self.submit(),
            CheckoutEvent::Retry => self.flow.retry().map(|()| (StepResult::Ok, String::new())),
            CheckoutEvent::Cancel => self.flow.cancel().map(|()| (StepResult::Ok, String::new())),
            CheckoutEvent::Continue => self
                .flow
                .continue_shopping()
                .map(|()| (StepResult::Ok, String::new())),
        };

        self.finish(action, result)
    }

    /// Deliver the processor's answer to the flow
    pub fn deliver(&mut self, result: ProcessingResult) -> ReportRow {
        let action = verdict_action(&result);
        let outcome = self.flow.on_processing_result(result).map(|()| {
            let detail = match (self.flow.receipt(), &self.flow.context().outcome) {
                (Some(receipt), _) => format!(
                    "confirmation={} method={}",
                    receipt.confirmation_id, receipt.payment_method
                ),
                (None, Some(PaymentOutcome::Failure(reason))) => {
                    format!("{}: {}", reason.code, reason.message)
                }
                _ => String::new(),
            };
            (StepResult::Ok, detail)
        });

        self.finish(action, outcome)
    }

    /// Record a script row that could not be parsed
    pub fn reject(&mut self, error: CheckoutError) -> ReportRow {
        self.finish("invalid", Err(error))
    }

    fn start(
        &mut self,
        order_id: String,
        amount: Option<rust_decimal::Decimal>,
    ) -> Result<(StepResult, String), CheckoutError> {
        let order = match amount {
            Some(amount) => OrderSummary::flat(amount),
            None => self.cart.clone(),
        };

        self.flow.start_checkout(order_id, order)?;
        self.cart = OrderSummary::default();

        let context = self.flow.context();
        Ok((
            StepResult::Ok,
            format!(
                "order={} total={} {}",
                context.order_id.as_deref().unwrap_or_default(),
                context.amount,
                context.currency
            ),
        ))
    }

    fn submit(&mut self) -> Result<(StepResult, String), CheckoutError> {
        let row = match self.flow.submit()? {
            SubmitOutcome::Accepted(_) => {
                let context = self.flow.context();
                (
                    StepResult::Ok,
                    format!("dispatched {} {}", context.amount, context.currency),
                )
            }
            SubmitOutcome::Rejected(errors) => (StepResult::Invalid, errors.to_string()),
            SubmitOutcome::Ignored => (StepResult::Ignored, "submission already pending".to_string()),
        };
        Ok(row)
    }

    fn finish(
        &mut self,
        action: &'static str,
        result: Result<(StepResult, String), CheckoutError>,
    ) -> ReportRow {
        self.step += 1;

        let (result, detail) = match result {
            Ok(applied) => applied,
            Err(error) => {
                warn!(step = self.step, action, error = %error, "Event rejected");
                (StepResult::Error, error.to_string())
            }
        };

        ReportRow {
            step: self.step,
            action,
            screen: self.flow.screen(),
            variant: self.flow.variant(),
            result,
            payment: self.flow.context().outcome.as_ref().map(PaymentOutcome::as_str),
            detail,
        }
    }
}
