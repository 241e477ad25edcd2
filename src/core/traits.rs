//! Collaborator traits for the checkout flow
//!
//! The flow controller never talks to a payment processor or a router
//! directly. It calls through these traits so drivers can plug in an
//! in-process stub, a channel to a background task, or a real gateway.

use crate::types::{ProcessingRequest, Screen};

/// Trait for handing validated payments to a processor
///
/// `dispatch` must not block waiting for the outcome. The result is fed back
/// later through
/// [`CheckoutFlow::on_processing_result`](crate::core::CheckoutFlow::on_processing_result).
pub trait PaymentGateway {
    /// Send a request to the processor
    fn dispatch(&mut self, request: ProcessingRequest);
}

/// Trait for following screen changes
///
/// Lets a presentation layer route to the page matching each screen; the
/// core does not own URLs.
pub trait Navigator {
    /// Called after every screen change
    fn navigate(&mut self, from: Screen, to: Screen);
}

/// Navigator that ignores screen changes
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNavigation;

impl Navigator for NoNavigation {
    fn navigate(&mut self, _from: Screen, _to: Screen) {}
}

/// Gateway that keeps every request it receives
///
/// Used by the synchronous driver, where processor verdicts come from the
/// event script rather than a live service.
#[derive(Debug, Clone, Default)]
pub struct RecordingGateway {
    requests: Vec<ProcessingRequest>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests dispatched so far, oldest first
    pub fn requests(&self) -> &[ProcessingRequest] {
        &self.requests
    }
}

impl PaymentGateway for RecordingGateway {
    fn dispatch(&mut self, request: ProcessingRequest) {
        self.requests.push(request);
    }
}

impl<G: PaymentGateway + ?Sized> PaymentGateway for &mut G {
    fn dispatch(&mut self, request: ProcessingRequest) {
        (**self).dispatch(request);
    }
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn navigate(&mut self, from: Screen, to: Screen) {
        (**self).navigate(from, to);
    }
}
