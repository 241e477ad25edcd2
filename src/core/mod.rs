//! Core business logic module
//!
//! This module contains the checkout state and validation model:
//! - `traits` - Gateway and navigator seams for interchangeable collaborators
//! - `config` - Checkout configuration (currency, expiry year window)
//! - `schema_registry` - Field schemas for every payment variant
//! - `selector` - Active payment variant
//! - `form_controller` - Field values, errors and submission guard
//! - `flow_controller` - Screen sequencing and cross-screen state

pub mod config;
pub mod flow_controller;
pub mod form_controller;
pub mod schema_registry;
pub mod selector;
pub mod traits;

pub use config::CheckoutConfig;
pub use flow_controller::CheckoutFlow;
pub use form_controller::{FormController, FormState, SubmitOutcome};
pub use schema_registry::{SchemaRegistry, SchemaRegistryBuilder};
pub use selector::{PaymentMethodSelector, VariantChange};
pub use traits::{Navigator, NoNavigation, PaymentGateway, RecordingGateway};
