//! Field schema registry
//!
//! This module provides the `SchemaRegistry`, which maps every payment variant
//! to exactly one immutable [`FieldSchema`].
//!
//! The registry is built through [`SchemaRegistryBuilder`], which checks the
//! whole schema set up front: every variant covered exactly once, no empty
//! schema, no field listed twice, no field borrowed from another variant.
//! Once built, [`SchemaRegistry::schema_for`] cannot fail.

use crate::core::config::CheckoutConfig;
use crate::types::{CheckoutError, FieldDef, FieldKind, FieldSchema, FieldId, Mask, PaymentVariant};
use std::collections::HashSet;
use std::sync::Arc;

/// Maps each payment variant to its schema
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    /// Indexed by `PaymentVariant::index`; always one entry per variant
    schemas: Vec<Arc<FieldSchema>>,
}

impl SchemaRegistry {
    /// Start registering schemas
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Registry with the standard checkout schemas
    ///
    /// # Panics
    ///
    /// Panics if the standard schema set is inconsistent, which is a defect in
    /// this crate rather than a runtime condition.
    pub fn standard(config: &CheckoutConfig) -> Self {
        standard_schemas(config)
            .into_iter()
            .fold(SchemaRegistry::builder(), SchemaRegistryBuilder::register)
            .build()
            .unwrap_or_else(|e| panic!("standard checkout schemas are inconsistent: {e}"))
    }

    /// Schema for `variant`
    pub fn schema_for(&self, variant: PaymentVariant) -> &Arc<FieldSchema> {
        &self.schemas[variant.index()]
    }
}

/// Collects schemas and validates them as a set
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    schemas: Vec<FieldSchema>,
}

impl SchemaRegistryBuilder {
    /// Add a schema; consistency is checked by [`build`](Self::build)
    pub fn register(mut self, schema: FieldSchema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Check the registered schemas and freeze them
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A schema lists a field owned by another variant
    /// - A schema lists the same field twice
    /// - Two schemas are registered for the same variant
    /// - Some variant has no schema, or an empty one
    pub fn build(self) -> Result<SchemaRegistry, CheckoutError> {
        let mut slots: Vec<Option<Arc<FieldSchema>>> = vec![None; PaymentVariant::ALL.len()];

        for schema in self.schemas {
            let variant = schema.variant();

            let mut seen = HashSet::new();
            for def in schema.fields() {
                if def.id.variant() != variant {
                    return Err(CheckoutError::foreign_field(def.id, variant));
                }
                if !seen.insert(def.id) {
                    return Err(CheckoutError::duplicate_field(def.id, variant));
                }
            }

            let slot = &mut slots[variant.index()];
            if slot.is_some() {
                return Err(CheckoutError::duplicate_schema(variant));
            }
            *slot = Some(Arc::new(schema));
        }

        let schemas = PaymentVariant::ALL
            .into_iter()
            .map(|variant| {
                slots[variant.index()]
                    .take()
                    .filter(|schema| !schema.is_empty())
                    .ok_or_else(|| CheckoutError::missing_schema(variant))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SchemaRegistry { schemas })
    }
}

/// The checkout's standard schemas, one per variant
///
/// [`SchemaRegistry::standard`] registers these as they are. Callers that need
/// different rules for a variant can start from this set, swap the schema and
/// build their own registry for [`CheckoutFlow::with_registry`](crate::core::CheckoutFlow::with_registry).
///
/// # Example
///
/// ```
/// use checkout_flow::core::schema_registry::standard_schemas;
/// use checkout_flow::core::{CheckoutConfig, SchemaRegistry};
/// use checkout_flow::types::{FieldDef, FieldId, FieldKind, FieldSchema, PaymentVariant};
///
/// let config = CheckoutConfig::new("BRL", 2025);
/// let registry = standard_schemas(&config)
///     .into_iter()
///     .map(|schema| match schema.variant() {
///         PaymentVariant::Pix => FieldSchema::new(
///             PaymentVariant::Pix,
///             vec![FieldDef::new(FieldId::PayerDocument, FieldKind::Text)],
///         ),
///         _ => schema,
///     })
///     .fold(SchemaRegistry::builder(), |builder, schema| builder.register(schema))
///     .build()
///     .unwrap();
///
/// let pix = registry.schema_for(PaymentVariant::Pix);
/// assert_eq!(pix.field(FieldId::PayerDocument).map(|f| f.required), Some(false));
/// ```
pub fn standard_schemas(config: &CheckoutConfig) -> Vec<FieldSchema> {
    let months = (1..=12).map(|month| format!("{month:02}")).collect();

    vec![
        FieldSchema::new(
            PaymentVariant::CreditCard,
            vec![
                FieldDef::new(FieldId::CardNumber, FieldKind::Masked(Mask::CardNumber))
                    .mandatory()
                    .min_length(16, "Card number must be at least 16 digits")
                    .max_length(19, "Card number cannot exceed 19 digits"),
                FieldDef::new(FieldId::CardholderName, FieldKind::Text)
                    .mandatory()
                    .min_length(2, "Cardholder name is required"),
                FieldDef::new(FieldId::ExpiryMonth, FieldKind::Enumerated)
                    .required("Month is required")
                    .one_of(months, "Select a valid month"),
                FieldDef::new(FieldId::ExpiryYear, FieldKind::Enumerated)
                    .required("Year is required")
                    .one_of(config.expiry_years(), "Select a valid year"),
                FieldDef::new(FieldId::Cvv, FieldKind::Number)
                    .mandatory()
                    .digits_only("CVV must contain only digits")
                    .min_length(3, "CVV must be at least 3 digits")
                    .max_length(4, "CVV cannot exceed 4 digits"),
            ],
        ),
        FieldSchema::new(
            PaymentVariant::Pix,
            vec![FieldDef::new(FieldId::PayerDocument, FieldKind::Text).required("CPF/CNPJ is required")],
        ),
        FieldSchema::new(
            PaymentVariant::BankTransfer,
            vec![
                FieldDef::new(FieldId::BankName, FieldKind::Text).required("Bank name is required"),
                FieldDef::new(FieldId::AccountNumber, FieldKind::Text)
                    .required("Account number is required"),
                FieldDef::new(FieldId::BankBranch, FieldKind::Text).required("Branch is required"),
            ],
        ),
        // No CPF/CNPJ checksum: only presence is checked.
        FieldSchema::new(
            PaymentVariant::Boleto,
            vec![
                FieldDef::new(FieldId::DocumentId, FieldKind::Text).required("CPF/CNPJ is required"),
                FieldDef::new(FieldId::HolderName, FieldKind::Text).required("Full name is required"),
            ],
        ),
        FieldSchema::new(
            PaymentVariant::Voucher,
            vec![FieldDef::new(FieldId::VoucherCode, FieldKind::Masked(Mask::Voucher))
                .required("Voucher code is required")
                .max_length(16, "Voucher code cannot exceed 16 characters")],
        ),
    ]
}
