//! Declarative field schemas
//!
//! A [`FieldSchema`] is the ordered list of inputs a payment variant collects,
//! together with the rules each input must satisfy. Schemas are plain data:
//! the registry builds them once and the form controller evaluates them.
//!
//! # Rule evaluation
//!
//! Rules run in declaration order and the first failing rule supplies the
//! field's error, so a field carries at most one error at a time. Length
//! rules measure the *significant* characters of a masked field (digits of a
//! card number, alphanumerics of a voucher code), never the separators the
//! mask inserts.

use super::variant::{FieldId, PaymentVariant};

/// Canonical formatting applied to a field as it is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mask {
    /// Digits only, grouped by 4 with spaces: `4111 1111 1111 1111`
    CardNumber,

    /// Upper-case alphanumerics, grouped by 4 with dashes: `ABCD-EFGH`
    Voucher,
}

impl Mask {
    const GROUP: usize = 4;

    fn separator(self) -> char {
        match self {
            Mask::CardNumber => ' ',
            Mask::Voucher => '-',
        }
    }

    /// Characters of `value` that carry meaning for this mask
    pub fn significant(self, value: &str) -> String {
        match self {
            Mask::CardNumber => value.chars().filter(char::is_ascii_digit).collect(),
            Mask::Voucher => value
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_uppercase())
                .collect(),
        }
    }

    /// Produce the canonical stored form of `raw`
    pub fn apply(self, raw: &str) -> String {
        let significant = self.significant(raw);
        let mut formatted = String::with_capacity(significant.len() + significant.len() / Self::GROUP);
        for (i, c) in significant.chars().enumerate() {
            if i > 0 && i % Self::GROUP == 0 {
                formatted.push(self.separator());
            }
            formatted.push(c);
        }
        formatted
    }
}

/// Semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Numeric text, such as a CVV; surrounding whitespace is dropped on edit
    Number,
    /// One value out of a fixed option list
    Enumerated,
    /// Text reformatted into a canonical form on every edit
    Masked(Mask),
}

/// A single validation rule with its error message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Value must not be blank
    Required { message: String },

    /// Value must have at least `min` significant characters
    MinLength { min: usize, message: String },

    /// Value must have at most `max` significant characters
    MaxLength { max: usize, message: String },

    /// Value must be exactly one of `options`
    OneOf {
        options: Vec<String>,
        message: String,
    },

    /// Value must consist of ASCII digits only
    Digits { message: String },
}

impl FieldRule {
    /// Error message reported when this rule fails
    pub fn message(&self) -> &str {
        match self {
            FieldRule::Required { message }
            | FieldRule::MinLength { message, .. }
            | FieldRule::MaxLength { message, .. }
            | FieldRule::OneOf { message, .. }
            | FieldRule::Digits { message } => message,
        }
    }

    /// Check `value`, whose significant length is `length`
    fn holds(&self, value: &str, length: usize) -> bool {
        match self {
            FieldRule::Required { .. } => !value.trim().is_empty(),
            FieldRule::MinLength { min, .. } => length >= *min,
            FieldRule::MaxLength { max, .. } => length <= *max,
            FieldRule::OneOf { options, .. } => options.iter().any(|option| option == value),
            FieldRule::Digits { .. } => value.chars().all(|c| c.is_ascii_digit()),
        }
    }
}

/// Definition of one input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Which field this is
    pub id: FieldId,

    /// Semantic type, including any mask
    pub kind: FieldKind,

    /// Whether an empty value is an error
    ///
    /// Optional fields that are empty skip every rule.
    pub required: bool,

    /// Rules in evaluation order
    pub rules: Vec<FieldRule>,
}

impl FieldDef {
    /// Create an optional field with no rules
    pub fn new(id: FieldId, kind: FieldKind) -> Self {
        FieldDef {
            id,
            kind,
            required: false,
            rules: Vec::new(),
        }
    }

    /// Mark the field required, with a presence rule carrying `message`
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = true;
        self.rules.push(FieldRule::Required {
            message: message.into(),
        });
        self
    }

    /// Mark the field required without adding a presence rule
    ///
    /// Use when a later length rule already reports blank input.
    pub fn mandatory(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize, message: impl Into<String>) -> Self {
        self.rules.push(FieldRule::MinLength {
            min,
            message: message.into(),
        });
        self
    }

    pub fn max_length(mut self, max: usize, message: impl Into<String>) -> Self {
        self.rules.push(FieldRule::MaxLength {
            max,
            message: message.into(),
        });
        self
    }

    pub fn one_of(mut self, options: Vec<String>, message: impl Into<String>) -> Self {
        self.rules.push(FieldRule::OneOf {
            options,
            message: message.into(),
        });
        self
    }

    pub fn digits_only(mut self, message: impl Into<String>) -> Self {
        self.rules.push(FieldRule::Digits {
            message: message.into(),
        });
        self
    }

    /// Canonical stored form of a raw input value
    pub fn normalize(&self, raw: &str) -> String {
        match self.kind {
            FieldKind::Masked(mask) => mask.apply(raw),
            FieldKind::Number => raw.trim().to_string(),
            _ => raw.to_string(),
        }
    }

    /// Significant length of a stored value
    pub fn measure(&self, value: &str) -> usize {
        match self.kind {
            FieldKind::Masked(mask) => mask.significant(value).chars().count(),
            _ => value.chars().count(),
        }
    }

    /// Allowed values of an enumerated field, if it declares any
    pub fn options(&self) -> Option<&[String]> {
        self.rules.iter().find_map(|rule| match rule {
            FieldRule::OneOf { options, .. } => Some(options.as_slice()),
            _ => None,
        })
    }

    /// Validate a stored value, returning the first failing rule's message
    ///
    /// # Errors
    ///
    /// Returns the error message to show next to the field.
    pub fn validate(&self, value: &str) -> Result<(), String> {
        let blank = value.trim().is_empty();
        if blank && !self.required {
            return Ok(());
        }

        let length = self.measure(value);
        if let Some(rule) = self.rules.iter().find(|rule| !rule.holds(value, length)) {
            return Err(rule.message().to_string());
        }

        if blank {
            return Err(format!("{} is required", self.id.label()));
        }

        Ok(())
    }
}

/// Ordered field definitions for one payment variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    variant: PaymentVariant,
    fields: Vec<FieldDef>,
}

impl FieldSchema {
    /// Create a schema; consistency is checked by the registry builder
    pub fn new(variant: PaymentVariant, fields: Vec<FieldDef>) -> Self {
        FieldSchema { variant, fields }
    }

    pub fn variant(&self) -> PaymentVariant {
        self.variant
    }

    /// Field definitions in form order
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Look up a field definition
    pub fn field(&self, id: FieldId) -> Option<&FieldDef> {
        self.fields.iter().find(|def| def.id == id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::digits("4111111111111111", "4111 1111 1111 1111")]
    #[case::already_grouped("4111 1111 1111 1111", "4111 1111 1111 1111")]
    #[case::dashes_and_letters("4111-1111-abcd-1111-11", "4111 1111 1111 11")]
    #[case::partial("41", "41")]
    #[case::empty("", "")]
    fn test_card_number_mask(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(Mask::CardNumber.apply(raw), expected);
    }

    #[rstest]
    #[case::lowercase("abcd1234efgh5678", "ABCD-1234-EFGH-5678")]
    #[case::with_symbols("ab cd_12", "ABCD-12")]
    #[case::already_grouped("ABCD-1234", "ABCD-1234")]
    fn test_voucher_mask(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(Mask::Voucher.apply(raw), expected);
    }

    #[test]
    fn test_masked_length_counts_significant_characters() {
        let def = FieldDef::new(FieldId::CardNumber, FieldKind::Masked(Mask::CardNumber));
        assert_eq!(def.measure("4111 1111 1111 1111"), 16);
    }

    #[rstest]
    #[case::digits("0427", Ok(()))]
    #[case::letters("abc", Err("Digits only"))]
    #[case::mixed("12a", Err("Digits only"))]
    #[case::sign("-12", Err("Digits only"))]
    fn test_digits_rule(#[case] value: &str, #[case] expected: Result<(), &str>) {
        let def = FieldDef::new(FieldId::Cvv, FieldKind::Number)
            .mandatory()
            .digits_only("Digits only");
        assert_eq!(def.validate(value), expected.map_err(str::to_string));
    }

    #[test]
    fn test_number_input_is_trimmed() {
        let def = FieldDef::new(FieldId::Cvv, FieldKind::Number);
        assert_eq!(def.normalize("  123 "), "123");
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let def = FieldDef::new(FieldId::ExpiryMonth, FieldKind::Enumerated)
            .required("Month is required")
            .one_of(vec!["01".to_string()], "Select a valid month");

        assert_eq!(def.validate(""), Err("Month is required".to_string()));
        assert_eq!(def.validate("13"), Err("Select a valid month".to_string()));
        assert_eq!(def.validate("01"), Ok(()));
    }

    #[test]
    fn test_optional_blank_field_skips_rules() {
        let def = FieldDef::new(FieldId::HolderName, FieldKind::Text).min_length(2, "Too short");
        assert_eq!(def.validate(""), Ok(()));
        assert_eq!(def.validate("A"), Err("Too short".to_string()));
    }

    #[test]
    fn test_mandatory_blank_field_without_rules_still_fails() {
        let def = FieldDef::new(FieldId::BankName, FieldKind::Text).mandatory();
        assert_eq!(def.validate("   "), Err("Bank Name is required".to_string()));
    }

    #[test]
    fn test_options_exposes_enumerated_choices() {
        let def = FieldDef::new(FieldId::ExpiryMonth, FieldKind::Enumerated)
            .one_of(vec!["01".to_string(), "02".to_string()], "Select a valid month");
        assert_eq!(def.options().map(<[String]>::len), Some(2));

        let text = FieldDef::new(FieldId::BankName, FieldKind::Text);
        assert!(text.options().is_none());
    }
}
