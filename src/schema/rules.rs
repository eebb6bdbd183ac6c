//! Declarative validation rules
//!
//! Each input of the step maps to a list of rules. The engine in
//! [`crate::schema::validator`] interprets the table uniformly, so adding a
//! rule never requires new checking code.

use crate::core::field::{AddressField, BusinessField};

/// `DD-DDDDDDD`
pub const FEIN_PATTERN: &str = r"^\d{2}-\d{7}$";

/// `DDD-DDD-DDDD`
pub const PHONE_PATTERN: &str = r"^\d{3}-\d{3}-\d{4}$";

/// Local part, `@`, and a domain containing a dot. Deliverability is not checked.
pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s.]+$";

/// How a single rule checks its field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Value must contain something other than whitespace
    Required { message: &'static str },
    /// Non-blank value must match `pattern`
    Pattern {
        pattern: &'static str,
        message: &'static str,
    },
    /// Non-blank value must look like an email address
    Email { message: &'static str },
}

/// A rule attached to one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule<F> {
    pub field: F,
    pub kind: RuleKind,
}

const fn required<F>(field: F, message: &'static str) -> FieldRule<F> {
    FieldRule {
        field,
        kind: RuleKind::Required { message },
    }
}

/// Rules for the business identity fields
pub const BUSINESS_RULES: &[FieldRule<BusinessField>] = &[
    required(BusinessField::Fein, "FEIN is required."),
    FieldRule {
        field: BusinessField::Fein,
        kind: RuleKind::Pattern {
            pattern: FEIN_PATTERN,
            message: "FEIN must be in the format XX-XXXXXXX.",
        },
    },
    required(BusinessField::LegalName, "Legal Name is required."),
    required(BusinessField::PhoneNumber, "Phone Number is required."),
    FieldRule {
        field: BusinessField::PhoneNumber,
        kind: RuleKind::Pattern {
            pattern: PHONE_PATTERN,
            message: "Phone Number must be in the format XXX-XXX-XXXX.",
        },
    },
    required(BusinessField::Email, "Email Address is required."),
    FieldRule {
        field: BusinessField::Email,
        kind: RuleKind::Email {
            message: "Please enter a valid email address.",
        },
    },
];

/// Rules applied to every address, mailing and physical alike
pub const ADDRESS_RULES: &[FieldRule<AddressField>] = &[
    required(AddressField::Country, "Country is required."),
    required(AddressField::AddressLine1, "Address Line 1 is required."),
    required(AddressField::City, "City is required."),
    required(AddressField::State, "State is required."),
    required(AddressField::Zip, "Zip Code is required."),
];

/// Whether the field carries a required rule
pub fn is_required_business(field: BusinessField) -> bool {
    BUSINESS_RULES
        .iter()
        .any(|r| r.field == field && matches!(r.kind, RuleKind::Required { .. }))
}

pub fn is_required_address(field: AddressField) -> bool {
    ADDRESS_RULES
        .iter()
        .any(|r| r.field == field && matches!(r.kind, RuleKind::Required { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_have_no_rules() {
        assert!(!BUSINESS_RULES.iter().any(|r| r.field == BusinessField::TradeName));
        assert!(!ADDRESS_RULES
            .iter()
            .any(|r| matches!(r.field, AddressField::AddressLine2 | AddressField::Extension)));
    }

    #[test]
    fn test_required_lookup() {
        assert!(is_required_business(BusinessField::Fein));
        assert!(!is_required_business(BusinessField::TradeName));
        assert!(is_required_address(AddressField::Zip));
        assert!(!is_required_address(AddressField::Extension));
    }
}
