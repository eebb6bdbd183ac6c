//! Schema system - validation rules, engine and the interactive wizard

pub mod rules;
pub mod validator;
pub mod wizard;

pub use rules::{FieldRule, RuleKind};
pub use validator::{FieldError, FieldErrorKind, ValidationEngine, ValidationErrors, ValidationReport};
pub use wizard::StepWizard;
