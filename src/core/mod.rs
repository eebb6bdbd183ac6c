//! Core module - record model, navigation and the step controller

pub mod address;
pub mod business;
pub mod config;
pub mod controller;
pub mod field;
pub mod navigation;
pub mod options;

pub use address::{AddressRecord, DEFAULT_COUNTRY};
pub use business::{
    BusinessInformationRecord, LocationError, RecordError, MAX_PHYSICAL_LOCATIONS,
    MIN_PHYSICAL_LOCATIONS,
};
pub use config::Config;
pub use controller::{NextOutcome, StepController, StepSnapshot, StepState};
pub use field::{AddressField, BusinessField, FieldPath, FieldPathError};
pub use navigation::{Navigator, RecordingNavigator, StepId};
pub use options::SelectOption;
