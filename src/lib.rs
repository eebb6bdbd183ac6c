//! emreg: employer registration, business information step
//!
//! Collects employer business details, a mailing address and one to three
//! physical locations, validating the step before the user may move on.

pub mod cli;
pub mod core;
pub mod schema;
