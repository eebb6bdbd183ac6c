//! Command implementations

pub mod completions;
pub mod new;
pub mod options;
pub mod validate;
