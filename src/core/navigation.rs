//! Navigation between wizard steps
//!
//! The step never routes itself; it hands a destination to whatever
//! [`Navigator`] the host supplies.

use serde::Serialize;
use std::fmt;

/// Destinations the business information step can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    /// Previous step (business ownership)
    Ownership,
    /// Leave the wizard
    Dashboard,
    /// Next step, where entered addresses are confirmed
    AddressCorrection,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Ownership => "ownership",
            StepId::Dashboard => "dashboard",
            StepId::AddressCorrection => "address-correction",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability to move the user to another step
pub trait Navigator {
    fn navigate_to(&mut self, destination: StepId);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn navigate_to(&mut self, destination: StepId) {
        (**self).navigate_to(destination)
    }
}

/// Navigator that remembers every destination it was sent to
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    history: Vec<StepId>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent destination
    pub fn last(&self) -> Option<StepId> {
        self.history.last().copied()
    }

    /// Every destination in dispatch order
    pub fn history(&self) -> &[StepId] {
        &self.history
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&mut self, destination: StepId) {
        self.history.push(destination);
    }
}
