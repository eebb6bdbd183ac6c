//! Step controller - mediates between input events, validation and navigation
//!
//! The controller owns the record for the lifetime of the step. Every
//! mutation goes through it, is re-validated before the call returns and is
//! then published to subscribers, so a host always renders the errors that
//! match the current input.
//!
//! Errors are computed from the start but only become visible once the user
//! has tried to advance with an invalid record:
//!
//! ```text
//! Pristine --go_next (invalid)--> SubmissionAttempted
//! ```
//!
//! There is no way back to `Pristine`.

use std::fmt;

use crate::core::address::AddressRecord;
use crate::core::business::{BusinessInformationRecord, LocationError};
use crate::core::field::FieldPath;
use crate::core::navigation::{Navigator, StepId};
use crate::schema::validator::{ValidationEngine, ValidationErrors};

/// Whether validation errors are shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepState {
    /// Errors are computed but hidden
    #[default]
    Pristine,
    /// The user tried to advance; errors are shown and kept live
    SubmissionAttempted,
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepState::Pristine => write!(f, "pristine"),
            StepState::SubmissionAttempted => write!(f, "submission-attempted"),
        }
    }
}

/// Result of trying to advance to the next step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    /// The record was valid and the navigator was sent to address correction
    Proceeded,
    /// The record was invalid; nothing was dispatched
    Blocked { error_count: usize },
}

/// Derived state published after every mutation
#[derive(Debug, Clone, Copy)]
pub struct StepSnapshot<'a> {
    pub record: &'a BusinessInformationRecord,
    pub errors: &'a ValidationErrors,
    pub state: StepState,
}

impl<'a> StepSnapshot<'a> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors the host should display; `None` while pristine
    pub fn visible_errors(&self) -> Option<&'a ValidationErrors> {
        match self.state {
            StepState::Pristine => None,
            StepState::SubmissionAttempted => Some(self.errors),
        }
    }
}

type Listener = Box<dyn FnMut(&StepSnapshot<'_>)>;

/// Controller for the business information step
pub struct StepController<N: Navigator> {
    record: BusinessInformationRecord,
    engine: ValidationEngine,
    errors: ValidationErrors,
    state: StepState,
    navigator: N,
    listeners: Vec<Listener>,
}

impl<N: Navigator> StepController<N> {
    /// Enter the step with a fresh record
    pub fn new(navigator: N) -> Self {
        Self::with_record(BusinessInformationRecord::default(), navigator)
    }

    /// Enter the step with an existing record, e.g. a resumed draft
    pub fn with_record(record: BusinessInformationRecord, navigator: N) -> Self {
        let engine = ValidationEngine::new();
        let errors = engine.validate(&record);
        Self {
            record,
            engine,
            errors,
            state: StepState::Pristine,
            navigator,
            listeners: Vec::new(),
        }
    }

    pub fn record(&self) -> &BusinessInformationRecord {
        &self.record
    }

    /// All current errors, shown or not
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Errors the host should display; `None` while pristine
    pub fn visible_errors(&self) -> Option<&ValidationErrors> {
        self.snapshot().visible_errors()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn state(&self) -> StepState {
        self.state
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> StepSnapshot<'_> {
        StepSnapshot {
            record: &self.record,
            errors: &self.errors,
            state: self.state,
        }
    }

    /// Register a host callback, invoked after every mutation
    pub fn subscribe(&mut self, listener: impl FnMut(&StepSnapshot<'_>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply a field change, then re-validate and publish
    pub fn set_field(&mut self, path: FieldPath, value: impl Into<String>) -> Result<(), LocationError> {
        self.record.set(path, value)?;
        tracing::debug!(field = %path, "field changed");
        self.refresh();
        Ok(())
    }

    /// Append an empty physical location; rejected at the cap
    pub fn add_physical_location(&mut self) -> Result<usize, LocationError> {
        match self.record.add_physical_location() {
            Ok(index) => {
                tracing::debug!(index, "physical location added");
                self.refresh();
                Ok(index)
            }
            Err(e) => {
                tracing::debug!(error = %e, "add physical location rejected");
                Err(e)
            }
        }
    }

    /// Remove a physical location; rejected when only one remains
    pub fn remove_physical_location(&mut self, index: usize) -> Result<AddressRecord, LocationError> {
        match self.record.remove_physical_location(index) {
            Ok(removed) => {
                tracing::debug!(index, "physical location removed");
                self.refresh();
                Ok(removed)
            }
            Err(e) => {
                tracing::debug!(index, error = %e, "remove physical location rejected");
                Err(e)
            }
        }
    }

    /// Advance to address correction if the record is valid
    ///
    /// An invalid record moves the step to `SubmissionAttempted` instead and
    /// nothing is dispatched.
    pub fn go_next(&mut self) -> NextOutcome {
        if self.is_valid() {
            self.dispatch(StepId::AddressCorrection);
            return NextOutcome::Proceeded;
        }

        let error_count = self.errors.len();
        if self.state == StepState::Pristine {
            tracing::info!(error_count, "submission attempted with errors");
            self.state = StepState::SubmissionAttempted;
        }
        self.publish();
        NextOutcome::Blocked { error_count }
    }

    /// Return to the ownership step without validating
    pub fn go_back(&mut self) {
        self.dispatch(StepId::Ownership);
    }

    /// Leave for the dashboard without validating
    pub fn save_and_quit(&mut self) {
        self.dispatch(StepId::Dashboard);
    }

    /// Consume the controller, returning the record and navigator
    pub fn into_parts(self) -> (BusinessInformationRecord, N) {
        (self.record, self.navigator)
    }

    fn dispatch(&mut self, destination: StepId) {
        tracing::info!(%destination, "navigating");
        self.navigator.navigate_to(destination);
    }

    fn refresh(&mut self) {
        self.errors = self.engine.validate(&self.record);
        tracing::debug!(errors = self.errors.len(), "revalidated");
        self.publish();
    }

    fn publish(&mut self) {
        let snapshot = StepSnapshot {
            record: &self.record,
            errors: &self.errors,
            state: self.state,
        };
        for listener in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::{AddressField, BusinessField};
    use crate::core::navigation::RecordingNavigator;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller() -> StepController<RecordingNavigator> {
        StepController::new(RecordingNavigator::new())
    }

    #[test]
    fn test_starts_pristine_with_hidden_errors() {
        let step = controller();
        assert_eq!(step.state(), StepState::Pristine);
        assert!(!step.is_valid());
        assert!(!step.errors().is_empty());
        assert!(step.visible_errors().is_none());
    }

    #[test]
    fn test_failed_next_reveals_errors() {
        let mut step = controller();
        let outcome = step.go_next();

        assert_eq!(
            outcome,
            NextOutcome::Blocked {
                error_count: step.errors().len()
            }
        );
        assert_eq!(step.state(), StepState::SubmissionAttempted);
        assert_eq!(step.visible_errors(), Some(step.errors()));
        assert!(step.navigator().history().is_empty());
    }

    #[test]
    fn test_errors_stay_visible_and_live() {
        let mut step = controller();
        step.go_next();

        let legal_name = FieldPath::Business(BusinessField::LegalName);
        assert!(step.visible_errors().unwrap().contains(&legal_name));

        step.set_field(legal_name, "Acme LLC").unwrap();
        assert_eq!(step.state(), StepState::SubmissionAttempted);
        assert!(!step.visible_errors().unwrap().contains(&legal_name));
    }

    #[test]
    fn test_back_and_save_bypass_validation() {
        let mut step = controller();
        step.go_back();
        step.save_and_quit();
        assert_eq!(
            step.navigator().history(),
            &[StepId::Ownership, StepId::Dashboard]
        );
        assert_eq!(step.state(), StepState::Pristine);
    }

    #[test]
    fn test_location_bounds() {
        let mut step = controller();
        assert_eq!(step.add_physical_location(), Ok(1));
        assert_eq!(step.add_physical_location(), Ok(2));
        assert!(step.add_physical_location().is_err());
        assert_eq!(step.record().physical_locations().len(), 3);

        step.remove_physical_location(2).unwrap();
        step.remove_physical_location(1).unwrap();
        assert_eq!(
            step.remove_physical_location(0),
            Err(LocationError::AtMinimum { min: 1 })
        );
        assert_eq!(step.record().physical_locations().len(), 1);
    }

    #[test]
    fn test_removing_location_drops_its_errors() {
        let mut step = controller();
        step.add_physical_location().unwrap();
        assert!(step
            .errors()
            .contains(&FieldPath::Physical(1, AddressField::Zip)));

        step.remove_physical_location(1).unwrap();
        assert!(!step
            .errors()
            .contains(&FieldPath::Physical(1, AddressField::Zip)));
    }

    #[test]
    fn test_set_field_on_missing_location_is_rejected() {
        let mut step = controller();
        let before = step.errors().clone();
        assert!(step
            .set_field(FieldPath::Physical(2, AddressField::City), "Madison")
            .is_err());
        assert_eq!(step.errors(), &before);
    }

    #[test]
    fn test_every_mutation_is_published() {
        let mut step = controller();
        let seen: Rc<RefCell<Vec<(StepState, usize)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        step.subscribe(move |snapshot| {
            sink.borrow_mut()
                .push((snapshot.state, snapshot.errors.len()));
        });

        let initial = step.errors().len();
        step.set_field(FieldPath::Business(BusinessField::Fein), "12-3456789")
            .unwrap();
        step.go_next();
        step.add_physical_location().unwrap();
        // rejected mutations do not publish
        step.remove_physical_location(7).unwrap_err();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], (StepState::Pristine, initial - 1));
        assert_eq!(seen[1].0, StepState::SubmissionAttempted);
        assert_eq!(seen[2], (StepState::SubmissionAttempted, initial - 1 + 4));
    }

    #[test]
    fn test_snapshot_visibility() {
        let mut step = controller();
        assert!(step.snapshot().visible_errors().is_none());
        step.go_next();
        let snapshot = step.snapshot();
        assert!(!snapshot.is_valid());
        assert!(snapshot.visible_errors().is_some());
    }
}
