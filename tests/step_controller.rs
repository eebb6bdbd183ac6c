//! Scenario tests for the business information step driven through the library API

use emreg::core::{
    AddressField, AddressRecord, BusinessField, BusinessInformationRecord, FieldPath,
    NextOutcome, RecordingNavigator, StepController, StepId, StepState,
};
use emreg::schema::FieldErrorKind;

fn populated_address(line1: &str) -> AddressRecord {
    AddressRecord {
        country: "United States".to_string(),
        address_line1: line1.to_string(),
        address_line2: String::new(),
        city: "Madison".to_string(),
        state: "WI".to_string(),
        zip: "53703".to_string(),
        extension: String::new(),
    }
}

fn acme() -> BusinessInformationRecord {
    let mut record = BusinessInformationRecord::default();
    record.fein = "99-9999999".to_string();
    record.legal_name = "Acme LLC".to_string();
    record.phone_number = "608-555-0100".to_string();
    record.email = "hr@acme.com".to_string();
    record.mailing_address = populated_address("PO Box 1");
    if let Some(location) = record.physical_location_mut(0) {
        *location = populated_address("100 Main St");
    }
    record
}

#[test]
fn test_valid_record_proceeds_to_address_correction() {
    let mut step = StepController::with_record(acme(), RecordingNavigator::new());
    assert!(step.errors().is_empty());

    assert_eq!(step.go_next(), NextOutcome::Proceeded);
    assert_eq!(step.navigator().history(), &[StepId::AddressCorrection]);
    assert_eq!(step.state(), StepState::Pristine);
}

#[test]
fn test_missing_email_blocks_next() {
    let mut record = acme();
    record.email = String::new();
    let mut step = StepController::with_record(record, RecordingNavigator::new());

    assert_eq!(step.go_next(), NextOutcome::Blocked { error_count: 1 });
    assert!(step.navigator().history().is_empty());
    assert_eq!(step.state(), StepState::SubmissionAttempted);

    let email = FieldPath::Business(BusinessField::Email);
    let visible = step.visible_errors().unwrap();
    assert_eq!(
        visible.get(&email).map(|e| e.kind),
        Some(FieldErrorKind::MissingRequiredField)
    );

    // Fixing the field clears the error live and unblocks next
    step.set_field(email, "hr@acme.com").unwrap();
    assert!(step.visible_errors().unwrap().is_empty());
    assert_eq!(step.state(), StepState::SubmissionAttempted);
    assert_eq!(step.go_next(), NextOutcome::Proceeded);
    assert_eq!(step.navigator().last(), Some(StepId::AddressCorrection));
}

#[test]
fn test_location_list_bounds() {
    let mut step = StepController::new(RecordingNavigator::new());

    let mut added = 0;
    for _ in 0..3 {
        if step.add_physical_location().is_ok() {
            added += 1;
        }
    }
    assert_eq!(added, 2);
    assert_eq!(step.record().physical_locations().len(), 3);
    assert!(step.add_physical_location().is_err());
    assert_eq!(step.record().physical_locations().len(), 3);

    let mut fresh = StepController::new(RecordingNavigator::new());
    assert!(fresh.remove_physical_location(0).is_err());
    assert_eq!(fresh.record().physical_locations().len(), 1);
}

#[test]
fn test_new_location_must_be_completed() {
    let mut step = StepController::with_record(acme(), RecordingNavigator::new());
    let index = step.add_physical_location().unwrap();

    assert!(matches!(step.go_next(), NextOutcome::Blocked { error_count: 4 }));
    for (field, value) in [
        (AddressField::AddressLine1, "5 Elm St"),
        (AddressField::City, "Verona"),
        (AddressField::State, "WI"),
        (AddressField::Zip, "53593"),
    ] {
        step.set_field(FieldPath::Physical(index, field), value).unwrap();
    }
    assert_eq!(step.go_next(), NextOutcome::Proceeded);
}

#[test]
fn test_back_and_save_ignore_errors() {
    let mut step = StepController::new(RecordingNavigator::new());
    step.go_back();
    step.save_and_quit();
    assert_eq!(
        step.navigator().history(),
        &[StepId::Ownership, StepId::Dashboard]
    );
    assert!(step.visible_errors().is_none());
}

#[test]
fn test_draft_resume_keeps_locations() {
    let mut record = acme();
    record.add_physical_location().unwrap();
    let yaml = record.to_yaml().unwrap();

    let resumed = BusinessInformationRecord::from_yaml(&yaml).unwrap();
    let step = StepController::with_record(resumed, RecordingNavigator::new());
    assert_eq!(step.record().physical_locations().len(), 2);
    assert!(step
        .errors()
        .contains(&FieldPath::Physical(1, AddressField::City)));
}
