//! Business information record - the aggregate model of the step
//!
//! Holds the business identity fields, one mailing address and between one
//! and three physical locations. The location list is private so the bounds
//! can only be changed through [`BusinessInformationRecord::add_physical_location`]
//! and [`BusinessInformationRecord::remove_physical_location`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::address::AddressRecord;
use crate::core::field::{BusinessField, FieldPath};

/// At least one physical location is always present
pub const MIN_PHYSICAL_LOCATIONS: usize = 1;

/// No more than three physical locations may be declared
pub const MAX_PHYSICAL_LOCATIONS: usize = 3;

/// A rejected change to the physical location list
///
/// The record is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Cannot add more than {max} physical locations")]
    AtCapacity { max: usize },

    #[error("At least {min} physical location is required")]
    AtMinimum { min: usize },

    #[error("No physical location at index {index} (have {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Errors reading or writing a draft file
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid draft YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("A draft must have between {min} and {max} physical locations, found {found}")]
    LocationCount { found: usize, min: usize, max: usize },
}

/// The full input of the business information step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RecordDraft")]
pub struct BusinessInformationRecord {
    /// Federal Employer Identification Number, `DD-DDDDDDD`
    pub fein: String,
    pub legal_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub trade_name: String,
    /// `DDD-DDD-DDDD`
    pub phone_number: String,
    pub email: String,
    pub mailing_address: AddressRecord,
    physical_locations: Vec<AddressRecord>,
}

/// Unchecked shape of a draft file, validated into a record on load
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RecordDraft {
    fein: String,
    legal_name: String,
    trade_name: String,
    phone_number: String,
    email: String,
    mailing_address: AddressRecord,
    physical_locations: Vec<AddressRecord>,
}

impl Default for RecordDraft {
    fn default() -> Self {
        let record = BusinessInformationRecord::default();
        Self {
            fein: record.fein,
            legal_name: record.legal_name,
            trade_name: record.trade_name,
            phone_number: record.phone_number,
            email: record.email,
            mailing_address: record.mailing_address,
            physical_locations: record.physical_locations,
        }
    }
}

impl TryFrom<RecordDraft> for BusinessInformationRecord {
    type Error = RecordError;

    fn try_from(draft: RecordDraft) -> Result<Self, Self::Error> {
        let found = draft.physical_locations.len();
        if !(MIN_PHYSICAL_LOCATIONS..=MAX_PHYSICAL_LOCATIONS).contains(&found) {
            return Err(RecordError::LocationCount {
                found,
                min: MIN_PHYSICAL_LOCATIONS,
                max: MAX_PHYSICAL_LOCATIONS,
            });
        }
        Ok(Self {
            fein: draft.fein,
            legal_name: draft.legal_name,
            trade_name: draft.trade_name,
            phone_number: draft.phone_number,
            email: draft.email,
            mailing_address: draft.mailing_address,
            physical_locations: draft.physical_locations,
        })
    }
}

impl Default for BusinessInformationRecord {
    fn default() -> Self {
        Self::with_country(crate::core::address::DEFAULT_COUNTRY)
    }
}

impl BusinessInformationRecord {
    /// Create the record for a freshly entered step
    ///
    /// Every address is pre-filled with `country` and the location list
    /// starts with exactly one empty entry.
    pub fn with_country(country: &str) -> Self {
        Self {
            fein: String::new(),
            legal_name: String::new(),
            trade_name: String::new(),
            phone_number: String::new(),
            email: String::new(),
            mailing_address: AddressRecord::with_country(country),
            physical_locations: vec![AddressRecord::with_country(country)],
        }
    }

    /// Physical locations in entry order
    pub fn physical_locations(&self) -> &[AddressRecord] {
        &self.physical_locations
    }

    /// Mutable access to one physical location
    pub fn physical_location_mut(&mut self, index: usize) -> Option<&mut AddressRecord> {
        self.physical_locations.get_mut(index)
    }

    /// Whether another location may still be added
    pub fn can_add_physical_location(&self) -> bool {
        self.physical_locations.len() < MAX_PHYSICAL_LOCATIONS
    }

    /// Whether a location may be removed
    pub fn can_remove_physical_location(&self) -> bool {
        self.physical_locations.len() > MIN_PHYSICAL_LOCATIONS
    }

    /// Append an empty location, returning its index
    ///
    /// New entries copy the country of the first location so a changed
    /// default carries over.
    pub fn add_physical_location(&mut self) -> Result<usize, LocationError> {
        if !self.can_add_physical_location() {
            return Err(LocationError::AtCapacity {
                max: MAX_PHYSICAL_LOCATIONS,
            });
        }
        let country = self
            .physical_locations
            .first()
            .map(|a| a.country.clone())
            .unwrap_or_default();
        self.physical_locations
            .push(AddressRecord::with_country(&country));
        Ok(self.physical_locations.len() - 1)
    }

    /// Remove the location at `index`, shifting later entries down
    pub fn remove_physical_location(&mut self, index: usize) -> Result<AddressRecord, LocationError> {
        let len = self.physical_locations.len();
        if index >= len {
            return Err(LocationError::OutOfRange { index, len });
        }
        if !self.can_remove_physical_location() {
            return Err(LocationError::AtMinimum {
                min: MIN_PHYSICAL_LOCATIONS,
            });
        }
        Ok(self.physical_locations.remove(index))
    }

    /// Get the current value of a field
    ///
    /// Returns `None` for a physical location that does not exist.
    pub fn get(&self, path: FieldPath) -> Option<&str> {
        match path {
            FieldPath::Business(field) => Some(self.business_value(field)),
            FieldPath::Mailing(field) => Some(self.mailing_address.get(field)),
            FieldPath::Physical(index, field) => {
                self.physical_locations.get(index).map(|a| a.get(field))
            }
        }
    }

    /// Replace the value of a field
    pub fn set(&mut self, path: FieldPath, value: impl Into<String>) -> Result<(), LocationError> {
        match path {
            FieldPath::Business(field) => {
                let value = value.into();
                match field {
                    BusinessField::Fein => self.fein = value,
                    BusinessField::LegalName => self.legal_name = value,
                    BusinessField::TradeName => self.trade_name = value,
                    BusinessField::PhoneNumber => self.phone_number = value,
                    BusinessField::Email => self.email = value,
                }
            }
            FieldPath::Mailing(field) => self.mailing_address.set(field, value),
            FieldPath::Physical(index, field) => {
                let len = self.physical_locations.len();
                self.physical_locations
                    .get_mut(index)
                    .ok_or(LocationError::OutOfRange { index, len })?
                    .set(field, value);
            }
        }
        Ok(())
    }

    fn business_value(&self, field: BusinessField) -> &str {
        match field {
            BusinessField::Fein => &self.fein,
            BusinessField::LegalName => &self.legal_name,
            BusinessField::TradeName => &self.trade_name,
            BusinessField::PhoneNumber => &self.phone_number,
            BusinessField::Email => &self.email,
        }
    }

    /// Parse a draft from YAML
    pub fn from_yaml(content: &str) -> Result<Self, RecordError> {
        // Going through the draft keeps LocationCount as its own variant
        let draft: RecordDraft = serde_yml::from_str(content)?;
        Self::try_from(draft)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, RecordError> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Load a draft file
    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Write the record to a draft file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), RecordError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::AddressField;

    #[test]
    fn test_new_record_has_one_location() {
        let record = BusinessInformationRecord::default();
        assert_eq!(record.physical_locations().len(), 1);
        assert_eq!(record.physical_locations()[0], AddressRecord::default());
        assert_eq!(record.mailing_address.country, "United States");
    }

    #[test]
    fn test_add_stops_at_capacity() {
        let mut record = BusinessInformationRecord::default();
        assert_eq!(record.add_physical_location(), Ok(1));
        assert_eq!(record.add_physical_location(), Ok(2));
        assert_eq!(
            record.add_physical_location(),
            Err(LocationError::AtCapacity { max: 3 })
        );
        assert_eq!(record.physical_locations().len(), 3);
    }

    #[test]
    fn test_remove_refuses_last_location() {
        let mut record = BusinessInformationRecord::default();
        assert_eq!(
            record.remove_physical_location(0),
            Err(LocationError::AtMinimum { min: 1 })
        );
        assert_eq!(record.physical_locations().len(), 1);
    }

    #[test]
    fn test_remove_shifts_later_entries() {
        let mut record = BusinessInformationRecord::default();
        record.add_physical_location().unwrap();
        record.add_physical_location().unwrap();
        record
            .set(FieldPath::Physical(2, AddressField::City), "Third")
            .unwrap();

        let removed = record.remove_physical_location(1).unwrap();
        assert!(removed.city.is_empty());
        assert_eq!(record.physical_locations().len(), 2);
        assert_eq!(record.physical_locations()[1].city, "Third");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut record = BusinessInformationRecord::default();
        record.add_physical_location().unwrap();
        assert_eq!(
            record.remove_physical_location(5),
            Err(LocationError::OutOfRange { index: 5, len: 2 })
        );
        assert_eq!(record.physical_locations().len(), 2);
    }

    #[test]
    fn test_added_location_inherits_country() {
        let mut record = BusinessInformationRecord::with_country("Canada");
        let index = record.add_physical_location().unwrap();
        assert_eq!(record.physical_locations()[index].country, "Canada");
    }

    #[test]
    fn test_set_and_get_by_path() {
        let mut record = BusinessInformationRecord::default();
        record
            .set(FieldPath::Business(BusinessField::Fein), "12-3456789")
            .unwrap();
        record
            .set(FieldPath::Mailing(AddressField::Zip), "53703")
            .unwrap();
        assert_eq!(record.fein, "12-3456789");
        assert_eq!(record.get(FieldPath::Mailing(AddressField::Zip)), Some("53703"));
        assert_eq!(record.get(FieldPath::Physical(1, AddressField::Zip)), None);
        assert_eq!(
            record.set(FieldPath::Physical(1, AddressField::Zip), "1"),
            Err(LocationError::OutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_copy_is_deep() {
        let mut original = BusinessInformationRecord::default();
        let copy = original.clone();
        original.mailing_address.city = "Madison".to_string();
        assert!(copy.mailing_address.city.is_empty());
    }

    #[test]
    fn test_from_yaml_defaults_missing_keys() {
        let record = BusinessInformationRecord::from_yaml("legalName: Acme LLC\n").unwrap();
        assert_eq!(record.legal_name, "Acme LLC");
        assert_eq!(record.physical_locations().len(), 1);
        assert_eq!(record.mailing_address.country, "United States");
    }

    #[test]
    fn test_from_yaml_rejects_too_many_locations() {
        let yaml = r#"
physicalLocations:
  - city: A
  - city: B
  - city: C
  - city: D
"#;
        let err = BusinessInformationRecord::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, RecordError::LocationCount { found: 4, .. }));
    }

    #[test]
    fn test_from_yaml_rejects_empty_location_list() {
        let err = BusinessInformationRecord::from_yaml("physicalLocations: []\n").unwrap_err();
        assert!(matches!(err, RecordError::LocationCount { found: 0, .. }));
    }

    #[test]
    fn test_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("drafts").join("step.yaml");

        let mut record = BusinessInformationRecord::default();
        record.legal_name = "Acme LLC".to_string();
        record.add_physical_location().unwrap();
        record.save(&path).unwrap();

        let loaded = BusinessInformationRecord::load(&path).unwrap();
        assert_eq!(loaded, record);
    }
}
