//! Address record - the postal address shape shared by mailing and physical addresses

use serde::{Deserialize, Serialize};

use crate::core::field::AddressField;

/// Country pre-filled in every new address
pub const DEFAULT_COUNTRY: &str = "United States";

/// A single postal address
///
/// Has no identity of its own; it is owned by the business information
/// record and copied along with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressRecord {
    pub country: String,
    pub address_line1: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address_line2: String,
    pub city: String,
    /// Two-letter state code
    pub state: String,
    pub zip: String,
    /// Optional ZIP+4 suffix
    #[serde(skip_serializing_if = "String::is_empty")]
    pub extension: String,
}

impl Default for AddressRecord {
    fn default() -> Self {
        Self::with_country(DEFAULT_COUNTRY)
    }
}

impl AddressRecord {
    /// Create an empty address with the given country pre-filled
    ///
    /// Falls back to [`DEFAULT_COUNTRY`] when `country` is blank.
    pub fn with_country(country: &str) -> Self {
        let country = if country.trim().is_empty() {
            DEFAULT_COUNTRY
        } else {
            country
        };
        Self {
            country: country.to_string(),
            address_line1: String::new(),
            address_line2: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            extension: String::new(),
        }
    }

    /// Get a field value
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Country => &self.country,
            AddressField::AddressLine1 => &self.address_line1,
            AddressField::AddressLine2 => &self.address_line2,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Zip => &self.zip,
            AddressField::Extension => &self.extension,
        }
    }

    /// Replace a field value
    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AddressField::Country => self.country = value,
            AddressField::AddressLine1 => self.address_line1 = value,
            AddressField::AddressLine2 => self.address_line2 = value,
            AddressField::City => self.city = value,
            AddressField::State => self.state = value,
            AddressField::Zip => self.zip = value,
            AddressField::Extension => self.extension = value,
        }
    }

    /// One-line summary for menus, e.g. "100 Main St, Madison, WI 53703"
    pub fn summary(&self) -> String {
        if self.address_line1.trim().is_empty() {
            return "(empty)".to_string();
        }
        let mut zip = self.zip.clone();
        if !self.extension.is_empty() {
            zip = format!("{}-{}", zip, self.extension);
        }
        format!("{}, {}, {} {}", self.address_line1, self.city, self.state, zip)
    }
}
