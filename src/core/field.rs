//! Field identifiers for the business information step
//!
//! Every input on the step is addressed by a [`FieldPath`]. Nested address
//! fields are disambiguated by section, so the mailing ZIP and the second
//! physical location's ZIP render as `mailingAddress.zip` and
//! `physicalLocations[1].zip`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Top-level fields of the business information record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BusinessField {
    Fein,
    LegalName,
    TradeName,
    PhoneNumber,
    Email,
}

impl BusinessField {
    /// Identifier used in field paths and draft files
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessField::Fein => "fein",
            BusinessField::LegalName => "legalName",
            BusinessField::TradeName => "tradeName",
            BusinessField::PhoneNumber => "phoneNumber",
            BusinessField::Email => "email",
        }
    }

    /// Human-readable label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            BusinessField::Fein => "FEIN",
            BusinessField::LegalName => "Legal Name",
            BusinessField::TradeName => "Trade Name",
            BusinessField::PhoneNumber => "Phone Number",
            BusinessField::Email => "Email Address",
        }
    }

    /// All business fields in display order
    pub fn all() -> &'static [BusinessField] {
        &[
            BusinessField::Fein,
            BusinessField::LegalName,
            BusinessField::TradeName,
            BusinessField::PhoneNumber,
            BusinessField::Email,
        ]
    }
}

/// Fields of an address record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressField {
    Country,
    AddressLine1,
    AddressLine2,
    City,
    State,
    Zip,
    Extension,
}

impl AddressField {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressField::Country => "country",
            AddressField::AddressLine1 => "addressLine1",
            AddressField::AddressLine2 => "addressLine2",
            AddressField::City => "city",
            AddressField::State => "state",
            AddressField::Zip => "zip",
            AddressField::Extension => "extension",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AddressField::Country => "Country",
            AddressField::AddressLine1 => "Address Line 1",
            AddressField::AddressLine2 => "Address Line 2",
            AddressField::City => "City",
            AddressField::State => "State",
            AddressField::Zip => "Zip Code",
            AddressField::Extension => "Extension",
        }
    }

    /// All address fields in display order
    pub fn all() -> &'static [AddressField] {
        &[
            AddressField::Country,
            AddressField::AddressLine1,
            AddressField::AddressLine2,
            AddressField::City,
            AddressField::State,
            AddressField::Zip,
            AddressField::Extension,
        ]
    }
}

/// Section-qualified identifier of a single input on the step
///
/// The derived ordering sorts business fields first, then the mailing
/// address, then physical locations by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Business(BusinessField),
    Mailing(AddressField),
    Physical(usize, AddressField),
}

impl FieldPath {
    /// Label for prompts, e.g. "Physical Location 2 - City"
    pub fn label(&self) -> String {
        match self {
            FieldPath::Business(field) => field.label().to_string(),
            FieldPath::Mailing(field) => format!("Mailing Address - {}", field.label()),
            FieldPath::Physical(index, field) => {
                format!("Physical Location {} - {}", index + 1, field.label())
            }
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Business(field) => write!(f, "{}", field.as_str()),
            FieldPath::Mailing(field) => write!(f, "mailingAddress.{}", field.as_str()),
            FieldPath::Physical(index, field) => {
                write!(f, "physicalLocations[{}].{}", index, field.as_str())
            }
        }
    }
}

/// Error returned when a field identifier cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown field: '{0}'")]
pub struct FieldPathError(pub String);

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || FieldPathError(s.to_string());

        if let Some(rest) = s.strip_prefix("mailingAddress.") {
            return parse_address_field(rest).map(FieldPath::Mailing).ok_or_else(err);
        }

        if let Some(rest) = s.strip_prefix("physicalLocations[") {
            let (index, field) = rest.split_once("].").ok_or_else(err)?;
            let index: usize = index.parse().map_err(|_| err())?;
            let field = parse_address_field(field).ok_or_else(err)?;
            return Ok(FieldPath::Physical(index, field));
        }

        BusinessField::all()
            .iter()
            .find(|f| f.as_str() == s)
            .map(|f| FieldPath::Business(*f))
            .ok_or_else(err)
    }
}

fn parse_address_field(s: &str) -> Option<AddressField> {
    AddressField::all().iter().copied().find(|f| f.as_str() == s)
}
