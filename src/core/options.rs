//! Selectable options for the country and state inputs
//!
//! These lists only drive what a host offers in its dropdowns. Validation
//! never checks a value against them.

use serde::Serialize;

/// A dropdown entry: submitted value and display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub text: &'static str,
}

impl SelectOption {
    const fn new(value: &'static str, text: &'static str) -> Self {
        Self { value, text }
    }
}

const COUNTRIES: &[SelectOption] = &[
    SelectOption::new("United States", "United States"),
    SelectOption::new("Canada", "Canada"),
    SelectOption::new("Mexico", "Mexico"),
];

const US_STATES: &[SelectOption] = &[
    SelectOption::new("AL", "Alabama"),
    SelectOption::new("AK", "Alaska"),
    SelectOption::new("AZ", "Arizona"),
    SelectOption::new("AR", "Arkansas"),
    SelectOption::new("CA", "California"),
    SelectOption::new("CO", "Colorado"),
    SelectOption::new("CT", "Connecticut"),
    SelectOption::new("DE", "Delaware"),
    SelectOption::new("FL", "Florida"),
    SelectOption::new("GA", "Georgia"),
    SelectOption::new("HI", "Hawaii"),
    SelectOption::new("ID", "Idaho"),
    SelectOption::new("IL", "Illinois"),
    SelectOption::new("IN", "Indiana"),
    SelectOption::new("IA", "Iowa"),
    SelectOption::new("KS", "Kansas"),
    SelectOption::new("KY", "Kentucky"),
    SelectOption::new("LA", "Louisiana"),
    SelectOption::new("ME", "Maine"),
    SelectOption::new("MD", "Maryland"),
    SelectOption::new("MA", "Massachusetts"),
    SelectOption::new("MI", "Michigan"),
    SelectOption::new("MN", "Minnesota"),
    SelectOption::new("MS", "Mississippi"),
    SelectOption::new("MO", "Missouri"),
    SelectOption::new("MT", "Montana"),
    SelectOption::new("NE", "Nebraska"),
    SelectOption::new("NV", "Nevada"),
    SelectOption::new("NH", "New Hampshire"),
    SelectOption::new("NJ", "New Jersey"),
    SelectOption::new("NM", "New Mexico"),
    SelectOption::new("NY", "New York"),
    SelectOption::new("NC", "North Carolina"),
    SelectOption::new("ND", "North Dakota"),
    SelectOption::new("OH", "Ohio"),
    SelectOption::new("OK", "Oklahoma"),
    SelectOption::new("OR", "Oregon"),
    SelectOption::new("PA", "Pennsylvania"),
    SelectOption::new("RI", "Rhode Island"),
    SelectOption::new("SC", "South Carolina"),
    SelectOption::new("SD", "South Dakota"),
    SelectOption::new("TN", "Tennessee"),
    SelectOption::new("TX", "Texas"),
    SelectOption::new("UT", "Utah"),
    SelectOption::new("VT", "Vermont"),
    SelectOption::new("VA", "Virginia"),
    SelectOption::new("WA", "Washington"),
    SelectOption::new("WV", "West Virginia"),
    SelectOption::new("WI", "Wisconsin"),
    SelectOption::new("WY", "Wyoming"),
];

/// Countries offered for an address
pub fn countries() -> &'static [SelectOption] {
    COUNTRIES
}

/// US states as (code, name) options
pub fn us_states() -> &'static [SelectOption] {
    US_STATES
}

/// Find the position of `value` in a list of options
pub fn position_of(options: &[SelectOption], value: &str) -> Option<usize> {
    options.iter().position(|o| o.value == value)
}

/// Display name for a state code, if known
pub fn state_name(code: &str) -> Option<&'static str> {
    US_STATES
        .iter()
        .find(|o| o.value.eq_ignore_ascii_case(code))
        .map(|o| o.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifty_states() {
        assert_eq!(us_states().len(), 50);
        assert!(us_states().iter().all(|o| o.value.len() == 2));
    }

    #[test]
    fn test_default_country_is_offered() {
        assert_eq!(
            position_of(countries(), crate::core::address::DEFAULT_COUNTRY),
            Some(0)
        );
    }

    #[test]
    fn test_state_name_lookup() {
        assert_eq!(state_name("WI"), Some("Wisconsin"));
        assert_eq!(state_name("wi"), Some("Wisconsin"));
        assert_eq!(state_name("ZZ"), None);
    }
}
