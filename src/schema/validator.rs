//! Validation engine with field-keyed error reporting

use miette::{Diagnostic, NamedSource, SourceSpan};
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::core::address::AddressRecord;
use crate::core::business::BusinessInformationRecord;
use crate::core::field::{AddressField, BusinessField, FieldPath};
use crate::schema::rules::{FieldRule, RuleKind, ADDRESS_RULES, BUSINESS_RULES, EMAIL_PATTERN};

/// Category of a field failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum FieldErrorKind {
    /// Required value is empty or whitespace
    MissingRequiredField,
    /// Non-empty value fails a format rule
    FormatMismatch,
}

/// A failing field and the message to show under it
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

/// Every currently failing field, ordered by section
///
/// An empty collection means the record is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FieldPath, FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, path: &FieldPath) -> Option<&FieldError> {
        self.errors.get(path)
    }

    /// Message for a field, if it is failing
    pub fn message(&self, path: &FieldPath) -> Option<&str> {
        self.errors.get(path).map(|e| e.message.as_str())
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.errors.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldError)> {
        self.errors.iter()
    }

    /// Count of errors of one kind
    pub fn count_kind(&self, kind: FieldErrorKind) -> usize {
        self.errors.values().filter(|e| e.kind == kind).count()
    }

    fn insert_first(&mut self, path: FieldPath, error: FieldError) {
        self.errors.entry(path).or_insert(error);
    }

    /// One `path: message` line per error
    pub fn render(&self) -> String {
        self.errors
            .iter()
            .map(|(path, error)| format!("{}: {}\n", path, error.message))
            .collect()
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (path, error) in &self.errors {
            map.serialize_entry(&path.to_string(), error)?;
        }
        map.end()
    }
}

/// Error building an engine from a rule table
#[derive(Debug, Error)]
#[error("Invalid pattern '{pattern}': {source}")]
pub struct RuleError {
    pattern: String,
    #[source]
    source: regex::Error,
}

/// Rule with its pattern compiled
#[derive(Debug, Clone)]
enum Check {
    Required(&'static str),
    Matches(Regex, &'static str),
}

#[derive(Debug, Clone)]
struct CompiledRule<F> {
    field: F,
    check: Check,
}

/// Validator for the business information step
///
/// Patterns are compiled once; [`ValidationEngine::validate`] is a pure
/// function of the record, linear in the number of fields.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    business: Vec<CompiledRule<BusinessField>>,
    address: Vec<CompiledRule<AddressField>>,
}

impl ValidationEngine {
    /// Create an engine with the built-in rule table
    pub fn new() -> Self {
        Self::from_rules(BUSINESS_RULES, ADDRESS_RULES)
            .expect("built-in validation patterns compile")
    }

    /// Create an engine from custom rule tables
    pub fn from_rules(
        business: &[FieldRule<BusinessField>],
        address: &[FieldRule<AddressField>],
    ) -> Result<Self, RuleError> {
        Ok(Self {
            business: compile(business)?,
            address: compile(address)?,
        })
    }

    /// Validate the whole record
    pub fn validate(&self, record: &BusinessInformationRecord) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        for rule in &self.business {
            let path = FieldPath::Business(rule.field);
            if let Some(value) = record.get(path) {
                if let Some(error) = apply(&rule.check, value) {
                    errors.insert_first(path, error);
                }
            }
        }

        self.validate_address(&record.mailing_address, FieldPath::Mailing, &mut errors);
        for (index, location) in record.physical_locations().iter().enumerate() {
            self.validate_address(location, |f| FieldPath::Physical(index, f), &mut errors);
        }

        errors
    }

    /// Check a single value against the rules of the field at `path`
    ///
    /// Used by hosts that validate input before it reaches the record.
    pub fn check(&self, path: FieldPath, value: &str) -> Option<FieldError> {
        match path {
            FieldPath::Business(field) => self
                .business
                .iter()
                .filter(|r| r.field == field)
                .find_map(|r| apply(&r.check, value)),
            FieldPath::Mailing(field) | FieldPath::Physical(_, field) => self
                .address
                .iter()
                .filter(|r| r.field == field)
                .find_map(|r| apply(&r.check, value)),
        }
    }

    fn validate_address(
        &self,
        address: &AddressRecord,
        section: impl Fn(AddressField) -> FieldPath,
        errors: &mut ValidationErrors,
    ) {
        for rule in &self.address {
            if let Some(error) = apply(&rule.check, address.get(rule.field)) {
                errors.insert_first(section(rule.field), error);
            }
        }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn compile<F: Copy>(rules: &[FieldRule<F>]) -> Result<Vec<CompiledRule<F>>, RuleError> {
    rules
        .iter()
        .map(|rule| {
            let check = match rule.kind {
                RuleKind::Required { message } => Check::Required(message),
                RuleKind::Pattern { pattern, message } => {
                    Check::Matches(compile_pattern(pattern)?, message)
                }
                RuleKind::Email { message } => {
                    Check::Matches(compile_pattern(EMAIL_PATTERN)?, message)
                }
            };
            Ok(CompiledRule {
                field: rule.field,
                check,
            })
        })
        .collect()
}

fn compile_pattern(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|source| RuleError {
        pattern: pattern.to_string(),
        source,
    })
}

/// Run one check. Format checks ignore blank values so an empty field
/// only ever reports the required error.
fn apply(check: &Check, value: &str) -> Option<FieldError> {
    let trimmed = value.trim();
    match check {
        Check::Required(message) if trimmed.is_empty() => Some(FieldError {
            kind: FieldErrorKind::MissingRequiredField,
            message: message.to_string(),
        }),
        Check::Matches(regex, message) if !trimmed.is_empty() && !regex.is_match(trimmed) => {
            Some(FieldError {
                kind: FieldErrorKind::FormatMismatch,
                message: message.to_string(),
            })
        }
        _ => None,
    }
}

/// Terminal report for an invalid draft file
#[derive(Debug, Error, Diagnostic)]
#[error("Business information is invalid: {summary}")]
#[diagnostic(
    code(emreg::schema::validation_error),
    help("Correct the highlighted fields and run `emreg validate` again")
)]
pub struct ValidationReport {
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<FieldViolation>,
}

/// A single failing field inside a report
#[derive(Debug, Error, Diagnostic)]
#[error("{path}: {message}")]
pub struct FieldViolation {
    #[label("{}", self.hint)]
    span: SourceSpan,

    path: String,
    message: String,
    hint: String,
}

impl ValidationReport {
    pub fn new(filename: &str, source: &str, errors: &ValidationErrors) -> Self {
        let count = errors.len();
        let summary = if count == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", count)
        };
        let violations = errors
            .iter()
            .map(|(path, error)| FieldViolation {
                span: find_field_span(source, path),
                path: path.to_string(),
                message: error.message.clone(),
                hint: match error.kind {
                    FieldErrorKind::MissingRequiredField => "required".to_string(),
                    FieldErrorKind::FormatMismatch => "wrong format".to_string(),
                },
            })
            .collect();
        Self {
            summary,
            src: NamedSource::new(filename, source.to_string()),
            violations,
        }
    }

    /// Get the number of violations
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

/// Find the span of a field in draft YAML, falling back to its section
/// and then to the first line
fn find_field_span(content: &str, path: &FieldPath) -> SourceSpan {
    let end = content.len();
    let found = match path {
        FieldPath::Business(field) => find_key_line(content, 0, end, field.as_str()).map(key_span),
        FieldPath::Mailing(field) => {
            find_key_line(content, 0, end, "mailingAddress").map(|(start, _)| {
                find_key_line(content, start + 1, section_end(content, start), field.as_str())
                    .map(key_span)
                    .unwrap_or_else(|| line_span(content, start))
            })
        }
        FieldPath::Physical(index, field) => find_key_line(content, 0, end, "physicalLocations")
            .map(|(start, _)| match find_list_item(content, start, *index) {
                Some(item) => find_key_line(content, item, section_end(content, item), field.as_str())
                    .map(key_span)
                    .unwrap_or_else(|| line_span(content, item)),
                None => line_span(content, start),
            }),
    };
    found.unwrap_or_else(|| line_span(content, 0))
}

/// Lines paired with their byte offset, line endings stripped
fn lines_with_offsets(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content.split_inclusive('\n').scan(0, |offset, piece| {
        let start = *offset;
        *offset += piece.len();
        Some((start, piece.trim_end_matches(['\n', '\r'])))
    })
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn is_blank(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// First line in `from..to` that starts with `key:`, list dash allowed
fn find_key_line<'a>(
    content: &'a str,
    from: usize,
    to: usize,
    key: &str,
) -> Option<(usize, &'a str)> {
    let pattern = format!("{}:", key);
    lines_with_offsets(content)
        .filter(|(offset, _)| (from..to).contains(offset))
        .find(|(_, line)| {
            line.trim_start()
                .trim_start_matches("- ")
                .starts_with(&pattern)
        })
}

fn key_span((offset, line): (usize, &str)) -> SourceSpan {
    let indent = indent_of(line);
    (offset + indent, line.len() - indent).into()
}

/// Offset just past the block opened by the line at `start`
///
/// The block ends at the next non-blank line indented no deeper than it.
fn section_end(content: &str, start: usize) -> usize {
    let mut lines = lines_with_offsets(content).skip_while(|(offset, _)| *offset < start);
    let Some((_, head)) = lines.next() else {
        return content.len();
    };
    let indent = indent_of(head);
    lines
        .find(|(_, line)| !is_blank(line) && indent_of(line) <= indent)
        .map(|(offset, _)| offset)
        .unwrap_or(content.len())
}

/// Offset of the `index`-th item of the list whose key is at `list`
fn find_list_item(content: &str, list: usize, index: usize) -> Option<usize> {
    let parent = lines_with_offsets(content)
        .find(|(offset, _)| *offset == list)
        .map(|(_, line)| indent_of(line))?;
    let mut item_indent = None;
    let mut seen = 0;
    for (offset, line) in lines_with_offsets(content).filter(|(offset, _)| *offset > list) {
        if is_blank(line) {
            continue;
        }
        let indent = indent_of(line);
        let is_item = line.trim_start().starts_with('-');
        if indent < parent || (indent == parent && !is_item) {
            return None;
        }
        if !is_item || *item_indent.get_or_insert(indent) != indent {
            continue;
        }
        if seen == index {
            return Some(offset);
        }
        seen += 1;
    }
    None
}

fn line_span(content: &str, start: usize) -> SourceSpan {
    let start = start.min(content.len());
    let len = content
        .get(start..)
        .and_then(|rest| rest.split(['\r', '\n']).next())
        .map_or(0, str::len)
        .max(1);
    (start, len).into()
}
