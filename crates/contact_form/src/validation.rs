//! Field-level rules for the contact form.
//!
//! Every rule is a pure function of the field and its current value.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use shared::{
    domain::{ContactField, FormValues},
    error::FieldError,
};

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;

/// `local@domain.tld`, no whitespace and a single `@`.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

pub type ValidationErrors = BTreeMap<ContactField, FieldError>;

pub fn validate_field(field: ContactField, value: &str) -> Option<FieldError> {
    let trimmed = value.trim();
    match field {
        ContactField::Name => {
            if trimmed.is_empty() {
                Some(FieldError::NameRequired)
            } else if trimmed.chars().count() < NAME_MIN_CHARS {
                Some(FieldError::NameTooShort)
            } else {
                None
            }
        }
        ContactField::Email => {
            if trimmed.is_empty() {
                Some(FieldError::EmailRequired)
            } else if !EMAIL_REGEX.is_match(value) {
                Some(FieldError::EmailInvalid)
            } else {
                None
            }
        }
        ContactField::Subject => None,
        ContactField::Message => {
            if trimmed.is_empty() {
                Some(FieldError::MessageRequired)
            } else if trimmed.chars().count() < MESSAGE_MIN_CHARS {
                Some(FieldError::MessageTooShort)
            } else {
                None
            }
        }
    }
}

/// Message form of [`validate_field`]: empty string when the value passes.
pub fn field_error_message(field: ContactField, value: &str) -> String {
    validate_field(field, value)
        .map(|err| err.to_string())
        .unwrap_or_default()
}

pub fn validate_values(values: &FormValues) -> ValidationErrors {
    values
        .iter()
        .filter_map(|(field, value)| validate_field(field, value).map(|err| (field, err)))
        .collect()
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
