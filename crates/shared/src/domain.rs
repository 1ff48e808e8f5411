use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Subject,
        ContactField::Message,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, ContactField::Subject)
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One slot per contact field.
///
/// Used for the form values (`FieldMap<String>`) and the touched flags
/// (`FieldMap<bool>`); `Default` is the empty form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap<T> {
    pub name: T,
    pub email: T,
    pub subject: T,
    pub message: T,
}

impl<T> FieldMap<T> {
    pub fn get(&self, field: ContactField) -> &T {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: ContactField) -> &mut T {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: T) {
        *self.get_mut(field) = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &T)> {
        ContactField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

impl FieldMap<bool> {
    pub fn all(value: bool) -> Self {
        Self {
            name: value,
            email: value,
            subject: value,
            message: value,
        }
    }
}

pub type FormValues = FieldMap<String>;
pub type TouchedFields = FieldMap<bool>;
