use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use strum::{AsRefStr, Display, EnumString};
use validator::ValidationErrors;

/// Every payload field that can carry a validation message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    Name,
    Title,
    Description,
    Price,
    Category,
}

/// Field → message mapping reported for a rejected payload.
///
/// One message per field; the first one recorded wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: Field, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Add `other`'s messages for fields not already reported.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.insert(field, message);
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Wire form, keyed by the camelCase field name.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(field, message)| (field.to_string(), message.clone()))
            .collect()
    }

    /// Collect the first message of every failing field reported by `validator`.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut fields = Self::new();
        for (name, failures) in errors.field_errors() {
            let Ok(field) = Field::from_str(&name) else {
                tracing::warn!(field = %name, "Validation error on an unmapped field");
                continue;
            };
            let message = failures
                .iter()
                .find_map(|failure| failure.message.as_ref())
                .map(|message| message.to_string())
                .unwrap_or_else(|| format!("{} is invalid.", field));
            fields.insert(field, message);
        }
        fields
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}
