use std::{collections::BTreeMap, str::FromStr};

use reignivy_shared::lead::Field;
use validator::ValidationErrors;

/// Code reported by the `length(min = ..)` rules. A field's required check
/// takes precedence over any other rule that failed alongside it.
const REQUIRED_CODE: &str = "length";

/// Inline errors keyed by field plus the form-level `root` error.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct FieldErrors {
    fields: BTreeMap<Field, String>,
    root: Option<String>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// True when no field fails. The root error does not count.
    pub fn is_valid(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of failing fields.
    pub fn invalid_count(&self) -> usize {
        self.fields.len()
    }

    /// True when no field fails and no root error is set.
    pub fn has_no_errors(&self) -> bool {
        self.fields.is_empty() && self.root.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn set_root(&mut self, message: impl Into<String>) {
        self.root = Some(message.into());
    }

    pub fn clear_root(&mut self) {
        self.root = None;
    }

    /// Replaces the field entries with `other`'s, keeping the root error.
    pub fn replace_fields(&mut self, other: FieldErrors) {
        self.fields = other.fields;
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.root = None;
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();

        for (name, errors) in errors.field_errors() {
            let Ok(field) = Field::from_str(&name) else {
                continue;
            };

            let Some(error) = errors
                .iter()
                .find(|e| e.code == REQUIRED_CODE)
                .or_else(|| errors.first())
            else {
                continue;
            };

            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());

            fields.insert(field, message);
        }

        Self { fields, root: None }
    }
}
