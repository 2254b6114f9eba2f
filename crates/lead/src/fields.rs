use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use reignivy_shared::lead::Field;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::FieldErrors;

pub const NAME_MAX_LENGTH: usize = 50;
pub const MESSAGE_MAX_LENGTH: usize = 250;

/// Local part, `@`, dotted domain ending in a 2+ letter TLD. Leading and
/// doubled dots are rejected by `validate_email_dots`.
static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$").unwrap()
});

static RE_UK_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+44|0)[1-9][0-9]{1,4}\s?[0-9]{3,4}\s?[0-9]{3,4}$").unwrap()
});

/// Values captured by either lead form. Every field is plain text at rest.
#[derive(Validate, Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct FormFields {
    #[validate(
        length(min = 1, message = "Full name is required"),
        custom(function = "validate_name_max")
    )]
    #[serde(default)]
    pub name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        regex(path = *RE_EMAIL, message = "Please enter a valid email address"),
        custom(function = "validate_email_dots")
    )]
    #[serde(default)]
    pub email: String,
    #[validate(
        length(min = 1, message = "Phone number is required"),
        regex(path = *RE_UK_PHONE, message = "Please enter a valid UK phone number")
    )]
    #[serde(default)]
    pub phone: String,
    #[validate(length(min = 1, message = "Please select a membership plan"))]
    #[serde(default)]
    pub membership: String,
    #[validate(
        length(min = 10, message = "Message must be at least 10 characters"),
        custom(function = "validate_message_max")
    )]
    #[serde(default)]
    pub message: String,
}

impl FormFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Membership => &self.membership,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Membership => self.membership = value,
            Field::Message => self.message = value,
        }
    }
}

/// Runs every rule over every field and keeps one message per failing field.
pub fn validate_fields(fields: &FormFields) -> FieldErrors {
    match fields.validate() {
        Ok(_) => FieldErrors::default(),
        Err(errors) => FieldErrors::from(&errors),
    }
}

fn validate_name_max(name: &str) -> Result<(), ValidationError> {
    max_length(
        name,
        NAME_MAX_LENGTH,
        "Full name must be 50 characters or less",
    )
}

fn validate_message_max(message: &str) -> Result<(), ValidationError> {
    max_length(
        message,
        MESSAGE_MAX_LENGTH,
        "Message must be 250 characters or less",
    )
}

fn validate_email_dots(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || (!email.starts_with('.') && !email.contains("..")) {
        return Ok(());
    }

    Err(ValidationError::new("email")
        .with_message(Cow::Borrowed("Please enter a valid email address")))
}

fn max_length(value: &str, max: usize, message: &'static str) -> Result<(), ValidationError> {
    if value.chars().count() <= max {
        return Ok(());
    }

    Err(ValidationError::new("max_length").with_message(Cow::Borrowed(message)))
}
