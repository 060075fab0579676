//! Comment form decoding and validation.
//!
//! Every field defaults to empty so a missing field is reported alongside
//! the others instead of failing extraction outright.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::ecfs::{Address, AddressEntity, FilingInfo};

/// Field order used when listing problems back to the user.
const FIELD_ORDER: [&str; 9] = [
    "name", "email", "address", "address2", "city", "state", "zip", "zip4", "comment",
];

/// Body of `POST /submit`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SubmissionForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Street address is required"))]
    pub address: String,

    pub address2: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(custom(function = "validate_state"))]
    pub state: String,

    #[validate(custom(function = "validate_zip"))]
    pub zip: String,

    #[validate(custom(function = "validate_zip4"))]
    pub zip4: String,

    #[validate(length(min = 1, message = "Comment is required"))]
    pub comment: String,
}

impl SubmissionForm {
    /// Trim surrounding whitespace and upper-case the state code.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            address2: self.address2.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_ascii_uppercase(),
            zip: self.zip.trim().to_string(),
            zip4: self.zip4.trim().to_string(),
            comment: self.comment.trim().to_string(),
        }
    }

    /// Map a validated form onto filing info.
    pub fn into_filing_info(self) -> FilingInfo {
        let line2 = (!self.address2.is_empty()).then_some(self.address2);
        FilingInfo {
            name: self.name,
            email: self.email,
            address: AddressEntity::Postal(Address {
                line1: self.address,
                line2,
                city: self.city,
                state: self.state,
                zip: self.zip,
                zip4: self.zip4,
            }),
            text: self.comment,
        }
    }
}

/// Flatten validation errors into user-facing messages, in form order.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let by_field = errors.field_errors();
    FIELD_ORDER
        .iter()
        .filter_map(|field| by_field.get(*field))
        .flat_map(|errs| errs.iter())
        .map(|e| match &e.message {
            Some(message) => message.to_string(),
            None => format!("Invalid value ({})", e.code),
        })
        .collect()
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn all_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

fn validate_zip(zip: &str) -> Result<(), ValidationError> {
    if zip.is_empty() {
        return Err(invalid("required", "ZIP code is required"));
    }
    if !all_digits(zip, 5) {
        return Err(invalid("zip", "ZIP code must be five digits"));
    }
    Ok(())
}

fn validate_zip4(zip4: &str) -> Result<(), ValidationError> {
    if zip4.is_empty() || all_digits(zip4, 4) {
        Ok(())
    } else {
        Err(invalid("zip4", "ZIP+4 must be four digits"))
    }
}

fn validate_state(state: &str) -> Result<(), ValidationError> {
    if state.is_empty() {
        return Err(invalid("required", "State is required"));
    }
    if state.len() != 2 || !state.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(invalid("state", "State must be a two-letter code"));
    }
    Ok(())
}
