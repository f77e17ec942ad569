//! Field validation for registration payloads.

use serde::{Deserialize, Serialize};

use crate::model::{User, UserResource};

pub const MUST_NOT_BE_NULL: &str = "must not be null";

/// A single invalid input field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Body of a 400 response caused by invalid input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResult {
    pub field_errors: Vec<FieldValidationError>,
}

impl ErrorResult {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_errors: vec![FieldValidationError::new(field, message)],
        }
    }

    fn require<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.field_errors
                .push(FieldValidationError::new(field, MUST_NOT_BE_NULL));
        }
        value
    }
}

/// Check every required field and map the resource to a [`User`]. All
/// failures are collected, not just the first.
pub fn validate_user(resource: &UserResource) -> Result<User, ErrorResult> {
    let mut errors = ErrorResult::default();
    let name = errors.require("name", resource.name.clone());
    let email = errors.require("email", resource.email.clone());
    match (name, email) {
        (Some(name), Some(email)) => Ok(User { name, email }),
        _ => Err(errors),
    }
}
