//! Input checks for user fields
//!
//! These mirror what the input widgets themselves enforce (required fields,
//! email-shaped text, a real calendar date). Anything stricter is the
//! directory service's business.

use chrono::NaiveDate;
use thiserror::Error;
use validator::ValidateEmail;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID contains a control character")]
    InvalidIdCharacter,

    #[error("Username is required")]
    EmptyUsername,

    #[error("Email is required")]
    EmptyEmail,

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("Date of birth is required")]
    EmptyDateOfBirth,

    #[error("'{0}' is not a valid date, expected YYYY-MM-DD")]
    InvalidDateOfBirth(String),
}

/// Wire format of a date of birth
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

/// Validate a user ID
///
/// IDs are opaque; they only need to be non-empty and printable since they
/// end up in a URL path segment.
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.chars().any(char::is_control) {
        return Err(UserValidationError::InvalidIdCharacter);
    }

    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if !email.validate_email() {
        return Err(UserValidationError::InvalidEmail(email.to_string()));
    }

    Ok(())
}

pub fn validate_date_of_birth(date: &str) -> Result<(), UserValidationError> {
    if date.is_empty() {
        return Err(UserValidationError::EmptyDateOfBirth);
    }

    NaiveDate::parse_from_str(date, DATE_OF_BIRTH_FORMAT)
        .map(|_| ())
        .map_err(|_| UserValidationError::InvalidDateOfBirth(date.to_string()))
}
