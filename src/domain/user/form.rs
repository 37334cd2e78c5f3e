//! Draft input for a user that has not been created yet

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entity::NewUser;
use super::validation::{
    validate_date_of_birth, validate_email, validate_username, UserValidationError,
};

/// One editable field of the creation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Username,
    Email,
    DateOfBirth,
}

impl FormField {
    pub const ALL: [FormField; 3] = [Self::Username, Self::Email, Self::DateOfBirth];

    /// Wire / HTML name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::DateOfBirth => "dateOfBirth",
        }
    }

    /// Check a value the way the field's input widget would
    pub fn check(&self, value: &str) -> Result<(), UserValidationError> {
        match self {
            Self::Username => validate_username(value),
            Self::Email => validate_email(value),
            Self::DateOfBirth => validate_date_of_birth(value),
        }
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "username" => Ok(Self::Username),
            "email" => Ok(Self::Email),
            "dateOfBirth" | "date_of_birth" => Ok(Self::DateOfBirth),
            other => Err(format!("Unknown form field: {}", other)),
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creation form contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub username: String,
    pub email: String,
    pub date_of_birth: String,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::DateOfBirth => &self.date_of_birth,
        }
    }

    /// Replace exactly one field, leaving the others untouched
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Username => &mut self.username,
            FormField::Email => &mut self.email,
            FormField::DateOfBirth => &mut self.date_of_birth,
        };
        *slot = value.into();
    }

    /// First field whose value its widget would refuse
    pub fn first_invalid(&self) -> Option<(FormField, UserValidationError)> {
        FormField::ALL
            .iter()
            .find_map(|f| f.check(self.get(*f)).err().map(|e| (*f, e)))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            username: self.username.clone(),
            email: self.email.clone(),
            date_of_birth: self.date_of_birth.clone(),
        }
    }
}
