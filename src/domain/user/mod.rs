//! User domain
//!
//! Read-only copies of directory users, the draft creation form, and the
//! trait through which the directory service is reached.

mod directory;
mod entity;
mod form;
mod validation;

pub use directory::UserDirectory;
pub use entity::{NewUser, User, UserId};
pub use form::{FormField, FormState};
pub use validation::{
    validate_date_of_birth, validate_email, validate_user_id, validate_username,
    UserValidationError, DATE_OF_BIRTH_FORMAT,
};

#[cfg(test)]
pub use directory::MockUserDirectory;
