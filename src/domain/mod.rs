//! Domain layer - Core entities, state and traits

pub mod error;
pub mod roster;
pub mod user;

pub use error::DomainError;
pub use roster::{format_date, MessageKind, RosterSnapshot, RosterState, StatusMessage};
pub use user::{FormField, FormState, NewUser, User, UserDirectory, UserId};
