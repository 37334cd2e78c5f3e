//! Client-side roster state

use serde::Serialize;

use crate::domain::user::{FormState, User, UserId};

pub const FETCH_ERROR: &str = "Error fetching users";
pub const CREATE_SUCCESS: &str = "User added successfully!";
pub const CREATE_ERROR: &str = "Error adding user";
pub const SUBMIT_BUSY: &str = "A submission is already in progress";
pub const DELETE_SUCCESS: &str = "User deleted successfully!";
pub const DELETE_ERROR: &str = "Error deleting user";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

/// Outcome text shown to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Cached roster plus the status of the last operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RosterState {
    users: Vec<User>,
    loading: bool,
    message: Option<StatusMessage>,
}

impl RosterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id() == id)
    }

    /// A create submission is in flight
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Message text, empty when there is none
    pub fn message_text(&self) -> &str {
        self.message.as_ref().map(|m| m.text.as_str()).unwrap_or("")
    }

    pub(crate) fn replace_users(&mut self, users: Vec<User>) {
        self.users = users;
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub(crate) fn set_message(&mut self, message: Option<StatusMessage>) {
        self.message = message;
    }
}

/// Consistent copy of everything a surface needs to render
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RosterSnapshot {
    pub roster: RosterState,
    pub form: FormState,
}
