//! Roster domain
//!
//! State owned by the roster client and the pure display helpers used to
//! render it.

mod format;
mod state;

pub use format::{format_date, INVALID_DATE};
pub use state::{
    MessageKind, RosterSnapshot, RosterState, StatusMessage, CREATE_ERROR, CREATE_SUCCESS,
    DELETE_ERROR, DELETE_PROMPT, DELETE_SUCCESS, FETCH_ERROR, SUBMIT_BUSY,
};
