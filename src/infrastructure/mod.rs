//! Infrastructure layer - External service implementations

pub mod directory;
pub mod logging;
pub mod roster;

pub use directory::{HttpUserDirectory, InMemoryUserDirectory};
pub use roster::{Answered, Confirm, Outcome, RosterClient, TerminalConfirm};
