//! Roster client and its supporting pieces

mod client;
mod confirm;
mod sequencer;

pub use client::{Outcome, RosterClient};
pub use confirm::{Answered, Confirm, TerminalConfirm};
pub use sequencer::{Sequencer, Ticket, Watermark};
