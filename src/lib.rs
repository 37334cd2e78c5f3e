//! User Roster
//!
//! Operator front-end for a REST user directory:
//! - Roster client that lists, registers and deletes users
//! - Web front-end (roster page, creation form, delete confirmation)
//! - Terminal commands for the same operations

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use infrastructure::{Outcome, RosterClient};
