//! Application state shared by the handlers

use crate::infrastructure::RosterClient;

/// One roster client per process; every browser session sees the same roster
#[derive(Clone)]
pub struct AppState {
    pub roster: RosterClient,
}

impl AppState {
    pub fn new(roster: RosterClient) -> Self {
        Self { roster }
    }
}
