//! Monotonic tickets for discarding stale results

use std::sync::atomic::{AtomicU64, Ordering};

/// Position of an operation in start order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Hands out strictly increasing tickets
#[derive(Debug, Default)]
pub struct Sequencer {
    issued: AtomicU64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Newest ticket whose result has been applied
///
/// Lives next to the data it guards, under the same lock, so admitting a
/// ticket and writing its result happen together.
#[derive(Debug, Default, Clone, Copy)]
pub struct Watermark {
    latest: Option<Ticket>,
}

impl Watermark {
    /// Accept `ticket` unless a newer one has already been applied
    pub fn admit(&mut self, ticket: Ticket) -> bool {
        match self.latest {
            Some(latest) if latest > ticket => false,
            _ => {
                self.latest = Some(ticket);
                true
            }
        }
    }
}
