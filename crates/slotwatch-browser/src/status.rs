//! Document status capture.

use std::sync::atomic::{AtomicU16, Ordering};

/// Holds the status of the most recent document response of one fetch.
///
/// A fresh cell is created for every fetch and never shared between fetches.
/// The response side records into it, the fetch reads it once navigation is
/// complete. `0` means no document response was seen.
#[derive(Debug, Default)]
pub struct StatusCell(AtomicU16);

impl StatusCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, status: u16) {
        self.0.store(status, Ordering::Release);
    }

    pub fn load(&self) -> u16 {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        assert_eq!(StatusCell::new().load(), 0);
    }

    #[test]
    fn last_document_wins() {
        let cell = StatusCell::new();
        cell.record(302);
        cell.record(200);
        assert_eq!(cell.load(), 200);
    }
}
