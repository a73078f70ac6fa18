use std::sync::atomic::{AtomicU32, Ordering};

/// Monotonic identifier source. Values are handed out once and never depend on how many rows
/// a collection currently holds.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU32,
}

impl IdSequence {
    pub fn starting_at(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }

    /// Sequence whose first value follows `highest`, e.g. the largest seeded id.
    pub fn after(highest: u32) -> Self {
        Self::starting_at(highest.saturating_add(1))
    }

    pub fn next_value(&self) -> u32 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    pub fn peek(&self) -> u32 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
