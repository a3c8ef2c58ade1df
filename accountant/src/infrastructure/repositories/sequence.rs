use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic surrogate id source, starting at 1
#[derive(Debug, Default)]
pub(crate) struct IdSequence(AtomicU64);

impl IdSequence {
    pub(crate) fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Make sure ids handed out later are greater than `id`
    pub(crate) fn observe(&self, id: u64) {
        self.0.fetch_max(id, Ordering::Relaxed);
    }
}
