use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

/// A monotonically increasing id source shared by every element that draws
/// ids from it. Cloning shares the underlying counter.
#[derive(Debug, Clone, Default)]
pub struct IdCounter(Arc<AtomicU32>);

impl IdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value and advances the counter.
    pub fn next(&self) -> u32 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    #[cfg(test)]
    fn peek(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }
}
