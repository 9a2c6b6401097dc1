//! Cancellation shared between a game session and its turn task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A thread-safe stop flag for cancelling a turn in progress.
///
/// Pausing a session raises it; the search polls it at every node and a
/// waiting turn task checks it before blocking again.
#[derive(Clone, Debug)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new stop flag (initially not stopped).
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Create a stop flag that is already set.
    #[must_use]
    pub fn stopped() -> Self {
        StopFlag(Arc::new(AtomicBool::new(true)))
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_flag_lifecycle() {
        let flag = StopFlag::new();
        assert!(!flag.is_stopped());

        flag.stop();
        assert!(flag.is_stopped());
    }

    #[test]
    fn test_stop_flag_clone_shares_state() {
        let flag1 = StopFlag::new();
        let flag2 = flag1.clone();

        flag1.stop();
        assert!(flag2.is_stopped());
    }

    #[test]
    fn test_stop_flag_across_threads() {
        let flag = StopFlag::new();
        let remote = flag.clone();
        std::thread::spawn(move || remote.stop()).join().unwrap();
        assert!(flag.is_stopped());
    }
}
