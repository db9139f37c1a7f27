//! Cooperative cancellation.
//!
//! A [`CancellationToken`] is a shared counter. Any clone may request
//! cancellation from any thread; the running algorithm polls
//! [`is_cancelling`](CancellationToken::is_cancelling) at safe points (loop
//! heads, before visiting a vertex or edge) and returns early.
//!
//! Nothing blocks: cancelling only raises a flag, and an algorithm that never
//! polls never stops.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A cloneable, thread-safe cancellation flag.
///
/// Clones share the same counter, so a token handed to an algorithm can be
/// cancelled through any other clone.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    requests: Arc<AtomicUsize>,
}

impl CancellationToken {
    /// Creates a token that is not cancelling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent; repeated calls keep the token set.
    pub fn cancel(&self) {
        self.requests.fetch_add(1, Ordering::AcqRel);
    }

    /// Returns true once cancellation has been requested and not yet reset.
    #[inline]
    pub fn is_cancelling(&self) -> bool {
        self.requests.load(Ordering::Acquire) > 0
    }

    /// Clears all pending cancellation requests.
    pub fn reset(&self) {
        self.requests.store(0, Ordering::Release);
    }

    /// Returns true if both tokens share the same counter.
    pub fn same_as(&self, other: &CancellationToken) -> bool {
        Arc::ptr_eq(&self.requests, &other.requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_and_reset() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelling());

        token.cancel();
        token.cancel();
        assert!(token.is_cancelling());

        token.reset();
        assert!(!token.is_cancelling());
    }

    #[test]
    fn test_clones_share_state() {
        let token = CancellationToken::new();
        let other = token.clone();
        other.cancel();
        assert!(token.is_cancelling());
        assert!(token.same_as(&other));
        assert!(!token.same_as(&CancellationToken::new()));
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let token = CancellationToken::new();
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel())
            .join()
            .unwrap();
        assert!(token.is_cancelling());
    }
}
