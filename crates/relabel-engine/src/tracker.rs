//! Supersession of overlapping requests on one buffer.
//!
//! The engine is stateless, so it cannot tell that a result belongs to a
//! request the user has since replaced. Callers take a token when they start
//! a request and hand the result through [`RequestTracker::accept`], which
//! drops it if a newer request for the same buffer has begun.

use dashmap::DashMap;
use relabel_foundation::BufferHandle;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Identity of one request against one buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    buffer_id: String,
    generation: u64,
}

impl RequestToken {
    pub fn buffer_id(&self) -> &str {
        &self.buffer_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Latest request generation per buffer
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: DashMap<String, u64>,
    // Global so that a token never becomes current again after `forget`
    next_generation: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding any earlier one for the same buffer
    pub fn begin(&self, buffer: &BufferHandle) -> RequestToken {
        // Allocate under the entry lock so the stored generation is always the highest issued
        let mut latest = self.latest.entry(buffer.id.clone()).or_insert(0);
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed) + 1;
        *latest = generation;
        drop(latest);
        RequestToken {
            buffer_id: buffer.id.clone(),
            generation,
        }
    }

    pub fn is_current(&self, token: &RequestToken) -> bool {
        self.latest
            .get(&token.buffer_id)
            .is_some_and(|latest| *latest.value() == token.generation)
    }

    /// Pass `value` through only if `token` is still the buffer's latest request
    pub fn accept<T>(&self, token: &RequestToken, value: T) -> Option<T> {
        if self.is_current(token) {
            Some(value)
        } else {
            debug!(
                buffer = %token.buffer_id,
                generation = token.generation,
                "Discarding superseded result"
            );
            None
        }
    }

    /// Stop tracking a buffer, e.g. once it is closed
    pub fn forget(&self, buffer: &BufferHandle) {
        self.latest.remove(&buffer.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_supersedes() {
        let tracker = RequestTracker::new();
        let buffer = BufferHandle::for_path("/a.c");

        let first = tracker.begin(&buffer);
        let second = tracker.begin(&buffer);

        assert_eq!(tracker.accept(&first, "stale"), None);
        assert_eq!(tracker.accept(&second, "fresh"), Some("fresh"));
        // Accepting does not consume the token
        assert!(tracker.is_current(&second));
    }

    #[test]
    fn test_buffers_are_independent() {
        let tracker = RequestTracker::new();
        let a = tracker.begin(&BufferHandle::for_path("/a.c"));
        let b = tracker.begin(&BufferHandle::for_path("/b.c"));

        assert!(tracker.is_current(&a));
        assert!(tracker.is_current(&b));
        assert_eq!(a.buffer_id(), "/a.c");
    }

    #[test]
    fn test_forget() {
        let tracker = RequestTracker::new();
        let buffer = BufferHandle::for_path("/a.c");

        let old = tracker.begin(&buffer);
        tracker.forget(&buffer);
        assert!(!tracker.is_current(&old));

        let new = tracker.begin(&buffer);
        assert!(new.generation() > old.generation());
        assert!(!tracker.is_current(&old));
        assert!(tracker.is_current(&new));
    }
}
