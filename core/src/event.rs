//! Deliver-once event wrapper.
//!
//! A view-model keeps its last emitted value around, so a watcher that joins
//! late (for example after the screen is rebuilt) receives it again. Wrapping a
//! one-shot trigger such as "open the add-task screen" in a
//! [`SingleConsumptionEvent`] lets every watcher see the value while only the
//! first one acts on it.
//!
//! # Example
//!
//! ```
//! use composable_tasks_core::event::SingleConsumptionEvent;
//!
//! let event = SingleConsumptionEvent::new("task saved");
//!
//! assert_eq!(event.consume_if_unhandled(), Some(&"task saved"));
//! assert_eq!(event.consume_if_unhandled(), None);
//! assert_eq!(event.peek(), &"task saved");
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// A payload that can be consumed at most once.
///
/// Not `Clone`, since a copy would carry its own `consumed` flag. Share one
/// instance behind an `Arc` instead.
pub struct SingleConsumptionEvent<T> {
    payload: T,
    consumed: AtomicBool,
}

impl<T> SingleConsumptionEvent<T> {
    /// Wraps `payload` in an unconsumed event
    #[must_use]
    pub const fn new(payload: T) -> Self {
        Self {
            payload,
            consumed: AtomicBool::new(false),
        }
    }

    /// Returns the payload if no one has consumed it yet, and marks it consumed.
    ///
    /// When several threads race, exactly one of them gets `Some`.
    pub fn consume_if_unhandled(&self) -> Option<&T> {
        self.consumed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| &self.payload)
    }

    /// Returns the payload without touching the consumed flag
    #[must_use]
    pub const fn peek(&self) -> &T {
        &self.payload
    }

    /// Whether the payload has already been consumed
    #[must_use]
    pub fn has_been_handled(&self) -> bool {
        self.consumed.load(Ordering::Acquire)
    }
}

impl<T> From<T> for SingleConsumptionEvent<T> {
    fn from(payload: T) -> Self {
        Self::new(payload)
    }
}

impl<T: fmt::Debug> fmt::Debug for SingleConsumptionEvent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleConsumptionEvent")
            .field("payload", &self.payload)
            .field("consumed", &self.has_been_handled())
            .finish()
    }
}
