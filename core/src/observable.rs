//! Publish/subscribe value cell.
//!
//! [`ObservableValue`] holds zero or one current value and pushes every new
//! value to its registered watchers. It has no lifecycle awareness: a watcher
//! stays registered until it is explicitly removed, either through
//! [`ObservableValue::unsubscribe`] or by dropping a [`WatchGuard`].
//!
//! # Delivery rules
//!
//! - A watcher registered while the cell holds a value is called immediately,
//!   on the subscribing thread, with that cached value.
//! - Watchers are called outside the internal lock, so a watcher may read the
//!   cell, set it, or unsubscribe itself.
//! - A watcher removed while a notification is already in flight can still see
//!   that one notification. Watchers that must fire at most once guard
//!   themselves (see [`crate::awaiter`]).
//!
//! # Example
//!
//! ```
//! use composable_tasks_core::observable::ObservableValue;
//! use std::sync::{Arc, Mutex};
//!
//! let visible = ObservableValue::with_value(true);
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let id = visible.subscribe(move |v: &bool| sink.lock().unwrap().push(*v));
//! visible.set(false);
//! visible.unsubscribe(id);
//! visible.set(true);
//!
//! assert_eq!(*seen.lock().unwrap(), vec![true, false]);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Identifier of a registered watcher
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WatcherId(u64);

type Watcher<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Cell<T> {
    value: Option<T>,
    watchers: Vec<(WatcherId, Watcher<T>)>,
}

/// In-process observable value with a last-value cache.
///
/// Cloning an `ObservableValue` yields another handle to the same cell.
pub struct ObservableValue<T> {
    cell: Arc<Mutex<Cell<T>>>,
    next_id: Arc<AtomicU64>,
}

impl<T> ObservableValue<T> {
    /// Creates an empty cell
    #[must_use]
    pub fn new() -> Self {
        Self::from_option(None)
    }

    /// Creates a cell already holding `value`
    #[must_use]
    pub fn with_value(value: T) -> Self {
        Self::from_option(Some(value))
    }

    fn from_option(value: Option<T>) -> Self {
        Self {
            cell: Arc::new(Mutex::new(Cell {
                value,
                watchers: Vec::new(),
            })),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Cell<T>> {
        self.cell.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes the watcher registered under `id`.
    ///
    /// Returns `false` if it was already removed.
    pub fn unsubscribe(&self, id: WatcherId) -> bool {
        let mut cell = self.lock();
        let before = cell.watchers.len();
        cell.watchers.retain(|(watcher_id, _)| *watcher_id != id);
        let removed = cell.watchers.len() != before;
        drop(cell);

        if removed {
            tracing::trace!(watcher = id.0, "Watcher detached");
        }
        removed
    }

    /// Number of currently registered watchers
    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.lock().watchers.len()
    }

    /// Whether the cell currently holds a value
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.lock().value.is_some()
    }
}

impl<T: Clone> ObservableValue<T> {
    /// Returns a copy of the current value, if any
    #[must_use]
    pub fn value(&self) -> Option<T> {
        self.lock().value.clone()
    }

    /// Stores `value` and notifies every registered watcher
    pub fn set(&self, value: T) {
        let watchers: Vec<Watcher<T>> = {
            let mut cell = self.lock();
            cell.value = Some(value.clone());
            cell.watchers.iter().map(|(_, w)| Arc::clone(w)).collect()
        };

        tracing::trace!(watchers = watchers.len(), "Publishing value");
        for watcher in watchers {
            watcher(&value);
        }
    }

    /// Registers `watcher` and returns its identifier.
    ///
    /// If the cell already holds a value, `watcher` is called with it before
    /// this method returns.
    pub fn subscribe<F>(&self, watcher: F) -> WatcherId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = WatcherId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let watcher: Watcher<T> = Arc::new(watcher);

        let cached = {
            let mut cell = self.lock();
            cell.watchers.push((id, Arc::clone(&watcher)));
            cell.value.clone()
        };

        tracing::trace!(watcher = id.0, cached = cached.is_some(), "Watcher attached");
        if let Some(value) = cached {
            watcher(&value);
        }
        id
    }

    /// Registers `watcher` and returns a guard that removes it on drop
    #[must_use = "dropping the guard detaches the watcher immediately"]
    pub fn watch<F>(&self, watcher: F) -> WatchGuard<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.subscribe(watcher);
        WatchGuard {
            source: self.clone(),
            id,
        }
    }
}

impl<T> Clone for ObservableValue<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T> Default for ObservableValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.lock();
        f.debug_struct("ObservableValue")
            .field("value", &cell.value)
            .field("watchers", &cell.watchers.len())
            .finish()
    }
}

/// Keeps a watcher registered for as long as the guard lives
pub struct WatchGuard<T> {
    source: ObservableValue<T>,
    id: WatcherId,
}

impl<T> WatchGuard<T> {
    /// Identifier of the guarded watcher
    #[must_use]
    pub const fn id(&self) -> WatcherId {
        self.id
    }
}

impl<T> Drop for WatchGuard<T> {
    fn drop(&mut self) {
        self.source.unsubscribe(self.id);
    }
}

impl<T> fmt::Debug for WatchGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchGuard").field("id", &self.id).finish()
    }
}
