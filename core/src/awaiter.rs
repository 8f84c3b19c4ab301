//! Blocking and async bridges from observable values to plain reads.
//!
//! [`await_value`] attaches a self-detaching watcher to an
//! [`ObservableValue`], waits for its first notification and returns the
//! delivered value. It blocks the calling thread and is meant for tests and
//! orchestration code; request-serving code should subscribe directly or use
//! [`await_value_async`].
//!
//! Every path out of an awaiter (value, timeout or panic in the
//! after-subscribe hook) removes the watcher, so repeated calls against the
//! same source never accumulate registrations.
//!
//! # Example
//!
//! ```
//! use composable_tasks_core::awaiter::{AwaitError, await_value};
//! use composable_tasks_core::observable::ObservableValue;
//! use std::time::Duration;
//!
//! let ready = ObservableValue::with_value(true);
//! assert_eq!(await_value(&ready, Duration::from_secs(1)), Ok(true));
//!
//! let never: ObservableValue<bool> = ObservableValue::new();
//! let result = await_value(&never, Duration::from_millis(10));
//! assert!(matches!(result, Err(AwaitError::Timeout { .. })));
//! assert_eq!(never.watcher_count(), 0);
//! ```

use crate::observable::{ObservableValue, WatchGuard, WatcherId};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;
use thiserror::Error;

/// Timeout used when callers have no specific deadline in mind
pub const DEFAULT_AWAIT_TIMEOUT: Duration = Duration::from_secs(2);

/// Errors that can occur while awaiting an observable value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AwaitError {
    /// No value arrived before the deadline
    #[error("value was never produced (waited {waited:?})")]
    Timeout {
        /// How long the caller waited
        waited: Duration,
    },
}

/// Builds a watcher that hands the first value it sees to `deliver` and then
/// detaches itself from `source`.
///
/// `deliver` sits behind a mutex and is taken on first use, so concurrent
/// notifications cannot call it twice. The watcher learns its own id through
/// `own_id` once `subscribe` has returned. A notification that arrives during
/// `subscribe` (a cached value) cannot detach yet, so the next notification or
/// the caller's guard removes the watcher.
fn first_value_watcher<T, D>(
    source: &ObservableValue<T>,
    own_id: Arc<OnceLock<WatcherId>>,
    deliver: D,
) -> impl Fn(&T) + Send + Sync + use<T, D>
where
    T: Clone + Send + 'static,
    D: FnOnce(T) + Send + 'static,
{
    let source = source.clone();
    let deliver = Mutex::new(Some(deliver));

    move |value: &T| {
        let first = deliver.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(deliver) = first {
            deliver(value.clone());
        }
        // Late notifications only finish the detach
        if let Some(id) = own_id.get() {
            source.unsubscribe(*id);
        }
    }
}

fn attach<T, D>(source: &ObservableValue<T>, deliver: D) -> WatchGuard<T>
where
    T: Clone + Send + 'static,
    D: FnOnce(T) + Send + 'static,
{
    let own_id = Arc::new(OnceLock::new());
    let guard = source.watch(first_value_watcher(source, Arc::clone(&own_id), deliver));
    let _ = own_id.set(guard.id());
    guard
}

/// Blocks until `source` produces a value or `timeout` elapses.
///
/// A value already cached in `source` is returned without waiting.
///
/// # Errors
///
/// Returns [`AwaitError::Timeout`] if no value arrives within `timeout`.
pub fn await_value<T>(source: &ObservableValue<T>, timeout: Duration) -> Result<T, AwaitError>
where
    T: Clone + Send + 'static,
{
    await_value_after(source, timeout, || {})
}

/// Like [`await_value`], but runs `on_after_subscribe` once the watcher is
/// attached and before waiting.
///
/// Use the hook to trigger the action that produces the value, so the value
/// cannot be emitted before anyone is listening.
///
/// # Errors
///
/// Returns [`AwaitError::Timeout`] if no value arrives within `timeout`.
pub fn await_value_after<T, F>(
    source: &ObservableValue<T>,
    timeout: Duration,
    on_after_subscribe: F,
) -> Result<T, AwaitError>
where
    T: Clone + Send + 'static,
    F: FnOnce(),
{
    let (tx, rx) = mpsc::sync_channel(1);
    let _guard = attach(source, move |value| {
        // The receiver may already have given up after a timeout
        let _ = tx.try_send(value);
    });

    on_after_subscribe();

    rx.recv_timeout(timeout).map_err(|_| {
        tracing::warn!(?timeout, "Observable value was never produced");
        AwaitError::Timeout { waited: timeout }
    })
}

/// Async form of [`await_value`] for callers running on a tokio runtime.
///
/// The watcher is removed when the returned future completes or is dropped.
///
/// # Errors
///
/// Returns [`AwaitError::Timeout`] if no value arrives within `timeout`.
pub async fn await_value_async<T>(
    source: &ObservableValue<T>,
    timeout: Duration,
) -> Result<T, AwaitError>
where
    T: Clone + Send + 'static,
{
    let (tx, rx) = tokio::sync::oneshot::channel();
    let _guard = attach(source, move |value| {
        let _ = tx.send(value);
    });

    match tokio::time::timeout(timeout, rx).await {
        Ok(Ok(value)) => Ok(value),
        // The sender lives in the watcher, which only drops once detached
        Ok(Err(_)) | Err(_) => {
            tracing::warn!(?timeout, "Observable value was never produced");
            Err(AwaitError::Timeout { waited: timeout })
        },
    }
}
