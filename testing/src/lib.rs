//! # Composable Tasks Testing
//!
//! Testing utilities and helpers for the Composable Tasks architecture.
//!
//! This crate provides:
//! - [`FakeTasksRepository`]: in-memory repository with an error switch
//! - [`ObservableValueExt`]: `get_or_await_value` on any observable value
//! - [`ReducerTest`]: Given-When-Then reducer tests
//! - Property-based testing strategies for tasks
//! - Idempotent tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use composable_tasks_testing::{FakeTasksRepository, ObservableValueExt};
//!
//! #[test]
//! fn add_new_task_sets_new_task_event() {
//!     let view_model = TasksViewModel::new(Arc::new(FakeTasksRepository::new()));
//!
//!     view_model.add_new_task().unwrap();
//!
//!     let event = view_model.new_task_event().get_or_await_value().unwrap();
//!     assert!(event.consume_if_unhandled().is_some());
//! }
//! ```

pub use composable_tasks_core::awaiter::DEFAULT_AWAIT_TIMEOUT;
use composable_tasks_core::awaiter::{AwaitError, await_value, await_value_after};
use composable_tasks_core::observable::ObservableValue;
use std::time::Duration;

mod fake_repository;
mod reducer_test;

/// Test helpers for observable values
pub mod helpers {
    use super::{AwaitError, DEFAULT_AWAIT_TIMEOUT, Duration, ObservableValue, await_value, await_value_after};

    /// Blocking reads of observable values for tests
    ///
    /// # Example
    ///
    /// ```
    /// use composable_tasks_core::observable::ObservableValue;
    /// use composable_tasks_testing::ObservableValueExt;
    ///
    /// let visible = ObservableValue::with_value(true);
    /// assert_eq!(visible.get_or_await_value(), Ok(true));
    /// ```
    pub trait ObservableValueExt<T> {
        /// Current value, or the next one within [`DEFAULT_AWAIT_TIMEOUT`]
        ///
        /// # Errors
        ///
        /// Returns [`AwaitError::Timeout`] if no value arrives in time.
        fn get_or_await_value(&self) -> Result<T, AwaitError>;

        /// Current value, or the next one within `timeout`
        ///
        /// # Errors
        ///
        /// Returns [`AwaitError::Timeout`] if no value arrives in time.
        fn get_or_await_value_within(&self, timeout: Duration) -> Result<T, AwaitError>;

        /// Attach, run `after_observe`, then wait up to [`DEFAULT_AWAIT_TIMEOUT`]
        ///
        /// # Errors
        ///
        /// Returns [`AwaitError::Timeout`] if no value arrives in time.
        fn get_or_await_value_after<F: FnOnce()>(&self, after_observe: F) -> Result<T, AwaitError>;
    }

    impl<T> ObservableValueExt<T> for ObservableValue<T>
    where
        T: Clone + Send + 'static,
    {
        fn get_or_await_value(&self) -> Result<T, AwaitError> {
            await_value(self, DEFAULT_AWAIT_TIMEOUT)
        }

        fn get_or_await_value_within(&self, timeout: Duration) -> Result<T, AwaitError> {
            await_value(self, timeout)
        }

        fn get_or_await_value_after<F: FnOnce()>(&self, after_observe: F) -> Result<T, AwaitError> {
            await_value_after(self, DEFAULT_AWAIT_TIMEOUT, after_observe)
        }
    }

    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Honors `RUST_LOG` and defaults to `warn`. Safe to call from every test;
    /// only the first call installs anything.
    pub fn init_test_tracing() {
        use tracing_subscriber::EnvFilter;

        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use composable_tasks_core::task::Task;
    use proptest::prelude::*;

    /// Strategy for a single task with arbitrary title and completion flag
    pub fn arb_task() -> impl Strategy<Value = Task> {
        ("[A-Za-z ]{0,16}", "[a-z ]{0,32}", any::<bool>())
            .prop_map(|(title, description, completed)| Task::new(title, description).with_completed(completed))
    }

    /// Strategy for task lists of up to `max_len` tasks (possibly empty)
    pub fn arb_tasks(max_len: usize) -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec(arb_task(), 0..=max_len)
    }
}

// Re-export commonly used items
pub use fake_repository::FakeTasksRepository;
pub use helpers::{ObservableValueExt, init_test_tracing};
pub use reducer_test::{ReducerTest, assertions};
