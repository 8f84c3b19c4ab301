//! # Composable Tasks Runtime
//!
//! Runtime implementation for the Composable Tasks architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution,
//! effect handling, and publication of state into observable values.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **Bindings**: Projections of state that are re-published after every `send`
//!
//! ## Example
//!
//! ```ignore
//! use composable_tasks_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Expose part of the state as an observable value
//! let visible = store.bind(|s| Some(s.add_button_visible));
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use composable_tasks_core::{effect::Effect, reducer::Reducer};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// A single `send` processed more actions than the configured limit
        ///
        /// This usually means two actions keep producing each other through
        /// effects. Actions still queued at that point are dropped.
        #[error("Feedback loop aborted after {limit} actions")]
        FeedbackLimitExceeded {
            /// The configured `max_actions_per_send`
            limit: usize,
        },
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use composable_tasks_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_actions_per_send(64);
/// assert_eq!(config.max_actions_per_send, 64);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum number of actions (initial plus feedback) one `send` may process
    pub max_actions_per_send: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_actions_per_send: usize) -> Self {
        Self {
            max_actions_per_send,
        }
    }

    /// Set the per-send action limit
    #[must_use]
    pub const fn with_max_actions_per_send(mut self, limit: usize) -> Self {
        self.max_actions_per_send = limit;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_actions_per_send: 1024,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{Arc, Effect, Mutex, Reducer, StoreConfig, StoreError, lock};
    use composable_tasks_core::observable::ObservableValue;
    use std::collections::VecDeque;
    use std::marker::PhantomData;

    type Binding<S> = Arc<dyn Fn(&S) + Send + Sync>;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind a `Mutex`, held only while the reducer runs)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    /// 5. Bindings that publish state projections into [`ObservableValue`]s
    ///
    /// Effects run synchronously on the thread that called [`Store::send`],
    /// after the state lock has been released.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Mutex<S>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        bindings: Mutex<Vec<Binding<S>>>,
        _action: PhantomData<fn() -> A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Clone,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            Self {
                state: Mutex::new(initial_state),
                reducer,
                environment,
                config,
                bindings: Mutex::new(Vec::new()),
                _action: PhantomData,
            }
        }

        /// Send an action to the store
        ///
        /// This:
        /// 1. Calls the reducer with (state, action, environment)
        /// 2. Executes the returned effects in order
        /// 3. Feeds actions produced by effects back into the reducer (FIFO)
        /// 4. Re-publishes every binding once the queue is empty
        ///
        /// Bindings are published even when the feedback limit aborts the
        /// loop, so observers see the state the store actually reached.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] if more than
        /// `max_actions_per_send` actions were processed.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&self, action: A) -> Result<(), StoreError> {
            let mut queue = VecDeque::from([action]);
            let mut processed = 0_usize;

            let outcome = loop {
                let Some(action) = queue.pop_front() else {
                    break Ok(());
                };

                processed += 1;
                if processed > self.config.max_actions_per_send {
                    tracing::warn!(
                        limit = self.config.max_actions_per_send,
                        dropped = queue.len() + 1,
                        "Feedback limit reached, aborting send"
                    );
                    break Err(StoreError::FeedbackLimitExceeded {
                        limit: self.config.max_actions_per_send,
                    });
                }

                metrics::counter!("store.actions.total").increment(1);
                let effects = {
                    let mut state = lock(&self.state);
                    let _enter = tracing::debug_span!("reducer_execution").entered();

                    let start = std::time::Instant::now();
                    let effects = self.reducer.reduce(&mut state, action, &self.environment);
                    metrics::histogram!("store.reducer.duration_seconds")
                        .record(start.elapsed().as_secs_f64());

                    tracing::trace!("Reducer completed, returned {} effects", effects.len());
                    effects
                };

                for effect in effects {
                    Self::execute_effect(effect, &mut queue);
                }
            };

            tracing::debug!(processed, "Action processing completed");
            self.publish();
            outcome
        }

        /// Execute an effect, queueing any action it produces
        fn execute_effect(effect: Effect<A>, queue: &mut VecDeque<A>) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                },
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    for effect in effects {
                        Self::execute_effect(effect, queue);
                    }
                },
                Effect::Run(work) => {
                    metrics::counter!("store.effects.total").increment(1);
                    if let Some(action) = work() {
                        tracing::trace!("Effect::Run produced an action, queueing it");
                        queue.push_back(action);
                    } else {
                        tracing::trace!("Effect::Run completed with no action");
                    }
                },
            }
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let task_count = store.state(|s| s.tasks.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&lock(&self.state))
        }

        /// Expose a projection of state as an [`ObservableValue`]
        ///
        /// The projection runs after every [`Store::send`]; each `Some` it
        /// yields is set on the observable, which notifies its watchers even
        /// when the value is unchanged. It also runs once right away against
        /// the current state.
        pub fn bind<T, F>(&self, project: F) -> ObservableValue<T>
        where
            T: Clone + Send + 'static,
            F: Fn(&S) -> Option<T> + Send + Sync + 'static,
            S: 'static,
        {
            let target = ObservableValue::new();
            if let Some(value) = self.state(&project) {
                target.set(value);
            }

            let sink = target.clone();
            lock(&self.bindings).push(Arc::new(move |state: &S| {
                if let Some(value) = project(state) {
                    sink.set(value);
                }
            }));
            target
        }

        /// Push the current state through every binding.
        ///
        /// Runs outside both locks, so watchers may call back into the store.
        /// Each binding reads a fresh snapshot: a watcher that sends a nested
        /// action must not have its newer state overwritten by this pass.
        fn publish(&self) {
            let bindings: Vec<Binding<S>> = lock(&self.bindings).clone();
            if bindings.is_empty() {
                return;
            }

            tracing::trace!(bindings = bindings.len(), "Publishing state");
            for binding in bindings {
                let snapshot = self.state(S::clone);
                binding(&snapshot);
            }
        }
    }
}

pub use store::Store;
