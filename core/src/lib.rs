//! # Composable Tasks Core
//!
//! Core traits and types for the Composable Tasks architecture.
//!
//! This crate provides the small set of building blocks a to-do view layer
//! needs, with no UI or persistence attached:
//!
//! ## Core Concepts
//!
//! - **Task**: Read-only task record (title, description, completion flag)
//! - **Stats**: Pure completion-percentage calculation over tasks
//! - **`SingleConsumptionEvent`**: Payload that is delivered to at most one consumer
//! - **`ObservableValue`**: In-process publish/subscribe cell with a last-value cache
//! - **Awaiter**: Blocking (and async) bridge that reads the first value of an observable
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//!
//! ## Example
//!
//! ```
//! use composable_tasks_core::awaiter::await_value_after;
//! use composable_tasks_core::event::SingleConsumptionEvent;
//! use composable_tasks_core::observable::ObservableValue;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let new_task_event = ObservableValue::new();
//! let producer = new_task_event.clone();
//!
//! let event = await_value_after(&new_task_event, Duration::from_secs(1), || {
//!     producer.set(Arc::new(SingleConsumptionEvent::new(())));
//! })
//! .unwrap();
//!
//! assert!(event.consume_if_unhandled().is_some());
//! assert!(event.consume_if_unhandled().is_none());
//! ```

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Blocking and async bridges from observable values to plain reads.
pub mod awaiter;

/// Deliver-once event wrapper.
pub mod event;

/// Publish/subscribe value cell.
pub mod observable;

/// Repository collaborator contract.
pub mod repository;

/// Task completion statistics.
pub mod stats;

/// Task records.
pub mod task;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all view-model logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```
    /// use composable_tasks_core::{effect::Effect, reducer::Reducer, SmallVec};
    ///
    /// struct CounterReducer;
    ///
    /// impl Reducer for CounterReducer {
    ///     type State = u32;
    ///     type Action = ();
    ///     type Environment = ();
    ///
    ///     fn reduce(&self, state: &mut u32, _action: (), _env: &()) -> SmallVec<[Effect<()>; 4]> {
    ///         *state += 1;
    ///         SmallVec::new()
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    /// Work closure carried by [`Effect::Run`].
    pub type Work<Action> = Box<dyn FnOnce() -> Option<Action> + Send>;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Synchronous call into a collaborator
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Run(Work<Action>),
    }

    // Manual Debug implementation since closures don't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Run(_) => write!(f, "Effect::Run(<closure>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap a closure as a [`Effect::Run`] effect
        #[must_use]
        pub fn run<F>(work: F) -> Self
        where
            F: FnOnce() -> Option<Action> + Send + 'static,
        {
            Effect::Run(Box::new(work))
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Whether this effect does nothing when executed
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Sequential(effects) => effects.iter().all(Effect::is_none),
                Effect::Run(_) => false,
            }
        }
    }
}
