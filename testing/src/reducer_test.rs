//! Given-When-Then harness for reducers
//!
//! [`ReducerTest`] reduces a single action against a given state, then checks
//! the resulting state, the returned effects and, when asked, the actions
//! those effects feed back once they run. No store is involved, so a test sees
//! exactly one reducer step.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use composable_tasks_core::{effect::Effect, reducer::Reducer};

type Check<T> = Box<dyn FnOnce(&T)>;
type SliceCheck<T> = Box<dyn FnOnce(&[T])>;

/// One reducer step under test
///
/// # Example
///
/// ```ignore
/// use composable_tasks_testing::{ReducerTest, assertions};
///
/// ReducerTest::new(TasksReducer::new())
///     .with_env(test_environment())
///     .given_state(TasksState::default())
///     .when_action(TasksAction::ClearCompletedTasks)
///     .then_effects(assertions::assert_has_run_effect)
///     .then_feedback(|actions| assert_eq!(actions.len(), 2))
///     .run();
/// ```
pub struct ReducerTest<R: Reducer> {
    reducer: R,
    env: Option<R::Environment>,
    state: Option<R::State>,
    action: Option<R::Action>,
    state_checks: Vec<Check<R::State>>,
    effect_checks: Vec<SliceCheck<Effect<R::Action>>>,
    feedback_checks: Vec<SliceCheck<R::Action>>,
}

impl<R: Reducer> ReducerTest<R> {
    /// Starts a test for `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            env: None,
            state: None,
            action: None,
            state_checks: Vec::new(),
            effect_checks: Vec::new(),
            feedback_checks: Vec::new(),
        }
    }

    /// Environment handed to the reducer
    #[must_use]
    pub fn with_env(mut self, env: R::Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// State before the action (Given)
    #[must_use]
    pub fn given_state(mut self, state: R::State) -> Self {
        self.state = Some(state);
        self
    }

    /// Action to reduce (When)
    #[must_use]
    pub fn when_action(mut self, action: R::Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Check the state after the action (Then)
    #[must_use]
    pub fn then_state<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&R::State) + 'static,
    {
        self.state_checks.push(Box::new(check));
        self
    }

    /// Check the effects the reducer returned (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[Effect<R::Action>]) + 'static,
    {
        self.effect_checks.push(Box::new(check));
        self
    }

    /// Run the returned effects and check the actions they produce (Then)
    ///
    /// Effects run after every `then_effects` check, in order, on the test
    /// thread.
    #[must_use]
    pub fn then_feedback<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[R::Action]) + 'static,
    {
        self.feedback_checks.push(Box::new(check));
        self
    }

    /// Reduce the action and run every check
    ///
    /// # Panics
    ///
    /// Panics if the environment, state or action was never set, or if a
    /// check fails.
    #[allow(clippy::panic)] // Test harness
    pub fn run(self) {
        let Self {
            reducer,
            env,
            state,
            action,
            state_checks,
            effect_checks,
            feedback_checks,
        } = self;

        let (Some(env), Some(mut state), Some(action)) = (env, state, action) else {
            panic!("ReducerTest needs with_env(), given_state() and when_action() before run()");
        };

        let effects = reducer.reduce(&mut state, action, &env);

        state_checks.into_iter().for_each(|check| check(&state));
        effect_checks.into_iter().for_each(|check| check(&effects));

        if !feedback_checks.is_empty() {
            let produced = assertions::run_effects(effects);
            feedback_checks.into_iter().for_each(|check| check(&produced));
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use composable_tasks_core::effect::Effect;

    /// Assert that no effect would do any work
    ///
    /// # Panics
    ///
    /// Panics if any effect contains a `Run`.
    pub fn assert_no_effects<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "expected only no-op effects, got {effects:?}"
        );
    }

    /// Assert the number of top-level effects
    ///
    /// # Panics
    ///
    /// Panics on a different count.
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(effects.len(), expected, "unexpected effect count: {effects:?}");
    }

    /// Assert that some effect, at any depth, is a `Run`
    ///
    /// # Panics
    ///
    /// Panics if every effect is a no-op.
    pub fn assert_has_run_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|effect| !effect.is_none()),
            "expected a Run effect, got {effects:?}"
        );
    }

    /// Execute every `Run` effect in order and collect the actions they produce
    pub fn run_effects<A>(effects: impl IntoIterator<Item = Effect<A>>) -> Vec<A> {
        effects.into_iter().fold(Vec::new(), |mut produced, effect| {
            match effect {
                Effect::None => {},
                Effect::Sequential(inner) => produced.extend(run_effects(inner)),
                Effect::Run(work) => produced.extend(work()),
            }
            produced
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use composable_tasks_core::{SmallVec, smallvec};

    #[derive(Clone, Debug, PartialEq)]
    enum Step {
        Up,
        Bounce,
    }

    struct Floor;

    impl Reducer for Floor {
        type State = i32;
        type Action = Step;
        type Environment = ();

        fn reduce(&self, level: &mut i32, step: Step, _env: &()) -> SmallVec<[Effect<Step>; 4]> {
            match step {
                Step::Up => {
                    *level += 1;
                    smallvec![Effect::None]
                },
                Step::Bounce => {
                    *level -= 1;
                    smallvec![Effect::run(|| Some(Step::Up))]
                },
            }
        }
    }

    #[test]
    fn state_and_no_effects() {
        ReducerTest::new(Floor)
            .with_env(())
            .given_state(0)
            .when_action(Step::Up)
            .then_state(|level| assert_eq!(*level, 1))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn feedback_runs_after_effect_checks() {
        ReducerTest::new(Floor)
            .with_env(())
            .given_state(5)
            .when_action(Step::Bounce)
            .then_state(|level| assert_eq!(*level, 4))
            .then_effects(assertions::assert_has_run_effect)
            .then_feedback(|actions| assert_eq!(actions, [Step::Up]))
            .run();
    }

    #[test]
    #[should_panic(expected = "ReducerTest needs")]
    fn run_without_state_panics() {
        ReducerTest::new(Floor).with_env(()).when_action(Step::Up).run();
    }

    #[test]
    fn run_effects_flattens_sequences() {
        let effects = vec![
            Effect::None,
            Effect::chain(vec![Effect::run(|| Some(Step::Up)), Effect::run(|| None)]),
            Effect::run(|| Some(Step::Bounce)),
        ];

        assert_eq!(assertions::run_effects(effects), vec![Step::Up, Step::Bounce]);
    }

    #[test]
    fn count_and_no_op_assertions() {
        assertions::assert_no_effects::<Step>(&[Effect::None, Effect::chain(vec![])]);
        assertions::assert_effects_count::<Step>(&[], 0);
        assertions::assert_effects_count(&[Effect::<Step>::None], 1);
    }
}
