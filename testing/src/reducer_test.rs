//! Given/when/then harness for reducers.
//!
//! A case starts from a known state, reduces one or more actions and then
//! checks the final state and the effects returned for the last action.
//! Effects are only inspected, never run; use [`crate::effects`] to drive
//! them.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use saga_todo_core::{effect::Effect, reducer::Reducer};

type StateCheck<S> = Box<dyn FnOnce(&S)>;

type EffectCheck<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// One reducer test case
///
/// # Example
///
/// ```ignore
/// use saga_todo_testing::{assertions, ReducerTest};
///
/// // A failed add keeps the list and records the message
/// ReducerTest::new(TodoReducer::new())
///     .with_env(environment)
///     .given_state(TodoListState::new())
///     .when_action(TodoAction::AddRequest(TodoDraft::new("Buy milk")))
///     .when_action(TodoAction::AddFailure("Network Error".into()))
///     .then_state(|state| {
///         assert!(!state.loading);
///         assert_eq!(state.error.as_deref(), Some("Network Error"));
///     })
///     .then_effects(assertions::assert_no_effects)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    env: Option<E>,
    given: Option<S>,
    steps: Vec<A>,
    state_checks: Vec<StateCheck<S>>,
    effect_checks: Vec<EffectCheck<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Starts a case for `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            env: None,
            given: None,
            steps: Vec::new(),
            state_checks: Vec::new(),
            effect_checks: Vec::new(),
        }
    }

    /// Environment handed to every reduction
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.env = Some(env);
        self
    }

    /// State before the first action
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.given = Some(state);
        self
    }

    /// Queue an action
    ///
    /// Typically an intent followed by its completion. Effect checks only
    /// see what the last queued action returned.
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.steps.push(action);
        self
    }

    /// Check the state after all actions
    #[must_use]
    pub fn then_state<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_checks.push(Box::new(check));
        self
    }

    /// Check the effects returned by the last action
    #[must_use]
    pub fn then_effects<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_checks.push(Box::new(check));
        self
    }

    /// Reduce the queued actions and run every check
    ///
    /// # Panics
    ///
    /// Panics when the case is incomplete (no state, no environment or no
    /// action) and whenever a check fails.
    #[allow(clippy::panic)] // Test harness
    pub fn run(self) {
        let Some(mut state) = self.given else {
            panic!("ReducerTest needs given_state()");
        };
        let Some(env) = self.env else {
            panic!("ReducerTest needs with_env()");
        };
        assert!(!self.steps.is_empty(), "ReducerTest needs at least one when_action()");

        let mut last = Vec::new();
        for action in self.steps {
            last = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        self.state_checks.into_iter().for_each(|check| check(&state));
        self.effect_checks.into_iter().for_each(|check| check(&last));
    }
}

/// Checks on the effects a reducer returned
pub mod assertions {
    use saga_todo_core::effect::Effect;

    /// Nothing to execute: an empty list or only no-ops
    ///
    /// Completions are terminal, so this is what every success and failure
    /// should return.
    ///
    /// # Panics
    ///
    /// Panics if any effect would do work.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "expected a terminal transition, got {} effect(s): {effects:?}",
            effects.len(),
        );
    }

    /// Exactly `expected` effects
    ///
    /// # Panics
    ///
    /// Panics on any other count.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        let found = effects.len();
        assert_eq!(found, expected, "expected {expected} effect(s), got {found}");
    }

    /// At least one pending computation, i.e. the action started a request
    ///
    /// # Panics
    ///
    /// Panics if every effect is a no-op or a `Parallel` without futures.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|effect| matches!(effect, Effect::Future(_))),
            "expected the action to start a request, but no Future effect was returned"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{assertions, ReducerTest};
    use saga_todo_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

    /// Minimal list with one remote operation
    #[derive(Clone, Debug, Default)]
    struct Shelf {
        saving: bool,
        labels: Vec<String>,
        error: Option<String>,
    }

    #[derive(Clone, Debug)]
    enum ShelfAction {
        SaveRequest(String),
        SaveSuccess(String),
        SaveFailure(String),
    }

    struct ShelfReducer;

    struct NoEnv;

    impl Reducer for ShelfReducer {
        type State = Shelf;
        type Action = ShelfAction;
        type Environment = NoEnv;

        fn reduce(
            &self,
            shelf: &mut Shelf,
            action: ShelfAction,
            _env: &NoEnv,
        ) -> SmallVec<[Effect<ShelfAction>; 4]> {
            match action {
                ShelfAction::SaveRequest(label) => {
                    shelf.saving = true;
                    smallvec![Effect::Future(Box::pin(async move {
                        Some(ShelfAction::SaveSuccess(label))
                    }))]
                },
                ShelfAction::SaveSuccess(label) => {
                    shelf.saving = false;
                    shelf.error = None;
                    shelf.labels.push(label);
                    SmallVec::new()
                },
                ShelfAction::SaveFailure(message) => {
                    shelf.saving = false;
                    shelf.error = Some(message);
                    smallvec![Effect::None]
                },
            }
        }
    }

    #[test]
    fn request_starts_one_future() {
        ReducerTest::new(ShelfReducer)
            .with_env(NoEnv)
            .given_state(Shelf::default())
            .when_action(ShelfAction::SaveRequest("jam".into()))
            .then_state(|shelf| assert!(shelf.saving))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn request_then_success_is_terminal() {
        ReducerTest::new(ShelfReducer)
            .with_env(NoEnv)
            .given_state(Shelf::default())
            .when_action(ShelfAction::SaveRequest("jam".into()))
            .when_action(ShelfAction::SaveSuccess("jam".into()))
            .then_state(|shelf| {
                assert!(!shelf.saving);
                assert_eq!(shelf.labels, ["jam"]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn failure_returning_noop_counts_as_terminal() {
        ReducerTest::new(ShelfReducer)
            .with_env(NoEnv)
            .given_state(Shelf::default())
            .when_action(ShelfAction::SaveFailure("offline".into()))
            .then_state(|shelf| assert_eq!(shelf.error.as_deref(), Some("offline")))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn nested_noops_are_not_work() {
        assertions::assert_no_effects::<ShelfAction>(&[]);
        assertions::assert_no_effects::<ShelfAction>(&[Effect::merge(vec![Effect::None])]);
    }

    #[test]
    #[should_panic(expected = "expected a terminal transition")]
    fn pending_request_is_not_terminal() {
        ReducerTest::new(ShelfReducer)
            .with_env(NoEnv)
            .given_state(Shelf::default())
            .when_action(ShelfAction::SaveRequest("jam".into()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    #[should_panic(expected = "needs at least one when_action")]
    fn case_without_actions_is_rejected() {
        ReducerTest::new(ShelfReducer)
            .with_env(NoEnv)
            .given_state(Shelf::default())
            .run();
    }
}
