//! Given/When/Then builder for reducer tests.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use mentor_club_core::{effect::Effect, reducer::Reducer};

type StateAssertion<S> = Box<dyn FnOnce(&S)>;
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent reducer test.
///
/// Actions given to `when_action` are reduced in order. State assertions
/// see the final state; effect assertions see the effects returned by the
/// last action only.
///
/// ```ignore
/// ReducerTest::new(MentorRequestsReducer::new())
///     .with_env(test_env())
///     .given_state(MentorRequestsState::default())
///     .when_action(MentorRequestsAction::FetchMentorListBegin)
///     .then_state(|state| assert!(state.is_fetching_mentors))
///     .then_effects(assertions::assert_has_future_effect)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Queue an action (When). May be called repeatedly.
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Assert on the final state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Assert on the effects of the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Reduce the queued actions and run all assertions
    ///
    /// # Panics
    ///
    /// Panics if state, environment, or at least one action is missing, or
    /// if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");
        let env = self
            .environment
            .expect("Environment must be set with with_env()");
        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let mut effects = Vec::new();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }
        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use mentor_club_core::effect::Effect;

    /// Assert that there are no effects, or only no-ops
    ///
    /// # Panics
    ///
    /// Panics if any effect would do work.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_noop),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the count differs.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that at least one top-level effect is a `Future`
    ///
    /// # Panics
    ///
    /// Panics if none is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_club_core::{SmallVec, smallvec};

    #[derive(Clone, Debug, Default)]
    struct DraftState {
        text: String,
        saves: u32,
    }

    #[derive(Clone, Debug)]
    enum DraftAction {
        Edit(String),
        Save,
        Saved,
    }

    struct DraftReducer;

    impl Reducer for DraftReducer {
        type State = DraftState;
        type Action = DraftAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut DraftState,
            action: DraftAction,
            _env: &(),
        ) -> SmallVec<[Effect<DraftAction>; 4]> {
            match action {
                DraftAction::Edit(text) => {
                    state.text = text;
                    smallvec![Effect::None]
                },
                DraftAction::Save => smallvec![Effect::future(async { Some(DraftAction::Saved) })],
                DraftAction::Saved => {
                    state.saves += 1;
                    SmallVec::new()
                },
            }
        }
    }

    #[test]
    fn test_actions_reduce_in_order() {
        ReducerTest::new(DraftReducer)
            .with_env(())
            .given_state(DraftState::default())
            .when_action(DraftAction::Edit("first".into()))
            .when_action(DraftAction::Edit("second".into()))
            .then_state(|state| assert_eq!(state.text, "second"))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_effects_come_from_last_action() {
        ReducerTest::new(DraftReducer)
            .with_env(())
            .given_state(DraftState::default())
            .when_action(DraftAction::Edit("text".into()))
            .when_action(DraftAction::Save)
            .then_state(|state| assert_eq!(state.saves, 0))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }
}
