//! # Mentor Club Core
//!
//! Primitives shared by every part of the Mentor Club client.
//!
//! The client follows a unidirectional data flow:
//!
//! - **State**: data owned by a store (mentor list, loading flags, outcome ids)
//! - **Action**: every input to a reducer, both commands and their results
//! - **Reducer**: pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of work for the runtime, never the work itself
//! - **Dispatch**: the command seam views use to request state changes
//!
//! Views observe state through pure selectors and react to changes with the
//! [`lifecycle`] primitives. They never mutate shared state directly.
//!
//! ## Example
//!
//! ```
//! use mentor_club_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Default)]
//! struct LoadingState {
//!     is_loading: bool,
//! }
//!
//! enum LoadingAction {
//!     Begin,
//!     Finished,
//! }
//!
//! struct LoadingReducer;
//!
//! impl Reducer for LoadingReducer {
//!     type State = LoadingState;
//!     type Action = LoadingAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut LoadingState,
//!         action: LoadingAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<LoadingAction>; 4]> {
//!         match action {
//!             LoadingAction::Begin => {
//!                 state.is_loading = true;
//!                 smallvec![Effect::future(async { Some(LoadingAction::Finished) })]
//!             },
//!             LoadingAction::Finished => {
//!                 state.is_loading = false;
//!                 smallvec![Effect::None]
//!             },
//!         }
//!     }
//! }
//!
//! let mut state = LoadingState::default();
//! let effects = LoadingReducer.reduce(&mut state, LoadingAction::Begin, &());
//! assert!(state.is_loading);
//! assert_eq!(effects.len(), 1);
//! ```

pub use smallvec::{SmallVec, smallvec};

/// Command dispatch seam between views and stores
pub mod dispatch;

/// Mount/unmount phases and change detection for reactive views
pub mod lifecycle;

/// Reducer module - the core trait for state transitions
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// A pure state transition function.
    ///
    /// Reducers validate an action, update state in place, and return
    /// descriptions of side effects. They never perform I/O themselves; the
    /// runtime executes the returned effects and feeds any resulting actions
    /// back in.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// Injected dependencies (API clients, clocks)
        type Environment;

        /// Reduce an action into state changes and effects
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Boxed future produced by an effect
    pub type EffectFuture<Action> = Pin<Box<dyn Future<Output = Option<Action>> + Send>>;

    /// A side effect to be executed by the runtime.
    ///
    /// Effects are values. A reducer returns them and the store decides when
    /// and where they run. Any action an effect yields is fed back into the
    /// same reducer.
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects concurrently
        Parallel(Vec<Effect<Action>>),

        /// Run effects one after another
        Sequential(Vec<Effect<Action>>),

        /// Dispatch an action after a delay
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after the delay
            action: Box<Action>,
        },

        /// Arbitrary async computation.
        ///
        /// Resolves to `Some(action)` to feed a result back into the reducer.
        Future(EffectFuture<Action>),
    }

    // Future is opaque, so Debug is written by hand
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Box an async block into an [`Effect::Future`]
        #[must_use]
        pub fn future<F>(fut: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Whether this effect does nothing when executed
        #[must_use]
        pub fn is_noop(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    effects.iter().all(Effect::is_noop)
                },
                Effect::Delay { .. } | Effect::Future(_) => false,
            }
        }
    }
}

/// Environment module - injected dependencies
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Abstracts time so reducers stay deterministic under test
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
