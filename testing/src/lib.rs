//! # Mentor Club Testing
//!
//! Helpers for testing reducers and views without a running store:
//!
//! - [`ReducerTest`]: Given/When/Then builder
//! - [`drain_effects`]: resolve an effect tree into the actions it produces
//! - [`FixedClock`]: deterministic time
//! - [`RecordingDispatcher`]: captures dispatched commands

use chrono::{DateTime, Utc};
use mentor_club_core::environment::Clock;

/// Effect draining
pub mod effects;

/// Reducer test builder and effect assertions
pub mod reducer_test;

/// Mock environment implementations
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use mentor_club_core::dispatch::Dispatch;
    use std::sync::{Arc, Mutex, PoisonError};

    /// Clock that always reports the same instant
    ///
    /// ```
    /// use mentor_club_testing::mocks::FixedClock;
    /// use mentor_club_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Dispatcher that records every command instead of running it
    ///
    /// ```
    /// use mentor_club_core::dispatch::Dispatch;
    /// use mentor_club_testing::RecordingDispatcher;
    ///
    /// let dispatcher = RecordingDispatcher::new();
    /// dispatcher.clone().dispatch("fetch");
    /// assert_eq!(dispatcher.dispatched(), vec!["fetch"]);
    /// ```
    #[derive(Debug)]
    pub struct RecordingDispatcher<A> {
        actions: Arc<Mutex<Vec<A>>>,
    }

    impl<A> RecordingDispatcher<A> {
        /// Create a dispatcher with an empty log
        #[must_use]
        pub fn new() -> Self {
            Self {
                actions: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Number of commands dispatched so far
        #[must_use]
        pub fn len(&self) -> usize {
            self.lock().len()
        }

        /// Whether nothing has been dispatched
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Number of dispatched commands matching `predicate`
        #[must_use]
        pub fn count(&self, predicate: impl Fn(&A) -> bool) -> usize {
            self.lock().iter().filter(|a| predicate(a)).count()
        }

        /// Forget everything recorded so far
        pub fn clear(&self) {
            self.lock().clear();
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, Vec<A>> {
            self.actions.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl<A: Clone> RecordingDispatcher<A> {
        /// Every dispatched command, in dispatch order
        #[must_use]
        pub fn dispatched(&self) -> Vec<A> {
            self.lock().clone()
        }
    }

    impl<A> Clone for RecordingDispatcher<A> {
        fn clone(&self) -> Self {
            Self {
                actions: Arc::clone(&self.actions),
            }
        }
    }

    impl<A> Default for RecordingDispatcher<A> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<A: Send> Dispatch<A> for RecordingDispatcher<A> {
        fn dispatch(&self, action: A) {
            self.lock().push(action);
        }
    }

    /// Fixed clock at 2025-01-01 00:00:00 UTC
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}

pub use effects::drain_effects;
pub use mocks::{FixedClock, RecordingDispatcher, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;

    use mentor_club_core::dispatch::Dispatch;

    #[test]
    fn test_recording_dispatcher_shares_log_between_clones() {
        let dispatcher = RecordingDispatcher::new();
        let view_handle = dispatcher.clone();

        view_handle.dispatch(1);
        view_handle.dispatch(2);
        dispatcher.dispatch(1);

        assert_eq!(dispatcher.dispatched(), vec![1, 2, 1]);
        assert_eq!(dispatcher.count(|a| *a == 1), 2);

        dispatcher.clear();
        assert!(view_handle.is_empty());
    }

    #[test]
    fn test_clock_is_new_year_2025() {
        assert_eq!(test_clock().now().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }
}
