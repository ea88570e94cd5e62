//! View lifecycle primitives.
//!
//! A view is mounted once, observes shared state for a while, and is torn
//! down once. Reactions to state are keyed on explicit value changes so a
//! re-render with unchanged inputs never repeats a side effect.

use std::fmt;

/// Where a view is in its mount lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Constructed but not yet mounted
    #[default]
    Created,
    /// Mounted and observing state
    Mounted,
    /// Torn down; observation has ended
    Unmounted,
}

impl Phase {
    /// Whether the view is currently mounted
    #[must_use]
    pub const fn is_mounted(self) -> bool {
        matches!(self, Self::Mounted)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Mounted => write!(f, "mounted"),
            Self::Unmounted => write!(f, "unmounted"),
        }
    }
}

/// Remembers the last observed value of a dependency.
///
/// [`Watched::observe`] reports a change only when the new value differs
/// from the previous observation. The very first observation always counts
/// as a change, matching an effect that runs after the initial render.
///
/// ```
/// use mentor_club_core::lifecycle::Watched;
///
/// let mut id = Watched::new();
/// assert!(id.observe(&None::<String>).is_some());
/// assert!(id.observe(&None).is_none());
/// assert!(id.observe(&Some("abc123".to_string())).is_some());
/// assert!(id.observe(&Some("abc123".to_string())).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Watched<T> {
    last: Option<T>,
}

impl<T> Default for Watched<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: PartialEq + Clone> Watched<T> {
    /// Create a watcher that has not observed anything yet
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Record `value`, returning it if it differs from the last observation
    pub fn observe(&mut self, value: &T) -> Option<&T> {
        if self.last.as_ref() == Some(value) {
            return None;
        }
        self.last = Some(value.clone());
        self.last.as_ref()
    }

    /// The most recently observed value
    #[must_use]
    pub const fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }

    /// Forget the last observation so the next one is reported as a change
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_observation_is_a_change() {
        let mut watched = Watched::new();
        assert_eq!(watched.observe(&7), Some(&7));
        assert_eq!(watched.last(), Some(&7));
    }

    #[test]
    fn test_repeat_value_is_not_a_change() {
        let mut watched = Watched::new();
        watched.observe(&"abc123");
        assert_eq!(watched.observe(&"abc123"), None);
        assert_eq!(watched.observe(&"def456"), Some(&"def456"));
        assert_eq!(watched.observe(&"abc123"), Some(&"abc123"));
    }

    #[test]
    fn test_reset_reports_next_value() {
        let mut watched = Watched::new();
        watched.observe(&1);
        watched.reset();
        assert_eq!(watched.last(), None);
        assert_eq!(watched.observe(&1), Some(&1));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::default(), Phase::Created);
        assert!(Phase::Mounted.is_mounted());
        assert!(!Phase::Unmounted.is_mounted());
        assert_eq!(Phase::Unmounted.to_string(), "unmounted");
    }

    proptest! {
        #[test]
        fn prop_changes_match_transitions(values in proptest::collection::vec(0u8..4, 0..64)) {
            let mut watched = Watched::new();
            let mut previous: Option<u8> = None;
            for value in values {
                let changed = watched.observe(&value).is_some();
                prop_assert_eq!(changed, previous != Some(value));
                previous = Some(value);
            }
        }
    }
}
