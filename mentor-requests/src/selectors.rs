//! Pure read-only queries over [`MentorRequestsState`].

use crate::types::{MentorRequestId, MentorRequestsState, User, UserId};

/// Mentors available for selection
#[must_use]
pub fn select_mentors(state: &MentorRequestsState) -> &[User] {
    &state.mentors
}

/// Whether the mentor list is loading
#[must_use]
pub const fn select_is_fetching_mentors(state: &MentorRequestsState) -> bool {
    state.is_fetching_mentors
}

/// Id of the most recently created request, if not yet cleared
#[must_use]
pub const fn select_new_mentor_request_id(state: &MentorRequestsState) -> Option<&MentorRequestId> {
    state.new_mentor_request_id.as_ref()
}

/// Last fetch or creation failure
#[must_use]
pub fn select_last_error(state: &MentorRequestsState) -> Option<&str> {
    state.last_error.as_deref()
}

/// Everything the creation page reads from shared state.
///
/// An owned copy, so a view can keep it across store updates without
/// holding the store's lock.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    /// Mentors available for selection
    pub mentors: Vec<User>,
    /// Whether the mentor list is loading
    pub is_fetching_mentor_list: bool,
    /// Id of the most recently created request
    pub new_mentor_request_id: Option<MentorRequestId>,
    /// Last fetch or creation failure
    pub last_error: Option<String>,
}

impl PageSnapshot {
    /// Derive a snapshot from shared state
    #[must_use]
    pub fn select(state: &MentorRequestsState) -> Self {
        Self {
            mentors: select_mentors(state).to_vec(),
            is_fetching_mentor_list: select_is_fetching_mentors(state),
            new_mentor_request_id: select_new_mentor_request_id(state).cloned(),
            last_error: select_last_error(state).map(str::to_owned),
        }
    }

    /// Look up a mentor in the snapshot's list
    #[must_use]
    pub fn mentor(&self, id: &UserId) -> Option<&User> {
        self.mentors.iter().find(|m| &m.id == id)
    }
}
