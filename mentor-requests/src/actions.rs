//! Actions for the mentor requests feature.

use crate::types::{MentorRequest, User};
use serde::{Deserialize, Serialize};

/// Commands views dispatch, plus the results effects feed back
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MentorRequestsAction {
    // ========== Commands ==========
    /// Begin fetching the mentor list
    FetchMentorListBegin,

    /// Begin creating a mentor request
    CreateMentorRequestBegin {
        /// Request payload to submit
        request: MentorRequest,
    },

    /// Forget the id of the most recently created request
    ClearNewMentorRequestId,

    // ========== Results ==========
    /// The mentor list arrived
    MentorListFetched {
        /// Mentors in backend order
        mentors: Vec<User>,
    },

    /// Fetching the mentor list failed
    MentorListFetchFailed {
        /// Error description
        error: String,
    },

    /// The backend accepted a new request and assigned it an id
    MentorRequestCreated {
        /// The request as stored by the backend
        request: MentorRequest,
    },

    /// The backend rejected a new request
    MentorRequestCreationFailed {
        /// Error description
        error: String,
    },
}
