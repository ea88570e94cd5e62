//! Reducer for the mentor requests state.
//!
//! Begin commands flip a loading flag and emit one `Future` effect that
//! calls the backend. The effect always resolves to a result action, so
//! every flag raised here is lowered by a later action.

use crate::actions::MentorRequestsAction;
use crate::environment::MentorRequestsEnvironment;
use crate::types::MentorRequestsState;
use mentor_club_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Reducer for the mentor requests state
#[derive(Clone, Debug, Default)]
pub struct MentorRequestsReducer;

impl MentorRequestsReducer {
    /// Creates a new `MentorRequestsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn fetch_mentors(env: &MentorRequestsEnvironment) -> Effect<MentorRequestsAction> {
        let api = Arc::clone(&env.api);
        Effect::future(async move {
            Some(match api.fetch_mentors().await {
                Ok(mentors) => MentorRequestsAction::MentorListFetched { mentors },
                Err(error) => MentorRequestsAction::MentorListFetchFailed {
                    error: error.to_string(),
                },
            })
        })
    }

    fn create_request(
        env: &MentorRequestsEnvironment,
        request: crate::types::MentorRequest,
    ) -> Effect<MentorRequestsAction> {
        let api = Arc::clone(&env.api);
        Effect::future(async move {
            Some(match api.create_mentor_request(request).await {
                Ok(request) => MentorRequestsAction::MentorRequestCreated { request },
                Err(error) => MentorRequestsAction::MentorRequestCreationFailed {
                    error: error.to_string(),
                },
            })
        })
    }
}

impl Reducer for MentorRequestsReducer {
    type State = MentorRequestsState;
    type Action = MentorRequestsAction;
    type Environment = MentorRequestsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            MentorRequestsAction::FetchMentorListBegin => {
                tracing::debug!("Fetching mentor list");
                state.is_fetching_mentors = true;
                state.last_error = None;
                smallvec![Self::fetch_mentors(env)]
            },

            MentorRequestsAction::CreateMentorRequestBegin { request } => {
                tracing::debug!(
                    has_description = !request.request_description.is_empty(),
                    has_mentor = request.mentor_id.is_some(),
                    "Creating mentor request"
                );
                state.is_creating_request = true;
                state.last_error = None;
                smallvec![Self::create_request(env, request)]
            },

            MentorRequestsAction::ClearNewMentorRequestId => {
                state.new_mentor_request_id = None;
                SmallVec::new()
            },

            // ========== Results ==========
            MentorRequestsAction::MentorListFetched { mentors } => {
                tracing::debug!(count = mentors.len(), "Mentor list fetched");
                state.mentors = mentors;
                state.is_fetching_mentors = false;
                state.mentors_fetched_at = Some(env.clock.now());
                SmallVec::new()
            },

            MentorRequestsAction::MentorListFetchFailed { error } => {
                tracing::warn!(%error, "Mentor list fetch failed");
                state.is_fetching_mentors = false;
                state.last_error = Some(error);
                SmallVec::new()
            },

            MentorRequestsAction::MentorRequestCreated { request } => {
                tracing::info!(id = %request.mentor_request_id, "Mentor request created");
                state.is_creating_request = false;
                state.new_mentor_request_id = Some(request.mentor_request_id);
                SmallVec::new()
            },

            MentorRequestsAction::MentorRequestCreationFailed { error } => {
                tracing::warn!(%error, "Mentor request creation failed");
                state.is_creating_request = false;
                state.last_error = Some(error);
                SmallVec::new()
            },
        }
    }
}
