//! The mentor request creation page.
//!
//! [`MentorRequestCreationPage`] owns the local form state (selected mentor
//! and description) and keeps it in step with shared state:
//!
//! - mounting asks the store for the mentor list
//! - a render that sees `new_mentor_request_id` change to a non-empty id
//!   sends the user to that request's page, once
//! - unmounting clears the id so the next visit starts clean
//!
//! Commands go out through a [`Dispatch`] handle and never block. Their
//! outcomes come back later as fresh [`PageSnapshot`]s passed to
//! [`MentorRequestCreationPage::render`].

use crate::actions::MentorRequestsAction;
use crate::navigation::{Navigator, route_for};
use crate::selectors::PageSnapshot;
use crate::types::{MentorRequest, MentorRequestId, User, UserId};
use crate::view::{InputEvent, ViewEvent, ViewProps};
use mentor_club_core::dispatch::Dispatch;
use mentor_club_core::lifecycle::{Phase, Watched};
use thiserror::Error;

/// Route the page navigates to once a request exists
pub const DEFAULT_REQUEST_ROUTE: &str = "/mentor-requests/{id}";

/// What `submit` sends to the backend
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPayload {
    /// A blank request with status `CREATED`, whatever the form holds
    #[default]
    Placeholder,
    /// The selected mentor and the typed description
    Collected,
}

/// Page configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageConfig {
    /// Route template containing `{id}`
    pub request_route: String,
    /// Payload policy for `submit`
    pub submit_payload: SubmitPayload,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            request_route: DEFAULT_REQUEST_ROUTE.to_string(),
            submit_payload: SubmitPayload::default(),
        }
    }
}

impl PageConfig {
    /// Set the route template
    #[must_use]
    pub fn with_request_route(mut self, route: impl Into<String>) -> Self {
        self.request_route = route.into();
        self
    }

    /// Set the payload policy
    #[must_use]
    pub const fn with_submit_payload(mut self, payload: SubmitPayload) -> Self {
        self.submit_payload = payload;
        self
    }
}

/// Lifecycle misuse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    /// `mount` called twice
    #[error("page is already mounted")]
    AlreadyMounted,
    /// Operation needs a mounted page but it was never mounted
    #[error("page is not mounted")]
    NotMounted,
    /// Operation after the page was torn down
    #[error("page has been unmounted")]
    Unmounted,
}

/// How far the current submission has progressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// Nothing submitted yet
    #[default]
    NotSubmitted,
    /// A create command is out; waiting for an id to appear
    AwaitingOutcome,
    /// The page navigated to a created request
    Navigated,
}

/// The page component.
///
/// One instance per visit: mount it, render it on every state change, and
/// unmount it when leaving.
#[derive(Debug)]
pub struct MentorRequestCreationPage<D, N> {
    dispatcher: D,
    navigator: N,
    config: PageConfig,
    phase: Phase,
    snapshot: PageSnapshot,
    selected_mentor: Option<User>,
    mentor_request_description: String,
    new_request_id: Watched<Option<MentorRequestId>>,
    submission: SubmissionStatus,
}

impl<D, N> MentorRequestCreationPage<D, N>
where
    D: Dispatch<MentorRequestsAction>,
    N: Navigator,
{
    /// Create an unmounted page with default configuration
    #[must_use]
    pub fn new(dispatcher: D, navigator: N) -> Self {
        Self::with_config(dispatcher, navigator, PageConfig::default())
    }

    /// Create an unmounted page
    #[must_use]
    pub fn with_config(dispatcher: D, navigator: N, config: PageConfig) -> Self {
        Self {
            dispatcher,
            navigator,
            config,
            phase: Phase::Created,
            snapshot: PageSnapshot::default(),
            selected_mentor: None,
            mentor_request_description: String::new(),
            new_request_id: Watched::new(),
            submission: SubmissionStatus::NotSubmitted,
        }
    }

    /// Mount the page and request the mentor list.
    ///
    /// # Errors
    ///
    /// [`PageError::AlreadyMounted`] if mounted before, [`PageError::Unmounted`]
    /// if already torn down.
    pub fn mount(&mut self) -> Result<(), PageError> {
        match self.phase {
            Phase::Created => {},
            Phase::Mounted => return Err(PageError::AlreadyMounted),
            Phase::Unmounted => return Err(PageError::Unmounted),
        }
        self.phase = Phase::Mounted;
        tracing::debug!("Mentor request page mounted");
        self.dispatcher
            .dispatch(MentorRequestsAction::FetchMentorListBegin);
        Ok(())
    }

    /// Accept fresh shared state and produce the props for the view.
    ///
    /// Navigates when the new request id changed since the previous render
    /// and is non-empty.
    ///
    /// # Errors
    ///
    /// Fails unless the page is mounted.
    pub fn render(&mut self, snapshot: PageSnapshot) -> Result<ViewProps<'_>, PageError> {
        self.ensure_mounted()?;
        self.snapshot = snapshot;
        self.react_to_new_request_id();
        Ok(self.props())
    }

    /// Props for the most recently rendered snapshot
    #[must_use]
    pub fn props(&self) -> ViewProps<'_> {
        ViewProps {
            mentors: &self.snapshot.mentors,
            selected_mentor: self.selected_mentor.as_ref(),
            mentor_request_description: &self.mentor_request_description,
            is_loading: self.snapshot.is_fetching_mentor_list,
            error: self.snapshot.last_error.as_deref(),
        }
    }

    /// Tear the page down and clear the new request id.
    ///
    /// # Errors
    ///
    /// Fails unless the page is mounted.
    pub fn unmount(&mut self) -> Result<(), PageError> {
        self.ensure_mounted()?;
        self.phase = Phase::Unmounted;
        tracing::debug!(submission = ?self.submission, "Mentor request page unmounted");
        self.dispatcher
            .dispatch(MentorRequestsAction::ClearNewMentorRequestId);
        Ok(())
    }

    /// Replace the description with the input's current value
    pub fn update_description(&mut self, event: &InputEvent) {
        event
            .target_value()
            .clone_into(&mut self.mentor_request_description);
    }

    /// Select a mentor from the current list, or clear the selection.
    ///
    /// Returns `false` and keeps the current selection when `id` is not in
    /// the list.
    pub fn select_mentor(&mut self, id: Option<UserId>) -> bool {
        let Some(id) = id else {
            self.selected_mentor = None;
            return true;
        };
        match self.snapshot.mentor(&id) {
            Some(mentor) => {
                self.selected_mentor = Some(mentor.clone());
                true
            },
            None => {
                tracing::warn!(%id, "Ignoring selection of unknown mentor");
                false
            },
        }
    }

    /// Ask the store to create a mentor request.
    ///
    /// # Errors
    ///
    /// Fails unless the page is mounted.
    pub fn submit(&mut self) -> Result<(), PageError> {
        self.ensure_mounted()?;
        let request = self.payload();
        tracing::info!(payload = ?self.config.submit_payload, "Submitting mentor request");
        metrics::counter!("mentor_requests.page.submissions").increment(1);
        self.submission = SubmissionStatus::AwaitingOutcome;
        self.dispatcher
            .dispatch(MentorRequestsAction::CreateMentorRequestBegin { request });
        Ok(())
    }

    /// Apply an interaction reported by the view.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`Self::submit`].
    pub fn handle(&mut self, event: ViewEvent) -> Result<(), PageError> {
        match event {
            ViewEvent::SelectMentor(id) => {
                self.select_mentor(id);
                Ok(())
            },
            ViewEvent::DescriptionChanged(input) => {
                self.update_description(&input);
                Ok(())
            },
            ViewEvent::Submit => self.submit(),
        }
    }

    /// Current lifecycle phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Progress of the current submission
    #[must_use]
    pub const fn submission(&self) -> SubmissionStatus {
        self.submission
    }

    /// Currently selected mentor
    #[must_use]
    pub const fn selected_mentor(&self) -> Option<&User> {
        self.selected_mentor.as_ref()
    }

    /// Current description text
    #[must_use]
    pub fn mentor_request_description(&self) -> &str {
        &self.mentor_request_description
    }

    /// Page configuration
    #[must_use]
    pub const fn config(&self) -> &PageConfig {
        &self.config
    }

    fn ensure_mounted(&self) -> Result<(), PageError> {
        match self.phase {
            Phase::Mounted => Ok(()),
            Phase::Created => Err(PageError::NotMounted),
            Phase::Unmounted => Err(PageError::Unmounted),
        }
    }

    fn react_to_new_request_id(&mut self) {
        let Some(Some(id)) = self
            .new_request_id
            .observe(&self.snapshot.new_mentor_request_id)
        else {
            return;
        };
        if id.is_empty() {
            return;
        }
        let path = route_for(&self.config.request_route, id.as_str());
        metrics::counter!("mentor_requests.page.navigations").increment(1);
        self.navigator.push(&path);
        self.submission = SubmissionStatus::Navigated;
    }

    fn payload(&self) -> MentorRequest {
        match self.config.submit_payload {
            SubmitPayload::Collected => MentorRequest::draft(
                self.mentor_request_description.clone(),
                self.selected_mentor.as_ref().map(|m| m.id.clone()),
            ),
            SubmitPayload::Placeholder => {
                if self.selected_mentor.is_some() || !self.mentor_request_description.is_empty() {
                    tracing::warn!(
                        has_mentor = self.selected_mentor.is_some(),
                        description_len = self.mentor_request_description.len(),
                        "Submitting placeholder mentor request; form input is not sent"
                    );
                }
                MentorRequest::placeholder()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::navigation::History;
    use crate::types::MentorRequestStatus;
    use mentor_club_testing::RecordingDispatcher;
    use proptest::prelude::*;

    type TestPage = MentorRequestCreationPage<RecordingDispatcher<MentorRequestsAction>, History>;

    fn mentors() -> Vec<User> {
        vec![
            User::new(UserId::new("1"), "Grace Hopper", "grace"),
            User::new(UserId::new("2"), "Alan Kay", "alan"),
        ]
    }

    fn page() -> (TestPage, RecordingDispatcher<MentorRequestsAction>, History) {
        page_with(PageConfig::default())
    }

    fn page_with(
        config: PageConfig,
    ) -> (TestPage, RecordingDispatcher<MentorRequestsAction>, History) {
        let dispatcher = RecordingDispatcher::new();
        let history = History::new("/mentor-requests/new");
        let page =
            MentorRequestCreationPage::with_config(dispatcher.clone(), history.clone(), config);
        (page, dispatcher, history)
    }

    fn snapshot_with_id(id: Option<&str>) -> PageSnapshot {
        PageSnapshot {
            mentors: mentors(),
            new_mentor_request_id: id.map(MentorRequestId::new),
            ..PageSnapshot::default()
        }
    }

    fn created_requests(dispatcher: &RecordingDispatcher<MentorRequestsAction>) -> Vec<MentorRequest> {
        dispatcher
            .dispatched()
            .into_iter()
            .filter_map(|action| match action {
                MentorRequestsAction::CreateMentorRequestBegin { request } => Some(request),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_mount_fetches_mentors_once() {
        let (mut page, dispatcher, _) = page();

        page.mount().unwrap();
        page.render(PageSnapshot::default()).unwrap();
        page.render(snapshot_with_id(None)).unwrap();

        assert_eq!(
            dispatcher.dispatched(),
            vec![MentorRequestsAction::FetchMentorListBegin]
        );
        assert_eq!(page.phase(), Phase::Mounted);
    }

    #[test]
    fn test_mount_twice_is_rejected() {
        let (mut page, dispatcher, _) = page();
        page.mount().unwrap();

        assert_eq!(page.mount(), Err(PageError::AlreadyMounted));
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn test_render_before_mount_is_rejected() {
        let (mut page, _, history) = page();

        assert_eq!(
            page.render(snapshot_with_id(Some("abc123"))).err(),
            Some(PageError::NotMounted)
        );
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_new_id_navigates_once() {
        let (mut page, _, history) = page();
        page.mount().unwrap();

        page.render(snapshot_with_id(None)).unwrap();
        page.render(snapshot_with_id(Some("abc123"))).unwrap();
        page.render(snapshot_with_id(Some("abc123"))).unwrap();

        assert_eq!(
            history.entries(),
            vec!["/mentor-requests/new", "/mentor-requests/abc123"]
        );
        assert_eq!(page.submission(), SubmissionStatus::Navigated);
    }

    #[test]
    fn test_empty_id_never_navigates() {
        let (mut page, _, history) = page();
        page.mount().unwrap();

        page.render(snapshot_with_id(None)).unwrap();
        page.render(snapshot_with_id(Some(""))).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(page.submission(), SubmissionStatus::NotSubmitted);
    }

    #[test]
    fn test_cleared_then_new_id_navigates_again() {
        let (mut page, _, history) = page();
        page.mount().unwrap();

        page.render(snapshot_with_id(Some("first"))).unwrap();
        page.render(snapshot_with_id(None)).unwrap();
        page.render(snapshot_with_id(Some("second"))).unwrap();

        assert_eq!(
            history.entries(),
            vec![
                "/mentor-requests/new",
                "/mentor-requests/first",
                "/mentor-requests/second"
            ]
        );
    }

    #[test]
    fn test_custom_route_template() {
        let (mut page, _, history) =
            page_with(PageConfig::default().with_request_route("/requests/{id}/detail"));
        page.mount().unwrap();

        page.render(snapshot_with_id(Some("abc123"))).unwrap();

        assert_eq!(history.current(), "/requests/abc123/detail");
    }

    #[test]
    fn test_unmount_clears_id_once() {
        let (mut page, dispatcher, _) = page();
        page.mount().unwrap();
        page.render(snapshot_with_id(Some("abc123"))).unwrap();

        page.unmount().unwrap();

        assert_eq!(
            dispatcher.count(|a| *a == MentorRequestsAction::ClearNewMentorRequestId),
            1
        );
        assert_eq!(page.unmount(), Err(PageError::Unmounted));
        assert_eq!(page.mount(), Err(PageError::Unmounted));
        assert_eq!(page.submit(), Err(PageError::Unmounted));
        assert_eq!(dispatcher.len(), 2);
    }

    #[test]
    fn test_unmount_without_mount_is_rejected() {
        let (mut page, dispatcher, _) = page();
        assert_eq!(page.unmount(), Err(PageError::NotMounted));
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_update_description_overwrites() {
        let (mut page, _, _) = page();

        page.update_description(&InputEvent::new("Need help"));
        page.update_description(&InputEvent::new("Need help with X"));

        assert_eq!(page.mentor_request_description(), "Need help with X");
        assert_eq!(page.props().mentor_request_description, "Need help with X");
    }

    #[test]
    fn test_select_mentor_resolves_against_list() {
        let (mut page, _, _) = page();
        page.mount().unwrap();
        page.render(snapshot_with_id(None)).unwrap();

        assert!(page.select_mentor(Some(UserId::new("2"))));
        assert_eq!(page.selected_mentor().map(|m| m.username.as_str()), Some("alan"));

        assert!(!page.select_mentor(Some(UserId::new("missing"))));
        assert_eq!(page.selected_mentor().map(|m| m.username.as_str()), Some("alan"));

        assert!(page.select_mentor(None));
        assert!(page.selected_mentor().is_none());
    }

    #[test]
    fn test_submit_sends_placeholder_regardless_of_form() {
        let (mut page, dispatcher, _) = page();
        page.mount().unwrap();
        page.render(snapshot_with_id(None)).unwrap();
        page.select_mentor(Some(UserId::new("1")));
        page.update_description(&InputEvent::new("Need help with X"));

        page.submit().unwrap();

        let requests = created_requests(&dispatcher);
        assert_eq!(requests, vec![MentorRequest::placeholder()]);
        let request = &requests[0];
        assert!(request.mentor_request_id.is_empty());
        assert!(request.request_description.is_empty());
        assert!(request.requester_name.is_empty());
        assert!(request.requester_picture_thumbnail_src.is_empty());
        assert_eq!(request.status, MentorRequestStatus::Created);
        assert_eq!(page.submission(), SubmissionStatus::AwaitingOutcome);
    }

    #[test]
    fn test_collected_payload_carries_form_input() {
        let (mut page, dispatcher, _) =
            page_with(PageConfig::default().with_submit_payload(SubmitPayload::Collected));
        page.mount().unwrap();
        page.render(snapshot_with_id(None)).unwrap();

        page.handle(ViewEvent::SelectMentor(Some(UserId::new("1"))))
            .unwrap();
        page.handle(ViewEvent::DescriptionChanged(InputEvent::new("Need help with X")))
            .unwrap();
        page.handle(ViewEvent::Submit).unwrap();

        assert_eq!(
            created_requests(&dispatcher),
            vec![MentorRequest::draft("Need help with X", Some(UserId::new("1")))]
        );
    }

    #[test]
    fn test_submit_before_mount_is_rejected() {
        let (mut page, dispatcher, _) = page();
        assert_eq!(page.handle(ViewEvent::Submit), Err(PageError::NotMounted));
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_props_reflect_snapshot() {
        let (mut page, _, _) = page();
        page.mount().unwrap();

        let props = page
            .render(PageSnapshot {
                is_fetching_mentor_list: true,
                last_error: Some("Unauthorized".into()),
                ..PageSnapshot::default()
            })
            .unwrap();

        assert!(props.is_loading);
        assert!(props.mentors.is_empty());
        assert_eq!(props.error, Some("Unauthorized"));
    }

    proptest! {
        #[test]
        fn prop_description_is_last_input(values in proptest::collection::vec(".*", 1..8)) {
            let (mut page, _, _) = page();
            for value in &values {
                page.update_description(&InputEvent::new(value.clone()));
            }
            prop_assert_eq!(page.mentor_request_description(), values[values.len() - 1].as_str());
        }

        #[test]
        fn prop_navigates_once_per_distinct_id(ids in proptest::collection::vec(
            proptest::option::of("[a-c]{0,2}"), 0..12,
        )) {
            let (mut page, _, history) = page();
            page.mount().unwrap();

            let mut expected = 0;
            let mut previous: Option<Option<String>> = None;
            for id in &ids {
                if previous.as_ref() != Some(id) && id.as_deref().is_some_and(|s| !s.is_empty()) {
                    expected += 1;
                }
                previous = Some(id.clone());
                page.render(snapshot_with_id(id.as_deref())).unwrap();
            }

            prop_assert_eq!(history.len(), expected + 1);
        }
    }
}
