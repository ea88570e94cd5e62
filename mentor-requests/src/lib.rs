//! Mentor request creation page.
//!
//! A user picks a mentor, describes what they need help with and submits.
//! The page keeps that local form state in step with the shared mentor
//! requests state held by a [`Store`](mentor_club_runtime::Store):
//!
//! - on mount it asks for the mentor list
//! - when the store reports a newly created request id it navigates to
//!   that request's page, once
//! - on unmount it clears the id so the next visit starts fresh
//!
//! # Quick Start
//!
//! ```no_run
//! use mentor_club_core::environment::SystemClock;
//! use mentor_club_runtime::{Store, StoreDispatcher};
//! use mentor_requests::{
//!     History, InMemoryMentorRequestsApi, MentorRequestCreationPage, MentorRequestsEnvironment,
//!     MentorRequestsReducer, MentorRequestsState, TextView, ViewEvent, run_page,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = MentorRequestsEnvironment::new(
//!     Arc::new(InMemoryMentorRequestsApi::new()),
//!     Arc::new(SystemClock),
//! );
//! let store = Store::new(MentorRequestsState::new(), MentorRequestsReducer::new(), env);
//!
//! let history = History::new("/mentor-requests/new");
//! let mut page = MentorRequestCreationPage::new(StoreDispatcher::spawn(store.clone()), history);
//! let (events, rx) = tokio::sync::mpsc::channel(16);
//! events.send(ViewEvent::Submit).await?;
//!
//! let status = run_page(&store, &mut page, &mut TextView::new(), rx).await?;
//! println!("{status:?}");
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod api;
pub mod config;
pub mod environment;
pub mod host;
pub mod navigation;
pub mod page;
pub mod reducer;
pub mod selectors;
pub mod types;
pub mod view;

pub use actions::MentorRequestsAction;
pub use api::{HttpMentorRequestsApi, InMemoryMentorRequestsApi};
pub use config::{AppConfig, ConfigError};
pub use environment::{ApiError, MentorRequestsApi, MentorRequestsEnvironment};
pub use host::run_page;
pub use navigation::{History, Navigator, route_for};
pub use page::{MentorRequestCreationPage, PageConfig, PageError, SubmissionStatus, SubmitPayload};
pub use reducer::MentorRequestsReducer;
pub use selectors::PageSnapshot;
pub use types::{
    MentorRequest, MentorRequestId, MentorRequestStatus, MentorRequestsState, User, UserId,
    UserStatus,
};
pub use view::{InputEvent, MentorRequestCreationView, TextView, ViewEvent, ViewProps};
