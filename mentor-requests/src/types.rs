//! Domain types for mentor requests.
//!
//! Wire types serialize to the JSON shapes the Mentor Club backend speaks:
//! camelCase field names and SCREAMING_SNAKE_CASE enum values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a user (mentor or requester), assigned by the backend
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a backend-assigned identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account status of a user
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    /// Registered, email not yet confirmed
    #[default]
    CreatedUnconfirmedEmail,
    /// Registered and email confirmed
    CreatedConfirmedEmail,
}

/// A user as seen by the client. Mentors are users.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Login name
    pub username: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Base64-encoded avatar thumbnail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_base64: Option<String>,
    /// Account status
    #[serde(default)]
    pub status: UserStatus,
}

impl User {
    /// Create a user with the given identity and display data
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            username: username.into(),
            email: String::new(),
            thumbnail_base64: None,
            status: UserStatus::default(),
        }
    }
}

/// Identifier of a mentor request.
///
/// Empty until the backend assigns one. An empty id never triggers
/// navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MentorRequestId(String);

impl MentorRequestId {
    /// Wrap a backend-assigned identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The placeholder id carried by a request the backend hasn't seen yet
    #[must_use]
    pub const fn unassigned() -> Self {
        Self(String::new())
    }

    /// Whether no id has been assigned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MentorRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a mentor request
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MentorRequestStatus {
    /// Submitted, awaiting a mentor's answer
    #[default]
    Created,
    /// A mentor accepted the request
    Accepted,
    /// The mentor declined
    Rejected,
    /// Finished or withdrawn
    Closed,
}

/// A user's ask to be paired with a mentor
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorRequest {
    /// Backend-assigned id, empty before creation
    pub mentor_request_id: MentorRequestId,
    /// Free-text description of what help is needed
    pub request_description: String,
    /// Display name of the requester
    pub requester_name: String,
    /// Lifecycle status
    pub status: MentorRequestStatus,
    /// Requester avatar URL
    pub requester_picture_thumbnail_src: String,
    /// Mentor the request is addressed to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentor_id: Option<UserId>,
}

impl MentorRequest {
    /// An unsubmitted request with every text field empty and status `CREATED`
    #[must_use]
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// An unsubmitted request carrying collected form input
    #[must_use]
    pub fn draft(description: impl Into<String>, mentor_id: Option<UserId>) -> Self {
        Self {
            request_description: description.into(),
            mentor_id,
            ..Self::default()
        }
    }
}

/// Shared state for the mentor requests feature
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MentorRequestsState {
    /// Mentors available for selection, in backend order
    pub mentors: Vec<User>,
    /// Whether a mentor list fetch is in flight
    pub is_fetching_mentors: bool,
    /// Whether a creation request is in flight
    pub is_creating_request: bool,
    /// Id of the most recently created request, until cleared
    pub new_mentor_request_id: Option<MentorRequestId>,
    /// Last fetch or creation failure
    pub last_error: Option<String>,
    /// When the mentor list was last refreshed
    pub mentors_fetched_at: Option<DateTime<Utc>>,
}

impl MentorRequestsState {
    /// Create an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
