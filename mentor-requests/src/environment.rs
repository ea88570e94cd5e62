//! Environment for the mentor requests reducer.

use crate::types::{MentorRequest, User};
use mentor_club_core::environment::Clock;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Boxed future returned by [`MentorRequestsApi`] methods
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Errors from the mentor requests backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never got a response
    #[error("Request failed: {0}")]
    Request(String),

    /// The response body could not be decoded
    #[error("Response decoding failed: {0}")]
    Decode(String),

    /// The session is missing or expired
    #[error("Unauthorized")]
    Unauthorized,

    /// The backend answered with an unexpected status
    #[error("Backend error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
}

/// Backend operations the reducer's effects call
pub trait MentorRequestsApi: Send + Sync {
    /// Fetch all mentors available for selection
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend is unreachable or rejects the call.
    fn fetch_mentors(&self) -> ApiFuture<'_, Vec<User>>;

    /// Create a mentor request, returning it with its assigned id
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend is unreachable or rejects the request.
    fn create_mentor_request(&self, request: MentorRequest) -> ApiFuture<'_, MentorRequest>;
}

/// Dependencies injected into [`crate::MentorRequestsReducer`]
#[derive(Clone)]
pub struct MentorRequestsEnvironment {
    /// Backend client
    pub api: Arc<dyn MentorRequestsApi>,
    /// Clock for stamping refreshes
    pub clock: Arc<dyn Clock>,
}

impl MentorRequestsEnvironment {
    /// Creates a new `MentorRequestsEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn MentorRequestsApi>, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }
}
