//! Mentor requests backend clients.

use crate::environment::{ApiError, ApiFuture, MentorRequestsApi};
use crate::types::{MentorRequest, MentorRequestId, User};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// HTTP client for the Mentor Club backend
#[derive(Clone, Debug)]
pub struct HttpMentorRequestsApi {
    client: Client,
    base_url: String,
}

impl HttpMentorRequestsApi {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8080/api`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing connection pool
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Absolute URL for an API path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(ApiError::Status {
                    status: status.as_u16(),
                    message,
                })
            },
        }
    }
}

impl MentorRequestsApi for HttpMentorRequestsApi {
    fn fetch_mentors(&self) -> ApiFuture<'_, Vec<User>> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.url("mentors"))
                .send()
                .await
                .map_err(|e| ApiError::Request(e.to_string()))?;
            Self::decode(response).await
        })
    }

    fn create_mentor_request(&self, request: MentorRequest) -> ApiFuture<'_, MentorRequest> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.url("mentor-requests"))
                .json(&request)
                .send()
                .await
                .map_err(|e| ApiError::Request(e.to_string()))?;
            Self::decode(response).await
        })
    }
}

#[derive(Debug, Default)]
struct Backend {
    mentors: Vec<User>,
    created: Vec<MentorRequest>,
    fail_next: Option<ApiError>,
}

/// In-process backend for demos and tests.
///
/// Serves a fixed mentor list, assigns a fresh UUID to every created
/// request, and can be told to fail the next call.
#[derive(Clone, Debug, Default)]
pub struct InMemoryMentorRequestsApi {
    backend: Arc<Mutex<Backend>>,
}

impl InMemoryMentorRequestsApi {
    /// Create a backend with no mentors
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend serving `mentors`
    #[must_use]
    pub fn with_mentors(mentors: Vec<User>) -> Self {
        Self {
            backend: Arc::new(Mutex::new(Backend {
                mentors,
                ..Backend::default()
            })),
        }
    }

    /// Make the next call (of either kind) fail with `error`
    pub fn fail_next(&self, error: ApiError) {
        self.with_backend(|b| b.fail_next = Some(error));
    }

    /// Requests created so far, in creation order
    #[must_use]
    pub fn created_requests(&self) -> Vec<MentorRequest> {
        self.with_backend(|b| b.created.clone())
    }

    fn with_backend<T>(&self, f: impl FnOnce(&mut Backend) -> T) -> T {
        let mut backend = self
            .backend
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut backend)
    }
}

impl MentorRequestsApi for InMemoryMentorRequestsApi {
    fn fetch_mentors(&self) -> ApiFuture<'_, Vec<User>> {
        let result = self.with_backend(|b| match b.fail_next.take() {
            Some(error) => Err(error),
            None => Ok(b.mentors.clone()),
        });
        Box::pin(async move { result })
    }

    fn create_mentor_request(&self, request: MentorRequest) -> ApiFuture<'_, MentorRequest> {
        let result = self.with_backend(|b| {
            if let Some(error) = b.fail_next.take() {
                return Err(error);
            }
            let created = MentorRequest {
                mentor_request_id: MentorRequestId::new(Uuid::new_v4().to_string()),
                ..request
            };
            b.created.push(created.clone());
            Ok(created)
        });
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use crate::types::UserId;

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = HttpMentorRequestsApi::new("http://localhost:8080/api/");
        assert_eq!(api.url("/mentors"), "http://localhost:8080/api/mentors");
        assert_eq!(
            api.url("mentor-requests"),
            "http://localhost:8080/api/mentor-requests"
        );
    }

    #[tokio::test]
    async fn test_in_memory_assigns_ids_and_records() {
        let api = InMemoryMentorRequestsApi::new();
        let first = api
            .create_mentor_request(MentorRequest::draft("a", Some(UserId::new("1"))))
            .await
            .unwrap();
        let second = api
            .create_mentor_request(MentorRequest::placeholder())
            .await
            .unwrap();

        assert!(!first.mentor_request_id.is_empty());
        assert_ne!(first.mentor_request_id, second.mentor_request_id);
        assert_eq!(first.request_description, "a");
        assert_eq!(api.created_requests(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_in_memory_failure_is_one_shot() {
        let api = InMemoryMentorRequestsApi::with_mentors(vec![User::new(
            UserId::new("1"),
            "Grace",
            "grace",
        )]);
        api.fail_next(ApiError::Request("offline".into()));

        assert_eq!(
            api.fetch_mentors().await,
            Err(ApiError::Request("offline".into()))
        );
        assert_eq!(api.fetch_mentors().await.unwrap().len(), 1);
    }
}
