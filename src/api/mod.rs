//! Remote quiz backend.
//!
//! [`QuizApi`] is the collaborator contract the session engine consumes.
//! [`HttpQuizApi`] talks to the REST backend; [`OfflineQuizApi`] serves a
//! quiz file and scores submissions locally.

mod http;
mod messages;
mod offline;

use std::future::Future;

use thiserror::Error;

use crate::models::Quiz;

pub use http::HttpQuizApi;
pub use messages::{
    quiz_from_body, ResumePayload, SubmitRequest, SubmitResult, POINTS_PER_QUESTION,
};
pub use offline::OfflineQuizApi;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} answered with HTTP {status}")]
    Status { status: u16, url: String },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("quiz {0} not found")]
    NotFound(String),
}

/// Operations the session engine needs from the backend.
pub trait QuizApi {
    /// Whether requests carry user credentials. Only authenticated users have
    /// a server-side resume record.
    fn is_authenticated(&self) -> bool;

    fn fetch_quiz(&self, quiz_id: &str) -> impl Future<Output = Result<Quiz, ApiError>> + Send;

    /// `Ok(None)` when the user has no in-progress participation.
    fn fetch_resume(
        &self,
        quiz_id: &str,
    ) -> impl Future<Output = Result<Option<ResumePayload>, ApiError>> + Send;

    fn submit(
        &self,
        request: &SubmitRequest,
    ) -> impl Future<Output = Result<SubmitResult, ApiError>> + Send;
}

/// Backend chosen at startup.
pub enum Backend {
    Http(HttpQuizApi),
    Offline(OfflineQuizApi),
}

impl QuizApi for Backend {
    fn is_authenticated(&self) -> bool {
        match self {
            Backend::Http(api) => api.is_authenticated(),
            Backend::Offline(api) => api.is_authenticated(),
        }
    }

    async fn fetch_quiz(&self, quiz_id: &str) -> Result<Quiz, ApiError> {
        match self {
            Backend::Http(api) => api.fetch_quiz(quiz_id).await,
            Backend::Offline(api) => api.fetch_quiz(quiz_id).await,
        }
    }

    async fn fetch_resume(&self, quiz_id: &str) -> Result<Option<ResumePayload>, ApiError> {
        match self {
            Backend::Http(api) => api.fetch_resume(quiz_id).await,
            Backend::Offline(api) => api.fetch_resume(quiz_id).await,
        }
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResult, ApiError> {
        match self {
            Backend::Http(api) => api.submit(request).await,
            Backend::Offline(api) => api.submit(request).await,
        }
    }
}
