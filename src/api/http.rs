use log::debug;
use reqwest::{Client, RequestBuilder};

use crate::models::Quiz;

use super::messages::{quiz_from_body, ResumePayload, SubmitRequest, SubmitResult};
use super::{ApiError, QuizApi};

/// REST client for the quiz backend.
#[derive(Debug, Clone)]
pub struct HttpQuizApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpQuizApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn send(&self, request: RequestBuilder, url: &str) -> Result<String, ApiError> {
        let response = self
            .authorize(request)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!("{} -> {}", url, status);
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

impl QuizApi for HttpQuizApi {
    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    async fn fetch_quiz(&self, quiz_id: &str) -> Result<Quiz, ApiError> {
        let url = self.url(&format!("/quiz/{}", quiz_id));
        let body = self.send(self.client.get(&url), &url).await?;
        Ok(quiz_from_body(&body)?)
    }

    async fn fetch_resume(&self, quiz_id: &str) -> Result<Option<ResumePayload>, ApiError> {
        let url = self.url(&format!("/quiz/{}/participation/resume", quiz_id));
        let body = self.send(self.client.get(&url), &url).await?;
        Ok(ResumePayload::from_body(&body)?)
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResult, ApiError> {
        let url = self.url(&format!("/quiz/{}/result", request.quiz_id));
        let body = self.send(self.client.post(&url).json(request), &url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_anonymous() {
        assert!(!HttpQuizApi::new("http://localhost/api/", Some("  ".into())).is_authenticated());
        assert!(HttpQuizApi::new("http://localhost/api", Some("abc".into())).is_authenticated());
    }

    #[test]
    fn test_url_building() {
        let api = HttpQuizApi::new("http://localhost/api/", None);
        assert_eq!(api.url("/quiz/3"), "http://localhost/api/quiz/3");
    }
}
