//! Advisory backend client

use std::time::Duration;

use agro_advisor_config::BackendConfig;
use agro_advisor_core::Language;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::BackendError;

/// Request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// `LANG:<EN|HI> | <raw text>`
pub fn format_question(language: Language, text: &str) -> String {
    format!("LANG:{} | {}", language.backend_tag(), text)
}

/// Anything that can answer a farmer's question remotely
#[async_trait]
pub trait AdvisoryBackend: Send + Sync {
    async fn ask(&self, language: Language, text: &str) -> Result<String, BackendError>;

    fn name(&self) -> &str;
}

/// HTTP client for the question/answer service
#[derive(Clone)]
pub struct AdvisoryBackendClient {
    client: Client,
    endpoint: String,
}

impl AdvisoryBackendClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        Self::new(&config.endpoint, Duration::from_millis(config.timeout_ms))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AdvisoryBackend for AdvisoryBackendClient {
    async fn ask(&self, language: Language, text: &str) -> Result<String, BackendError> {
        let request = AskRequest {
            question: format_question(language, text),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(endpoint = %self.endpoint, status = status.as_u16(), "Advisory backend error");
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response: AskResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            endpoint = %self.endpoint,
            chars = response.answer.chars().count(),
            "Advisory backend answered"
        );
        Ok(response.answer)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use tokio::net::TcpListener;

    /// Serve `router` on an ephemeral port, returning its `/ask` URL
    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/ask", addr)
    }

    fn client(endpoint: String) -> AdvisoryBackendClient {
        AdvisoryBackendClient::new(endpoint, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_question_prefix() {
        assert_eq!(
            format_question(Language::Hindi, "धान के लिए pH?"),
            "LANG:HI | धान के लिए pH?"
        );
        assert_eq!(format_question(Language::English, "hi"), "LANG:EN | hi");
    }

    #[tokio::test]
    async fn test_answer_round_trip() {
        let router = Router::new().route(
            "/ask",
            post(|Json(request): Json<AskRequest>| async move {
                Json(AskResponse {
                    answer: format!("echo: {}", request.question),
                })
            }),
        );
        let endpoint = serve(router).await;

        let answer = client(endpoint).ask(Language::English, "pH 6.5?").await.unwrap();
        assert_eq!(answer, "echo: LANG:EN | pH 6.5?");
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let router = Router::new().route(
            "/ask",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model offline") }),
        );
        let endpoint = serve(router).await;

        let result = client(endpoint).ask(Language::English, "hello").await;
        assert_eq!(
            result,
            Err(BackendError::Status {
                status: 500,
                body: "model offline".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let router = Router::new().route("/ask", post(|| async { "not json" }));
        let endpoint = serve(router).await;

        let result = client(endpoint).ask(Language::English, "hello").await;
        assert!(matches!(result, Err(BackendError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client(format!("http://{}/ask", addr))
            .ask(Language::English, "hello")
            .await;
        assert!(matches!(result, Err(BackendError::Network(_))));
    }
}
