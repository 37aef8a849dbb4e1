//! Client for OpenAI-compatible chat-completion APIs (OpenRouter)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::CompletionProvider;
use crate::config::Config;
use crate::error::{ConfigError, RemoteServiceError};

/// Client for an OpenRouter-style `/chat/completions` endpoint
#[derive(Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    referer: String,
    app_title: String,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
}

/// Response from the chat-completions API
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Error detail from the chat-completions API
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenRouterClient {
    /// Create a client from service configuration
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            referer: config.referer.clone(),
            app_title: config.app_title.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a system + user message pair and return the decoded response
    pub async fn send(
        &self,
        system: &str,
        user_message: &str,
    ) -> Result<ApiResponse, RemoteServiceError> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: user_message.to_string(),
                },
            ],
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.app_title)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if let Ok(api_err) = serde_json::from_str::<ApiError>(&body) {
                tracing::warn!(
                    status = status.as_u16(),
                    message = %api_err.error.message,
                    "Completion API returned an error"
                );
            } else {
                tracing::warn!(status = status.as_u16(), "Completion API returned an error");
            }
            return Err(RemoteServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<ApiResponse>().await?)
    }
}

/// Extract the text of the first choice
pub fn extract_text(response: &ApiResponse) -> Result<String, RemoteServiceError> {
    response
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
        .ok_or_else(|| {
            RemoteServiceError::MalformedResponse("no message content in first choice".to_string())
        })
}

#[async_trait]
impl CompletionProvider for OpenRouterClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, RemoteServiceError> {
        let response = self.send(system, prompt).await?;
        extract_text(&response)
    }
}
