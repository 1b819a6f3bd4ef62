//! Language Model Client
//!
//! Groq chat-completion client for the companion conversations. Groq exposes
//! an OpenAI-compatible REST API, so the request/response types follow the
//! chat-completions wire format.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Groq chat-completions endpoint.
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Budget for one completion round trip.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// Abstraction over the completion API so services are testable without the
/// network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Produce one assistant reply for the given system prompt and user
    /// message.
    async fn complete(&self, system_prompt: &str, user_message: &str)
        -> Result<String, AppError>;
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client implementation that talks to the Groq HTTP API.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: GROQ_API_URL.into(),
        }
    }

    /// Overrides the endpoint, used to point tests at a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, AppError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: system_prompt,
                },
                ApiMessage {
                    role: "user",
                    content: user_message,
                },
            ],
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .timeout(COMPLETION_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Completion(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Completion(format!(
                "Groq API returned {status}"
            )));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Completion(format!("malformed response: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::Completion("response contained no choices".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_serializes_to_openai_wire_format() {
        let request = ChatCompletionRequest {
            model: "mixtral-8x7b-32768",
            messages: vec![ApiMessage {
                role: "user",
                content: "hello",
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "mixtral-8x7b-32768");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn response_parses_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hi");
    }
}
