/// LLM Client — the single point of entry for generative-text calls in Tailor.
///
/// ARCHITECTURAL RULE: No other module may call the completion API directly.
/// All LLM interactions MUST go through this module.
///
/// Speaks the OpenAI-compatible chat completions protocol. One attempt per call:
/// a failed request is terminal for the run, the timeout bounds how long it can hang.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Sampling parameters for a completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub n: u32,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    n: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl CompletionResponse {
    /// Trimmed text of the first choice, if it has any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            api_url,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a single user prompt and returns the trimmed completion text.
    pub async fn complete(&self, prompt: &str, sampling: Sampling) -> Result<String, LlmError> {
        let request_body = CompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: sampling.max_tokens,
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            n: sampling.n,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let completion: CompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of an API error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_trims_first_choice() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"  SUMMARY\nRust dev \n"}}],"usage":null}"#,
        )
        .unwrap();
        assert_eq!(response.text(), Some("SUMMARY\nRust dev"));
    }

    #[test]
    fn test_text_of_blank_completion_is_none() {
        let response: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"   "}}]}"#).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_text_without_choices_is_none() {
        let response: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_api_error_message_extracted() {
        let body = r#"{"error":{"message":"Incorrect API key provided"}}"#.to_string();
        assert_eq!(api_error_message(body), "Incorrect API key provided");
    }

    #[test]
    fn test_api_error_message_falls_back_to_body() {
        assert_eq!(api_error_message("upstream timeout".to_string()), "upstream timeout");
    }

    #[test]
    fn test_request_serializes_sampling() {
        let request = CompletionRequest {
            model: "m",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            max_tokens: 1500,
            temperature: 0.5,
            top_p: 1.0,
            n: 1,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["max_tokens"], 1500);
        assert_eq!(value["top_p"], 1.0);
        assert_eq!(value["n"], 1);
        assert_eq!(value["messages"][0]["role"], "user");
    }
}
