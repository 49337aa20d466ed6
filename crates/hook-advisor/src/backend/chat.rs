//! OpenAI-compatible chat completions (OpenRouter, LM Studio).

use super::{AdvisoryError, CompletionBackend, http_client, snippet};
use crate::config::HookConfig;
use crate::persona::Prompt;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REFERER: &str = "https://8b.is?source=HookedOnCode";
const TITLE: &str = "Code Suggestions Hook";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// `POST {endpoint}/v1/chat/completions`, with Bearer auth when a key is set.
#[derive(Debug, Clone)]
pub struct ChatCompletionsBackend {
    name: &'static str,
    url: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ChatCompletionsBackend {
    pub fn from_config(config: &HookConfig) -> Self {
        Self {
            name: config.backend.as_str(),
            url: format!(
                "{}/v1/chat/completions",
                config.endpoint.trim_end_matches('/')
            ),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CompletionBackend for ChatCompletionsBackend {
    fn name(&self) -> &str {
        self.name
    }

    fn complete(&self, prompt: &Prompt) -> Result<String, AdvisoryError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &prompt.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &prompt.user,
        });

        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
            stream: false,
        };

        let client = http_client(self.timeout)?;
        let mut builder = client.post(&self.url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder
                .bearer_auth(key)
                .header("HTTP-Referer", REFERER)
                .header("X-Title", TITLE);
        }

        tracing::debug!(backend = self.name, url = %self.url, model = %self.model, "sending chat completion");

        let response = builder
            .send()
            .map_err(|e| AdvisoryError::from_reqwest(e, self.timeout))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AdvisoryError::from_reqwest(e, self.timeout))?;

        if !status.is_success() {
            return Err(AdvisoryError::Status {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        parse_reply(&body)
    }
}

fn parse_reply(body: &str) -> Result<String, AdvisoryError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|source| AdvisoryError::Parse { source })?;

    if let Some(choice) = parsed.choices.into_iter().next() {
        return Ok(choice.message.content.unwrap_or_default());
    }
    if let Some(error) = parsed.error {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(AdvisoryError::Api(message));
    }
    Err(AdvisoryError::UnexpectedResponse(snippet(body)))
}
