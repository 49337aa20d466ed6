//! Ollama `/api/generate`, non-streaming.

use super::{AdvisoryError, CompletionBackend, http_client, snippet};
use crate::config::HookConfig;
use crate::persona::Prompt;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OllamaBackend {
    url: String,
    model: String,
    timeout: Duration,
}

impl OllamaBackend {
    pub fn from_config(config: &HookConfig) -> Self {
        Self {
            url: format!("{}/api/generate", config.endpoint.trim_end_matches('/')),
            model: config.model.clone(),
            timeout: config.timeout,
        }
    }
}

impl CompletionBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    fn complete(&self, prompt: &Prompt) -> Result<String, AdvisoryError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: &prompt.user,
            system: prompt.system.as_deref(),
            stream: false,
            options: GenerateOptions {
                temperature: prompt.temperature,
                num_predict: prompt.max_tokens,
            },
        };

        tracing::debug!(url = %self.url, model = %self.model, "sending ollama generate");

        let response = http_client(self.timeout)?
            .post(&self.url)
            .json(&request)
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

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|source| AdvisoryError::Parse { source })?;
        match (parsed.response, parsed.error) {
            (Some(text), _) => Ok(text),
            (None, Some(error)) => Err(AdvisoryError::Api(error)),
            (None, None) => Err(AdvisoryError::UnexpectedResponse(snippet(&body))),
        }
    }
}
