//! Advisory sources: language-model backends behind one capability.

mod chat;
mod ollama;

pub use chat::ChatCompletionsBackend;
pub use ollama::OllamaBackend;

use crate::config::{BackendKind, HookConfig};
use crate::persona::{Persona, Prompt};
use std::time::Duration;
use thiserror::Error;

/// Any failure of an advisory call. The dispatcher logs these and moves on.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("unparseable response: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected response format: {0}")]
    UnexpectedResponse(String),
}

impl AdvisoryError {
    /// Classify a reqwest failure, singling out timeouts.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Transport(err)
        }
    }
}

/// Something that can comment on a piece of written code.
pub trait AdvisorySource {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Advice for `content` written to `file_path`, `None` when the model had
    /// nothing to say.
    fn advise(&self, content: &str, file_path: &str) -> Result<Option<String>, AdvisoryError>;
}

/// Transport to one model server: prompt in, raw reply text out.
pub trait CompletionBackend {
    fn name(&self) -> &str;

    fn complete(&self, prompt: &Prompt) -> Result<String, AdvisoryError>;
}

/// Pairs a persona with a transport.
pub struct ModelAdvisor {
    persona: Persona,
    backend: Box<dyn CompletionBackend>,
}

impl ModelAdvisor {
    pub fn new(persona: Persona, backend: Box<dyn CompletionBackend>) -> Self {
        Self { persona, backend }
    }
}

impl AdvisorySource for ModelAdvisor {
    fn name(&self) -> &str {
        self.backend.name()
    }

    fn advise(&self, content: &str, file_path: &str) -> Result<Option<String>, AdvisoryError> {
        let prompt = self.persona.prompt(content, file_path);
        let reply = self.backend.complete(&prompt)?;
        let reply = reply.trim();
        Ok((!reply.is_empty()).then(|| reply.to_string()))
    }
}

/// Build the transport selected by `config`.
pub fn backend_from_config(config: &HookConfig) -> Box<dyn CompletionBackend> {
    match config.backend {
        BackendKind::OpenRouter | BackendKind::LmStudio => {
            Box::new(ChatCompletionsBackend::from_config(config))
        }
        BackendKind::Ollama => Box::new(OllamaBackend::from_config(config)),
    }
}

/// Build the advisory source for `config`, speaking as `persona`.
pub fn advisor_from_config(config: &HookConfig, persona: Persona) -> ModelAdvisor {
    ModelAdvisor::new(persona, backend_from_config(config))
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client, AdvisoryError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(AdvisoryError::Transport)
}

/// Keep error bodies readable in logs.
pub(crate) fn snippet(body: &str) -> String {
    const MAX: usize = 500;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl CompletionBackend for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn complete(&self, _prompt: &Prompt) -> Result<String, AdvisoryError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_model_advisor_trims_reply() {
        let advisor = ModelAdvisor::new(Persona::suggestions(), Box::new(Fixed("\n looks fine \n")));
        assert_eq!(
            advisor.advise("x=1", "/tmp/a.py").unwrap(),
            Some("looks fine".to_string())
        );
        assert_eq!(advisor.name(), "fixed");
    }

    #[test]
    fn test_blank_reply_is_no_advice() {
        let advisor = ModelAdvisor::new(Persona::suggestions(), Box::new(Fixed("  \n\t")));
        assert_eq!(advisor.advise("x=1", "/tmp/a.py").unwrap(), None);
    }

    #[test]
    fn test_backend_selection() {
        let config = HookConfig::for_backend(BackendKind::Ollama, |_| None).unwrap();
        assert_eq!(backend_from_config(&config).name(), "ollama");

        let config = HookConfig::for_backend(BackendKind::LmStudio, |_| None).unwrap();
        assert_eq!(backend_from_config(&config).name(), "lm_studio");
    }

    #[test]
    fn test_snippet() {
        assert_eq!(snippet("short"), "short");
        assert!(snippet(&"x".repeat(600)).ends_with("..."));
    }
}
