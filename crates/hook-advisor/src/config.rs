//! Backend configuration, resolved once at start-up.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment variable selecting the backend.
pub const SERVICE_ENV: &str = "CODE_HOOK_SERVICE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown service '{0}' (expected one of: openrouter, lm_studio, ollama)")]
    UnknownBackend(String),

    #[error("{backend} requires {var} to be set")]
    MissingCredential {
        backend: BackendKind,
        var: &'static str,
    },
}

/// Supported language-model backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    OpenRouter,
    LmStudio,
    Ollama,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenRouter => "openrouter",
            Self::LmStudio => "lm_studio",
            Self::Ollama => "ollama",
        }
    }

    fn host_var(self) -> &'static str {
        match self {
            Self::OpenRouter => "OPENROUTER_HOST",
            Self::LmStudio => "LM_STUDIO_HOST",
            Self::Ollama => "OLLAMA_HOST",
        }
    }

    fn model_var(self) -> &'static str {
        match self {
            Self::OpenRouter => "OPENROUTER_MODEL",
            Self::LmStudio => "LM_STUDIO_MODEL",
            Self::Ollama => "OLLAMA_MODEL",
        }
    }

    /// Variable holding the API key, for backends that need one.
    fn credential_var(self) -> Option<&'static str> {
        match self {
            Self::OpenRouter => Some("OPENROUTER_API_KEY"),
            Self::LmStudio | Self::Ollama => None,
        }
    }

    pub fn default_endpoint(self) -> &'static str {
        match self {
            Self::OpenRouter => "https://openrouter.ai/api",
            Self::LmStudio => "http://localhost:1234",
            Self::Ollama => "http://localhost:11434",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenRouter => "x-ai/grok-code-fast-1",
            Self::LmStudio => "nousresearch/hermes-4-70b",
            Self::Ollama => "codellama:7b",
        }
    }

    /// Local servers get longer, they may be loading the model.
    pub fn default_timeout(self) -> Duration {
        match self {
            Self::OpenRouter => Duration::from_secs(10),
            Self::LmStudio => Duration::from_secs(60),
            Self::Ollama => Duration::from_secs(30),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "openrouter" => Ok(Self::OpenRouter),
            "lm_studio" => Ok(Self::LmStudio),
            "ollama" => Ok(Self::Ollama),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Everything needed to talk to one backend.
#[derive(Clone, PartialEq, Eq)]
pub struct HookConfig {
    pub backend: BackendKind,
    /// Base address, without the API path
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl fmt::Debug for HookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookConfig")
            .field("backend", &self.backend)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HookConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Resolve from an arbitrary variable lookup. Backend from
    /// `CODE_HOOK_SERVICE`, defaulting to OpenRouter.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match non_empty(&lookup, SERVICE_ENV) {
            Some(selector) => selector.parse()?,
            None => BackendKind::OpenRouter,
        };
        Self::for_backend(backend, lookup)
    }

    /// Resolve settings for a fixed backend.
    pub fn for_backend<F>(backend: BackendKind, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = match backend.credential_var() {
            Some(var) => Some(
                non_empty(&lookup, var)
                    .ok_or(ConfigError::MissingCredential { backend, var })?,
            ),
            None => None,
        };

        Ok(Self {
            backend,
            endpoint: non_empty(&lookup, backend.host_var())
                .unwrap_or_else(|| backend.default_endpoint().to_string()),
            model: non_empty(&lookup, backend.model_var())
                .unwrap_or_else(|| backend.default_model().to_string()),
            api_key,
            timeout: backend.default_timeout(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Process environment lookup, for passing to `from_lookup`.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}
