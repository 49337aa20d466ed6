//! Event classification and dispatch.
//!
//! One event in, one [`Outcome`] out. Every stage returns `Result<_, Skip>`
//! and the stages chain with `?`, so a pass-through always carries the reason
//! it happened. Only malformed input escapes as an error.

use crate::backend::{AdvisoryError, AdvisorySource};
use crate::classify::{Classifier, Rejection, Verdict, WriteTool};
use crate::content::{ContentProvider, FsContentProvider};
use crate::persona::file_label;
use hook_common::{DebugSink, HookDebugLog, HookInput, HookOutput, InputError};
use std::io;
use std::path::Path;
use thiserror::Error;

/// Why the hook let the tool call through without a message.
#[derive(Debug, Error)]
pub enum Skip {
    #[error("unrecognized tool '{0}'")]
    UnrecognizedTool(String),

    #[error("no file path")]
    MissingPath,

    #[error("ineligible file: {0}")]
    IneligibleFile(String),

    #[error("no content to review")]
    EmptyContent,

    #[error("failed to read {path}: {source}")]
    ContentRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{backend} advisory failed: {source}")]
    Advisory {
        backend: String,
        #[source]
        source: AdvisoryError,
    },

    #[error("{0} had no advice")]
    NoAdvice(String),
}

impl Skip {
    /// Failures worth a warning, as opposed to events that simply don't apply.
    pub fn is_failure(&self) -> bool {
        matches!(self, Skip::ContentRead { .. } | Skip::Advisory { .. })
    }
}

impl From<Rejection> for Skip {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::UnrecognizedTool(name) => Skip::UnrecognizedTool(name),
            Rejection::MissingPath => Skip::MissingPath,
            Rejection::UnlistedFile(path) => Skip::IneligibleFile(path),
        }
    }
}

/// What the hook process should do.
#[derive(Debug)]
pub enum Outcome {
    /// Print nothing, exit 0.
    PassThrough(Skip),
    /// Print the advisory envelope, exit 0.
    Advise(String),
}

impl Outcome {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Outcome::PassThrough(_))
    }

    /// Envelope to print, if any.
    pub fn output(&self) -> Option<HookOutput> {
        match self {
            Outcome::Advise(message) => Some(HookOutput::advisory(message.clone())),
            Outcome::PassThrough(_) => None,
        }
    }
}

pub const DEFAULT_HEADER: &str = "Code suggestions";

/// Classifies events and relays advice for eligible ones.
pub struct Dispatcher {
    hook_name: String,
    classifier: Classifier,
    content: Box<dyn ContentProvider>,
    advisor: Box<dyn AdvisorySource>,
    header: String,
    debug: DebugSink,
}

impl Dispatcher {
    /// Dispatcher with the full code-file allow-set, reading edits from disk.
    pub fn new(hook_name: impl Into<String>, advisor: Box<dyn AdvisorySource>) -> Self {
        Self {
            hook_name: hook_name.into(),
            classifier: Classifier::default(),
            content: Box::new(FsContentProvider),
            advisor,
            header: DEFAULT_HEADER.to_string(),
            debug: DebugSink::disabled(),
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_content_provider(mut self, content: Box<dyn ContentProvider>) -> Self {
        self.content = content;
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_debug_sink(mut self, debug: DebugSink) -> Self {
        self.debug = debug;
        self
    }

    /// Parse one raw event and dispatch it.
    pub fn dispatch_raw(&self, raw: &str) -> Result<Outcome, InputError> {
        match HookInput::parse(raw) {
            Ok(input) => Ok(self.dispatch(&input)),
            Err(e) => {
                self.debug.record(
                    &HookDebugLog::new(&self.hook_name, "")
                        .with_decision("abort", &e.to_string())
                        .with_context(raw),
                );
                Err(e)
            }
        }
    }

    /// Dispatch a parsed event. Never fails; failures become pass-through.
    pub fn dispatch(&self, input: &HookInput) -> Outcome {
        let outcome = match self.run(input) {
            Ok(message) => Outcome::Advise(message),
            Err(skip) => Outcome::PassThrough(skip),
        };
        self.report(input, &outcome);
        outcome
    }

    fn run(&self, input: &HookInput) -> Result<String, Skip> {
        let (tool, path) = self.eligible(input)?;
        let content = self.extract(tool, input, &path)?;
        let advice = self.consult(&content, &path)?;
        Ok(self.message(&path, &advice))
    }

    fn eligible(&self, input: &HookInput) -> Result<(WriteTool, String), Skip> {
        match self.classifier.classify(input) {
            Verdict::Eligible { tool, path, .. } => Ok((tool, path)),
            Verdict::Rejected(rejection) => Err(rejection.into()),
        }
    }

    /// Write events carry their content; edits are read back from disk.
    fn extract(&self, tool: WriteTool, input: &HookInput, path: &str) -> Result<String, Skip> {
        let raw = if tool.carries_content() {
            input.get_content().unwrap_or_default().to_string()
        } else {
            self.content
                .read(Path::new(path))
                .map_err(|source| Skip::ContentRead {
                    path: path.to_string(),
                    source,
                })?
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Skip::EmptyContent);
        }
        Ok(trimmed.to_string())
    }

    fn consult(&self, content: &str, path: &str) -> Result<String, Skip> {
        let backend = self.advisor.name().to_string();
        match self.advisor.advise(content, path) {
            Ok(Some(advice)) if !advice.is_empty() => Ok(advice),
            Ok(_) => Err(Skip::NoAdvice(backend)),
            Err(source) => Err(Skip::Advisory { backend, source }),
        }
    }

    fn message(&self, path: &str, advice: &str) -> String {
        format!("{} for {}:\n\n{}", self.header, file_label(path), advice)
    }

    fn report(&self, input: &HookInput, outcome: &Outcome) {
        let path = input.get_file_path();
        let (decision, reason) = match outcome {
            Outcome::Advise(_) => {
                tracing::info!(hook = %self.hook_name, path, "advice relayed");
                ("advise", format!("{} replied", self.advisor.name()))
            }
            Outcome::PassThrough(skip) => {
                if skip.is_failure() {
                    tracing::warn!(hook = %self.hook_name, path, "{}", skip);
                } else {
                    tracing::debug!(hook = %self.hook_name, path, "pass: {}", skip);
                }
                ("pass", skip.to_string())
            }
        };

        if self.debug.is_enabled() {
            self.debug.record(
                &HookDebugLog::new(&self.hook_name, &input.tool_name)
                    .with_file_path(path)
                    .with_decision(decision, &reason),
            );
        }
    }
}
