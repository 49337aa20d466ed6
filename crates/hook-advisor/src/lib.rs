//! Code advice for file-writing tool calls.
//!
//! - Event classification (tool name, file allow-set)
//! - Content extraction from the event or from disk
//! - Language-model backends behind [`AdvisorySource`]
//! - The dispatcher tying it together into an [`Outcome`]

pub mod backend;
pub mod classify;
pub mod config;
pub mod content;
pub mod dispatch;
pub mod persona;

pub use backend::{AdvisoryError, AdvisorySource, ModelAdvisor, advisor_from_config};
pub use classify::{Classifier, FileFilter, Verdict, WriteTool};
pub use config::{BackendKind, ConfigError, HookConfig};
pub use content::{ContentProvider, FsContentProvider};
pub use dispatch::{Dispatcher, Outcome, Skip};
pub use persona::Persona;
