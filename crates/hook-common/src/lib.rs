//! Common utilities for Claude Code hooks.
//!
//! This crate provides shared functionality for all Rust-based hooks:
//! - JSON input/output parsing
//! - Debug logging
//! - Stderr tracing setup

pub mod debug;
pub mod input;
pub mod logging;
pub mod output;

pub use debug::{DebugSink, HookDebugLog};
pub use input::{HookInput, InputError, ToolInput, read_stdin};
pub use logging::init_tracing;
pub use output::HookOutput;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::debug::{DebugSink, HookDebugLog};
    pub use crate::input::{HookInput, InputError, ToolInput, read_stdin};
    pub use crate::logging::init_tracing;
    pub use crate::output::HookOutput;
    pub use anyhow::{Context, Result};
    pub use serde::{Deserialize, Serialize};
}
