//! Debug logging for hooks.
//!
//! Appends hook decisions to a JSONL file. Several hook processes may write
//! the same file at once, so every record goes out as one complete line in a
//! single `write_all` on an append-mode handle.

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;

/// Environment variable that turns the debug log on.
pub const DEBUG_ENV: &str = "CODE_HOOK_DEBUG";
/// Environment variable overriding the debug log location.
pub const DEBUG_PATH_ENV: &str = "CODE_HOOK_DEBUG_LOG";
/// Default debug log location.
pub const DEFAULT_DEBUG_PATH: &str = "/tmp/hook_debug.log";

/// Debug log entry for hook execution
#[derive(Debug, Serialize)]
pub struct HookDebugLog {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Hook name (e.g., "code-suggestions")
    pub hook_name: String,
    /// Tool that triggered the hook
    pub tool_name: String,
    /// Resolved file path, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Decision made (advise/pass/abort/trace)
    pub decision: String,
    /// Reason for the decision
    pub reason: String,
    /// Additional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl HookDebugLog {
    pub fn new(hook_name: &str, tool_name: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            hook_name: hook_name.to_string(),
            tool_name: tool_name.to_string(),
            file_path: None,
            decision: String::new(),
            reason: String::new(),
            context: None,
        }
    }

    pub fn with_file_path(mut self, path: Option<&str>) -> Self {
        self.file_path = path.map(str::to_string);
        self
    }

    pub fn with_decision(mut self, decision: &str, reason: &str) -> Self {
        self.decision = decision.to_string();
        self.reason = reason.to_string();
        self
    }

    pub fn with_context(mut self, context: &str) -> Self {
        // Cap at 2000 chars to avoid huge logs
        self.context = Some(truncate_chars(context, 2000));
        self
    }

    /// Render as one newline-terminated JSON line.
    pub fn to_line(&self) -> String {
        let mut line = serde_json::to_string(self).unwrap_or_default();
        line.push('\n');
        line
    }
}

/// Destination for debug records. Disabled sinks drop everything.
#[derive(Debug, Clone, Default)]
pub struct DebugSink {
    path: Option<Utf8PathBuf>,
}

impl DebugSink {
    /// Sink that records nothing.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Sink writing to an explicit file.
    pub fn to_path(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Enabled only when `CODE_HOOK_DEBUG` is set.
    pub fn from_env() -> Self {
        if std::env::var_os(DEBUG_ENV).is_some() {
            Self::always()
        } else {
            Self::disabled()
        }
    }

    /// Enabled regardless of `CODE_HOOK_DEBUG`.
    pub fn always() -> Self {
        Self::to_path(debug_log_path())
    }

    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Append a record. Failures are reported on stderr and otherwise ignored.
    pub fn record(&self, entry: &HookDebugLog) {
        if let Err(e) = self.try_record(entry) {
            tracing::warn!(error = %e, "failed to write debug log");
        }
    }

    fn try_record(&self, entry: &HookDebugLog) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(entry.to_line().as_bytes())
    }
}

/// Get debug log file path
pub fn debug_log_path() -> Utf8PathBuf {
    std::env::var(DEBUG_PATH_ENV)
        .map(Utf8PathBuf::from)
        .unwrap_or_else(|_| Utf8PathBuf::from(DEFAULT_DEBUG_PATH))
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_debug_log_serialization() {
        let log = HookDebugLog::new("code-suggestions", "Write")
            .with_file_path(Some("/tmp/a.py"))
            .with_decision("pass", "ineligible file");

        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("code-suggestions"));
        assert!(json.contains("\"file_path\":\"/tmp/a.py\""));
        assert!(!json.contains("context"));
    }

    #[test]
    fn test_truncation() {
        let long_input = "é".repeat(5000);
        let log = HookDebugLog::new("test", "Write").with_context(&long_input);

        let context = log.context.unwrap();
        assert_eq!(context.chars().count(), 2003); // 2000 + "..."
    }

    #[test]
    fn test_record_appends_lines() {
        let dir = tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("logs").join("debug.jsonl")).unwrap();
        let sink = DebugSink::to_path(path.clone());

        sink.record(&HookDebugLog::new("a", "Write").with_decision("pass", "one"));
        sink.record(&HookDebugLog::new("b", "Edit").with_decision("advise", "two"));

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("timestamp").is_some());
        }
    }

    #[test]
    fn test_disabled_sink_writes_nothing() {
        let sink = DebugSink::disabled();
        assert!(!sink.is_enabled());
        sink.record(&HookDebugLog::new("a", "Write"));
    }
}
