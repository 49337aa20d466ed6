//! Diagnostic hook: Record what the code hooks would see for an event.
//!
//! Writes every step to the debug log (CODE_HOOK_DEBUG_LOG, default
//! /tmp/hook_debug.log) and never calls a backend. Always exits 0 so a
//! misbehaving payload cannot block the host tool.

use anyhow::Result;
use hook_advisor::{Classifier, Verdict};
use hook_common::prelude::*;

const HOOK_NAME: &str = "hook-debug";

fn main() -> Result<()> {
    init_tracing();
    let sink = DebugSink::always();

    let entries = match read_stdin() {
        Ok(raw) => trace_event(&raw, &Classifier::default()),
        Err(e) => vec![step("", "error", &e.to_string())],
    };
    for entry in &entries {
        sink.record(entry);
    }

    HookOutput::silent();
    Ok(())
}

fn step(tool_name: &str, decision: &str, reason: &str) -> HookDebugLog {
    HookDebugLog::new(HOOK_NAME, tool_name).with_decision(decision, reason)
}

/// Walk the classification steps for one raw payload.
fn trace_event(raw: &str, classifier: &Classifier) -> Vec<HookDebugLog> {
    let mut entries = vec![step("", "trace", "hook started")];

    let input = match HookInput::parse(raw) {
        Ok(input) => input,
        Err(e) => {
            entries.push(step("", "error", &e.to_string()).with_context(raw));
            return entries;
        }
    };

    let tool = input.tool_name.as_str();
    let pretty = serde_json::to_string_pretty(&input).unwrap_or_default();
    entries.push(step(tool, "trace", "input received").with_context(&pretty));

    let path = input.get_file_path();
    entries.push(
        step(tool, "trace", if path.is_some() { "file path extracted" } else { "no file path found" })
            .with_file_path(path),
    );

    let verdict = classifier.classify(&input);
    let decision = match verdict {
        Verdict::Eligible { .. } => "eligible",
        Verdict::Rejected(_) => "ineligible",
    };
    entries.push(step(tool, decision, &verdict.reason()).with_file_path(path));

    entries.push(step(tool, "trace", "hook completed"));
    entries
}
