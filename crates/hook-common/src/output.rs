//! Hook output generation for stdout.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Advisory envelope printed on stdout.
///
/// `continue` is always true: these hooks add context, they never block the
/// host tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    /// Let the host tool proceed
    #[serde(rename = "continue")]
    pub continue_: bool,

    /// Message shown to the model and the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

impl HookOutput {
    /// Non-blocking output carrying a system message.
    pub fn advisory(message: impl Into<String>) -> Self {
        Self {
            continue_: true,
            system_message: Some(message.into()),
        }
    }

    /// Serialize as a single JSON line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Write the output to stdout.
    pub fn write_stdout(&self) -> anyhow::Result<()> {
        let json = self.to_json()?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json)?;
        stdout.flush()?;
        Ok(())
    }

    /// Write nothing to stdout (silent pass).
    pub fn silent() {
        // Do nothing - hook passes silently
    }
}
