//! Hook input parsing from stdin.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Read};
use thiserror::Error;

/// Failure to obtain a usable hook event.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read hook input: {0}")]
    Read(#[from] io::Error),

    /// The caller broke the hook contract: stdin was not a JSON object.
    #[error("invalid JSON input: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Main hook input structure received from Claude Code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookInput {
    /// The name of the tool being called (e.g., "Write", "Edit", "MultiEdit")
    #[serde(default, deserialize_with = "lenient")]
    pub tool_name: String,

    /// Tool-specific input parameters
    #[serde(default, deserialize_with = "lenient")]
    pub tool_input: ToolInput,

    /// Tool result (for PostToolUse hooks)
    #[serde(default)]
    pub tool_response: serde_json::Value,

    /// Hook event name
    #[serde(default, deserialize_with = "lenient")]
    pub hook_event_name: Option<String>,

    /// Session ID
    #[serde(default, deserialize_with = "lenient")]
    pub session_id: Option<String>,

    /// Additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Tool input parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolInput {
    /// File path, camelCase spelling
    #[serde(
        default,
        rename = "filePath",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub file_path_camel: Option<String>,

    /// File path, snake_case spelling
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub file_path: Option<String>,

    /// Content for Write tool
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub content: Option<String>,

    /// Additional fields (old_string, new_string, edits, ...)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Deserialize a field, falling back to its default when the JSON value has
/// the wrong shape. A stray number in `filePath` is not a broken contract.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Read the raw hook payload from stdin.
pub fn read_stdin() -> Result<String, InputError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

impl HookInput {
    /// Parse a single JSON document. Anything but an object is malformed.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Get the file path, preferring `filePath` over `file_path`.
    ///
    /// Empty strings count as absent, so an empty `filePath` falls through to
    /// `file_path`.
    pub fn get_file_path(&self) -> Option<&str> {
        let input = &self.tool_input;
        [&input.file_path_camel, &input.file_path]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .find(|p| !p.is_empty())
    }

    /// Get the written content if this is a Write tool call payload.
    pub fn get_content(&self) -> Option<&str> {
        self.tool_input.content.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_write_input() {
        let json = r#"{"tool_name": "Write", "tool_input": {"filePath": "/tmp/a.py", "content": "x=1"}}"#;
        let input = HookInput::parse(json).unwrap();
        assert_eq!(input.tool_name, "Write");
        assert_eq!(input.get_file_path(), Some("/tmp/a.py"));
        assert_eq!(input.get_content(), Some("x=1"));
    }

    #[test]
    fn test_parse_edit_input() {
        let json = r#"{"tool_name": "Edit", "tool_input": {"file_path": "/some/file.py", "old_string": "a", "new_string": "b"}}"#;
        let input = HookInput::parse(json).unwrap();
        assert_eq!(input.tool_name, "Edit");
        assert_eq!(input.get_file_path(), Some("/some/file.py"));
        assert!(input.tool_input.extra.contains_key("old_string"));
    }

    #[test]
    fn test_camel_case_path_wins() {
        let json = r#"{"tool_name": "Write", "tool_input": {"file_path": "/snake.py", "filePath": "/camel.py"}}"#;
        let input = HookInput::parse(json).unwrap();
        assert_eq!(input.get_file_path(), Some("/camel.py"));
    }

    #[test]
    fn test_empty_camel_case_path_falls_through() {
        let json = r#"{"tool_name": "Write", "tool_input": {"file_path": "/snake.py", "filePath": ""}}"#;
        let input = HookInput::parse(json).unwrap();
        assert_eq!(input.get_file_path(), Some("/snake.py"));
    }

    #[test]
    fn test_missing_fields_default() {
        let input = HookInput::parse("{}").unwrap();
        assert_eq!(input.tool_name, "");
        assert_eq!(input.get_file_path(), None);
        assert_eq!(input.get_content(), None);
    }

    #[test]
    fn test_wrong_types_are_absent() {
        let json = r#"{"tool_name": 7, "tool_input": {"filePath": 3, "content": ["x"]}}"#;
        let input = HookInput::parse(json).unwrap();
        assert_eq!(input.tool_name, "");
        assert_eq!(input.get_file_path(), None);
        assert_eq!(input.get_content(), None);

        let input = HookInput::parse(r#"{"tool_name": "Write", "tool_input": null}"#).unwrap();
        assert_eq!(input.get_file_path(), None);
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            HookInput::parse("{not json"),
            Err(InputError::Malformed(_))
        ));
        assert!(matches!(HookInput::parse("[]"), Err(InputError::Malformed(_))));
        assert!(matches!(HookInput::parse(""), Err(InputError::Malformed(_))));
    }
}
