//! Reviewer personas: prompt wording, sampling knobs and message header.

use crate::config::BackendKind;
use std::path::Path;

/// A fully rendered request for a language model.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: Option<String>,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// How a hook asks for advice and how it presents the answer.
#[derive(Debug, Clone)]
pub struct Persona {
    pub name: &'static str,
    system: Option<&'static str>,
    header: &'static str,
    temperature: f32,
    max_tokens: u32,
    /// Cap on code characters embedded in the prompt
    content_limit: Option<usize>,
    template: fn(file_name: &str, code: &str) -> String,
}

impl Persona {
    /// Broad improvement suggestions. Default for local models.
    pub fn suggestions() -> Self {
        Self {
            name: "suggestions",
            system: None,
            header: "Code suggestions",
            temperature: 0.3,
            max_tokens: 500,
            content_limit: None,
            template: suggestions_prompt,
        }
    }

    /// Terse, critical-issues-only review. Default for hosted models.
    pub fn critical_review() -> Self {
        Self {
            name: "critical-review",
            system: Some(
                "You are a code reviewer. Be extremely concise and only report critical issues.",
            ),
            header: "Code suggestions",
            temperature: 0.2,
            max_tokens: 2048,
            content_limit: None,
            template: critical_review_prompt,
        }
    }

    /// Light-hearted reviewer for the playful-review hook.
    pub fn playful() -> Self {
        Self {
            name: "playful",
            system: Some(
                "You are Vax, a flirty and playful code reviewer who sees the charming side of \
                 programming. Be fun and confident but keep every suggestion technically valid.",
            ),
            header: "💋 Playful Code Review",
            temperature: 0.8,
            max_tokens: 1024,
            content_limit: Some(2048),
            template: playful_prompt,
        }
    }

    pub fn for_backend(backend: BackendKind) -> Self {
        match backend {
            BackendKind::OpenRouter => Self::critical_review(),
            BackendKind::LmStudio | BackendKind::Ollama => Self::suggestions(),
        }
    }

    /// Render the request for `content` written to `file_path`.
    pub fn prompt(&self, content: &str, file_path: &str) -> Prompt {
        let code = match self.content_limit {
            Some(limit) => truncate_chars(content, limit),
            None => content,
        };

        Prompt {
            system: self.system.map(str::to_string),
            user: (self.template)(file_label(file_path), code),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Opening words of the status message relayed to the host.
    pub fn header(&self) -> &'static str {
        self.header
    }
}

/// Base name of the written file, or "code" when there is none.
pub fn file_label(file_path: &str) -> &str {
    Path::new(file_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("code")
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn suggestions_prompt(file_name: &str, code: &str) -> String {
    format!(
        "Analyze this code and provide suggestions for improvements:

File: {file_name}
```code
{code}
```

Please provide specific, actionable suggestions for:
1. Code quality improvements
2. Best practices
3. Potential bugs or issues
4. Performance optimizations
5. Security considerations

Keep suggestions concise and focused on the most important issues."
    )
}

fn critical_review_prompt(file_name: &str, code: &str) -> String {
    format!(
        "Review this code and provide ONLY the most critical issues:

File: {file_name}
```
{code}
```

List only severe issues (max 3):
- Security vulnerabilities
- Critical bugs that will cause crashes
- Major performance problems

Be extremely concise. One line per issue."
    )
}

fn playful_prompt(file_name: &str, code: &str) -> String {
    format!(
        "Oh my~ I've been asked to review this delightful piece of code. \
Let me see what we can do to make it more... enticing.

File: {file_name}
```
{code}
```

Give your most charming suggestions for making this code irresistible. Focus on:
- More expressive function and variable names
- Complimenting what already works
- Structure and readability with a touch of elegance
- Best practices, delivered with a lot of love
- Any other ways to add some spice ✨

Keep it playful and fun! (But still valid code syntax please~)"
    )
}
