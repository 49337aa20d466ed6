//! Event eligibility: which tool, which file.

use hook_common::HookInput;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// File-writing tools whose output gets reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTool {
    Write,
    Edit,
    MultiEdit,
}

impl WriteTool {
    /// Exact, case-sensitive match on the host tool name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Write" => Some(Self::Write),
            "Edit" => Some(Self::Edit),
            "MultiEdit" => Some(Self::MultiEdit),
            _ => None,
        }
    }

    /// Whether the written content travels inside the event.
    pub fn carries_content(self) -> bool {
        matches!(self, Self::Write)
    }
}

const CODE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".ts", ".java", ".cpp", ".c", ".cs", ".php", ".rb", ".go", ".rs", ".swift",
    ".kt", ".scala", ".clj", ".hs", ".ml", ".sh", ".bash", ".zsh", ".fish", ".ps1", ".sql",
    ".html", ".css", ".scss", ".sass", ".less", ".vue", ".svelte", ".jsx", ".tsx",
];

const CODE_BASENAMES: &[&str] = &[
    "Dockerfile",
    "Makefile",
    "CMakeLists.txt",
    "package.json",
    "requirements.txt",
    "Cargo.toml",
    "go.mod",
    "composer.json",
];

const CORE_LANGUAGE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".ts", ".java", ".cpp", ".c", ".rs", ".go", ".rb", ".swift", ".kt", ".scala",
    ".php", ".cs",
];

/// Allow-set of file extensions and exact basenames.
///
/// Extensions are stored lower-cased with their leading dot and matched
/// case-insensitively. Basenames match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    extensions: BTreeSet<String>,
    basenames: BTreeSet<String>,
}

impl FileFilter {
    pub fn new<E, B>(extensions: E, basenames: B) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| normalize_extension(e.as_ref()))
                .collect(),
            basenames: basenames
                .into_iter()
                .map(|b| b.as_ref().to_string())
                .collect(),
        }
    }

    /// Source files plus common build manifests.
    pub fn code_files() -> Self {
        Self::new(CODE_EXTENSIONS, CODE_BASENAMES)
    }

    /// Mainstream programming languages only, no manifests.
    pub fn core_languages() -> Self {
        Self::new(CORE_LANGUAGE_EXTENSIONS, std::iter::empty::<&str>())
    }

    /// Match a path against the allow-set.
    pub fn check(&self, path: &str) -> Option<FileMatch> {
        if path.is_empty() {
            return None;
        }
        let path = Path::new(path);

        // `Path::extension` treats ".bashrc" as extension-less, as wanted
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            let ext = format!(".{}", ext.to_lowercase());
            if self.extensions.contains(&ext) {
                return Some(FileMatch::Extension(ext));
            }
        }

        let name = path.file_name().and_then(|n| n.to_str())?;
        self.basenames
            .contains(name)
            .then(|| FileMatch::Basename(name.to_string()))
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

/// Which allow-set entry a path matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileMatch {
    Extension(String),
    Basename(String),
}

/// Why an event is not reviewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    UnrecognizedTool(String),
    MissingPath,
    UnlistedFile(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnrecognizedTool(name) => write!(f, "unrecognized tool '{}'", name),
            Rejection::MissingPath => write!(f, "no file path"),
            Rejection::UnlistedFile(path) => write!(f, "file not in allow-set: {}", path),
        }
    }
}

/// Eligibility of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Eligible {
        tool: WriteTool,
        path: String,
        matched: FileMatch,
    },
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Verdict::Eligible { .. })
    }

    pub fn reason(&self) -> String {
        match self {
            Verdict::Eligible { matched, .. } => match matched {
                FileMatch::Extension(ext) => format!("extension {}", ext),
                FileMatch::Basename(name) => format!("basename {}", name),
            },
            Verdict::Rejected(rejection) => rejection.to_string(),
        }
    }
}

/// Pure classification of an event against an allow-set.
#[derive(Debug, Clone)]
pub struct Classifier {
    filter: FileFilter,
}

impl Classifier {
    pub fn new(filter: FileFilter) -> Self {
        Self { filter }
    }

    pub fn classify(&self, input: &HookInput) -> Verdict {
        let Some(tool) = WriteTool::from_name(&input.tool_name) else {
            return Verdict::Rejected(Rejection::UnrecognizedTool(input.tool_name.clone()));
        };

        let Some(path) = input.get_file_path() else {
            return Verdict::Rejected(Rejection::MissingPath);
        };

        match self.filter.check(path) {
            Some(matched) => Verdict::Eligible {
                tool,
                path: path.to_string(),
                matched,
            },
            None => Verdict::Rejected(Rejection::UnlistedFile(path.to_string())),
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(FileFilter::code_files())
    }
}
