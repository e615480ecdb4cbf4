//! Core data types for project compilation and preview.

use serde::{Deserialize, Serialize};

/// One logical source file in a generated project.
///
/// The name carries the extension that drives classification; there are no
/// path-nesting semantics beyond matching `index.html` by exact name. Input
/// files are never mutated by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub name: String,
    pub content: String,
}

impl ProjectFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Output of a compilation run.
///
/// `html` is always a complete document: the assembled project on success,
/// the built-in skeleton for empty input, or the error page on failure.
/// `has_errors` is true exactly when `errors` is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledProject {
    pub html: String,
    pub has_errors: bool,
    pub errors: Vec<String>,
}

/// Project type detected from file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    React,
    Vue,
    Html,
    Vanilla,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue => "vue",
            Self::Html => "html",
            Self::Vanilla => "vanilla",
        }
    }
}

/// Result of the advisory project-file validation.
///
/// Validation never blocks compilation; callers decide whether to act on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Errors that can occur while assembling a preview document.
#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    #[error("project has {count} files, more than the {max} the preview compiler accepts")]
    TooManyFiles { count: usize, max: usize },

    #[error("compiled document is {bytes} bytes, larger than the {max}-byte preview limit")]
    OutputTooLarge { bytes: usize, max: usize },
}

/// Convenience result type.
pub type PreviewResult<T> = Result<T, PreviewError>;
