//! Advisory validation of incoming project files.

use crate::types::{ProjectFile, ValidationReport};

/// Check a project file list for problems worth reporting to the caller.
///
/// Flags an empty file list, files with empty or whitespace-only names, and
/// names shaped like paths (`..`, `/`, `\`). Purely advisory: the compiler
/// accepts these inputs regardless, and callers decide whether to block.
pub fn validate_project_files(files: &[ProjectFile]) -> ValidationReport {
    let mut errors = Vec::new();

    if files.is_empty() {
        errors.push("project contains no files".to_string());
    }

    for file in files {
        if file.name.trim().is_empty() {
            errors.push("file has an empty name".to_string());
        } else if file.name.contains("..") || file.name.contains('/') || file.name.contains('\\') {
            errors.push(format!(
                "file name '{}' looks like a path, not a plain file name",
                file.name
            ));
        }
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}
