//! Shared helper: load a project directory into file records.

use crate::types::ProjectFile;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Read the top-level files of `dir` as project files, sorted by name.
///
/// Sorting makes the input order (and therefore the compiled document)
/// deterministic across filesystems. Subdirectories and files that are not
/// valid UTF-8 are skipped; the compiler itself drops anything it cannot
/// classify.
pub(crate) fn read_project_dir(dir: &Path) -> Result<Vec<ProjectFile>> {
    if !dir.is_dir() {
        bail!("'{}' is not a directory", dir.display());
    }

    let mut files = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory '{}'", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match fs::read_to_string(&path) {
            Ok(content) => files.push(ProjectFile::new(name, content)),
            Err(e) => {
                tracing::debug!("skipping '{name}': {e}");
            }
        }
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_sorted_and_skips_binary() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.css"), "body{}").unwrap();
        fs::write(dir.path().join("a.html"), "<html></html>").unwrap();
        fs::write(dir.path().join("logo.bin"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let files = read_project_dir(dir.path()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.html", "b.css"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        assert!(read_project_dir(Path::new("/definitely/not/here")).is_err());
    }
}
