//! CLI handler for `sandcastle inspect <dir>`.

use super::project_dir::read_project_dir;
use crate::compiler::{detect_project_type, validate_project_files, Buckets};
use anyhow::Result;
use std::path::Path;

/// Run the inspect command: validation and classification, no output file.
pub async fn run(dir: &str, json: bool) -> Result<()> {
    let files = read_project_dir(Path::new(dir))?;
    let project_type = detect_project_type(&files);
    let report = validate_project_files(&files);
    let buckets = Buckets::partition(&files);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "project_type": project_type,
                "files": files.len(),
                "buckets": {
                    "html": buckets.html.len(),
                    "styles": buckets.styles.len(),
                    "scripts": buckets.scripts.len(),
                    "components": buckets.components.len(),
                },
                "is_valid": report.is_valid,
                "errors": report.errors,
            })
        );
        return Ok(());
    }

    println!("  Inspected {} file(s) in {dir}\n", files.len());
    println!("    type        {}", project_type.as_str());
    println!("    html        {:>4}", buckets.html.len());
    println!("    styles      {:>4}", buckets.styles.len());
    println!("    scripts     {:>4}", buckets.scripts.len());
    println!("    components  {:>4}", buckets.components.len());
    println!();

    if report.is_valid {
        println!("  No problems found");
    } else {
        println!("  Problems:");
        for error in &report.errors {
            println!("    - {error}");
        }
    }

    Ok(())
}
