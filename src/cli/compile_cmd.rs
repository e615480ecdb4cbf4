//! CLI handler for `sandcastle compile <dir>`.

use super::project_dir::read_project_dir;
use crate::compiler::{detect_project_type, Buckets, ProjectCompiler};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Run the compile command.
pub async fn run(dir: &str, output: &str, json: bool) -> Result<()> {
    let files = read_project_dir(Path::new(dir))?;
    let project_type = detect_project_type(&files);

    let compiled = ProjectCompiler::new().compile(&files);
    fs::write(output, &compiled.html)
        .with_context(|| format!("failed to write '{output}'"))?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "project_type": project_type,
                "files": files.len(),
                "output": output,
                "output_bytes": compiled.html.len(),
                "has_errors": compiled.has_errors,
                "errors": compiled.errors,
            })
        );
        return Ok(());
    }

    let buckets = Buckets::partition(&files);
    println!("  Compiled {} file(s) from {dir}\n", files.len());
    println!("    type        {}", project_type.as_str());
    println!("    html        {:>4}", buckets.html.len());
    println!("    styles      {:>4}", buckets.styles.len());
    println!("    scripts     {:>4}", buckets.scripts.len());
    println!("    components  {:>4}", buckets.components.len());
    println!();
    println!("  Wrote {} ({} bytes)", output, compiled.html.len());

    if compiled.has_errors {
        println!("\n  Compilation problems (error page written instead):");
        for error in &compiled.errors {
            println!("    - {error}");
        }
    }

    Ok(())
}
