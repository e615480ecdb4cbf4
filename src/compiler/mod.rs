//! Project compiler: turns a flat set of generated source files into a
//! single runnable HTML document for sandboxed preview.
//!
//! The compiler classifies files by extension, concatenates stylesheets and
//! scripts with per-file comment headers, prepends a minimal component
//! runtime when `.jsx`/`.tsx` files are present, and injects everything into
//! a base or user-supplied HTML document. It is purely computational: no
//! I/O, no shared state, and no throwing exit path; every failure becomes a
//! renderable error page.

pub mod assemble;
pub mod classify;
pub mod error_page;
pub mod shim;
pub mod validate;

pub use classify::{detect_project_type, Buckets};
pub use validate::validate_project_files;

use crate::types::{CompiledProject, PreviewError, PreviewResult, ProjectFile};
use assemble::{inject_script, inject_stylesheet, script_blob, stylesheet_blob, DEFAULT_DOCUMENT};

/// Default cap on the number of files a single preview accepts.
pub const DEFAULT_MAX_FILES: usize = 512;
/// Default cap on the compiled document size.
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 8 * 1024 * 1024;

/// Multi-file project compiler.
///
/// Stateless per call; the only configuration is the pair of resource caps
/// that bound the size of a preview. Callers that don't care use
/// [`ProjectCompiler::default`] or the free [`compile_project`] helper.
#[derive(Debug, Clone)]
pub struct ProjectCompiler {
    max_files: usize,
    max_output_bytes: usize,
}

impl Default for ProjectCompiler {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

impl ProjectCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler with explicit resource caps.
    pub fn with_limits(max_files: usize, max_output_bytes: usize) -> Self {
        Self {
            max_files,
            max_output_bytes,
        }
    }

    /// Compile a project into a single HTML document.
    ///
    /// Never fails to the caller: internal errors are converted into a
    /// `has_errors = true` result whose `html` is the fallback error page,
    /// so the preview surface always has something renderable.
    pub fn compile(&self, files: &[ProjectFile]) -> CompiledProject {
        match self.assemble(files) {
            Ok(html) => CompiledProject {
                html,
                has_errors: false,
                errors: Vec::new(),
            },
            Err(e) => {
                tracing::warn!("preview compilation failed: {e}");
                let errors = vec![e.to_string()];
                CompiledProject {
                    html: error_page::render_error_page(&errors),
                    has_errors: true,
                    errors,
                }
            }
        }
    }

    fn assemble(&self, files: &[ProjectFile]) -> PreviewResult<String> {
        if files.len() > self.max_files {
            return Err(PreviewError::TooManyFiles {
                count: files.len(),
                max: self.max_files,
            });
        }

        let buckets = Buckets::partition(files);
        tracing::debug!(
            "compiling project: {} html, {} css, {} js, {} components",
            buckets.html.len(),
            buckets.styles.len(),
            buckets.scripts.len(),
            buckets.components.len()
        );

        let mut document = buckets
            .base_document()
            .map(|file| file.content.clone())
            .unwrap_or_else(|| DEFAULT_DOCUMENT.to_string());

        let css = stylesheet_blob(&buckets.styles);
        let mut js = script_blob(&buckets.scripts);

        if !buckets.components.is_empty() {
            js = format!("{}\n{js}", shim::COMPONENT_RUNTIME);
            for file in &buckets.components {
                js.push_str(&format!("/* {} */\n", file.name));
                js.push_str(&file.content);
                js.push('\n');
            }
        }

        if !css.is_empty() {
            document = inject_stylesheet(&document, &css);
        }
        if !js.is_empty() {
            document = inject_script(&document, &js);
        }

        if document.len() > self.max_output_bytes {
            return Err(PreviewError::OutputTooLarge {
                bytes: document.len(),
                max: self.max_output_bytes,
            });
        }

        Ok(document)
    }
}

/// Compile with the default caps.
pub fn compile_project(files: &[ProjectFile]) -> CompiledProject {
    ProjectCompiler::default().compile(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content: &str) -> ProjectFile {
        ProjectFile::new(name, content)
    }

    #[test]
    fn test_empty_project_uses_placeholder_skeleton() {
        let compiled = compile_project(&[]);
        assert!(!compiled.has_errors);
        assert!(compiled.errors.is_empty());
        assert!(compiled.html.contains("class=\"container\""));
        assert!(compiled.html.contains("Project Preview"));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let files = vec![
            file("index.html", "<html><head></head><body></body></html>"),
            file("a.css", "body{}"),
            file("b.js", "let x = 1;"),
            file("App.jsx", "render(createElement('p', null, 'hi'), document.body);"),
        ];
        let first = compile_project(&files);
        let second = compile_project(&files);
        assert_eq!(first.html, second.html);
        assert!(!first.has_errors);
    }

    #[test]
    fn test_user_html_is_used_verbatim_as_base() {
        let files = vec![file("index.html", "<html><body><h1>mine</h1></body></html>")];
        let compiled = compile_project(&files);
        assert!(compiled.html.contains("<h1>mine</h1>"));
        assert!(!compiled.html.contains("Project Preview"));
    }

    #[test]
    fn test_shim_prepended_only_for_components() {
        let plain = compile_project(&[file("main.js", "let x = 1;")]);
        assert!(!plain.html.contains("function createElement"));

        let react = compile_project(&[file("App.jsx", "render(null, document.body);")]);
        assert!(react.html.contains("function createElement"));
        assert!(react.html.contains("function render"));
    }

    #[test]
    fn test_components_follow_plain_scripts_after_shim() {
        let files = vec![
            file("main.js", "let fromScript = 1;"),
            file("App.jsx", "let fromComponent = 2;"),
        ];
        let compiled = compile_project(&files);
        let shim_pos = compiled.html.find("function createElement").unwrap();
        let script_pos = compiled.html.find("/* main.js */").unwrap();
        let component_pos = compiled.html.find("/* App.jsx */").unwrap();
        assert!(shim_pos < script_pos);
        assert!(script_pos < component_pos);
    }

    #[test]
    fn test_too_many_files_becomes_error_page() {
        let compiler = ProjectCompiler::with_limits(1, DEFAULT_MAX_OUTPUT_BYTES);
        let files = vec![file("a.css", ""), file("b.css", "")];
        let compiled = compiler.compile(&files);
        assert!(compiled.has_errors);
        assert_eq!(compiled.errors.len(), 1);
        assert!(compiled.html.contains("Preview failed to compile"));
        assert!(compiled.html.contains("<html"));
    }

    #[test]
    fn test_oversized_output_becomes_error_page() {
        let compiler = ProjectCompiler::with_limits(DEFAULT_MAX_FILES, 64);
        let files = vec![file("big.css", &"x".repeat(256))];
        let compiled = compiler.compile(&files);
        assert!(compiled.has_errors);
        assert!(compiled.errors[0].contains("larger than"));
    }

    #[test]
    fn test_has_errors_matches_error_list() {
        let ok = compile_project(&[]);
        assert_eq!(ok.has_errors, !ok.errors.is_empty());

        let failed = ProjectCompiler::with_limits(0, 0).compile(&[file("a.css", "")]);
        assert_eq!(failed.has_errors, !failed.errors.is_empty());
    }
}
