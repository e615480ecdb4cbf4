//! Document assembly: blob concatenation and tag injection.
//!
//! Injection works on literal tag positions (`</head>`, `<body`, `</body>`)
//! rather than a parsed DOM. That is deliberate: the preview contract fixes
//! where the blobs land, and malformed documents still get a best-effort
//! placement (prepend or append) instead of a parse failure.

use crate::types::ProjectFile;

/// Built-in base document used when the project ships no HTML file.
pub const DEFAULT_DOCUMENT: &str = include_str!("base_document.html");

/// Concatenate stylesheet contents in input order into one CSS blob.
///
/// Each file's contribution is prefixed with a `/* filename */` header so
/// the compiled output stays traceable back to its source file.
pub fn stylesheet_blob(styles: &[&ProjectFile]) -> String {
    let mut out = String::new();
    for file in styles {
        out.push_str(&format!("/* {} */\n", file.name));
        out.push_str(&file.content);
        out.push('\n');
    }
    out
}

/// Concatenate plain script contents in input order into one JS blob.
///
/// Same comment-header convention as [`stylesheet_blob`].
pub fn script_blob(scripts: &[&ProjectFile]) -> String {
    let mut out = String::new();
    for file in scripts {
        out.push_str(&format!("/* {} */\n", file.name));
        out.push_str(&file.content);
        out.push('\n');
    }
    out
}

/// Inject a CSS blob into the document inside a `<style>` tag.
///
/// Placement: immediately before `</head>` when present; otherwise before
/// the opening body tag, wrapped in a synthesized `<head>`; otherwise
/// prepended to the whole document.
pub fn inject_stylesheet(document: &str, css: &str) -> String {
    let tag = format!("<style>\n{css}</style>\n");
    if let Some(pos) = document.find("</head>") {
        splice(document, pos, &tag)
    } else if let Some(pos) = document.find("<body") {
        let head = format!("<head>\n{tag}</head>\n");
        splice(document, pos, &head)
    } else {
        format!("{tag}{document}")
    }
}

/// Inject a JS blob into the document inside a `<script>` tag.
///
/// Placement: immediately before `</body>` when present; otherwise appended
/// to the end of the document.
pub fn inject_script(document: &str, js: &str) -> String {
    let tag = format!("<script>\n{js}</script>\n");
    if let Some(pos) = document.find("</body>") {
        splice(document, pos, &tag)
    } else {
        format!("{document}{tag}")
    }
}

fn splice(document: &str, pos: usize, insert: &str) -> String {
    format!("{}{}{}", &document[..pos], insert, &document[pos..])
}
