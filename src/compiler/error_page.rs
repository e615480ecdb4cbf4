//! Guaranteed-renderable error document for failed compilations.
//!
//! The preview surface must never show a blank frame or a browser-level
//! parse failure, so every failure path ends in this complete document.

/// Render the fallback error page listing each error as a list item.
pub fn render_error_page(errors: &[String]) -> String {
    let mut items = String::new();
    for error in errors {
        items.push_str(&format!("      <li>{}</li>\n", escape_html(error)));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Preview Error</title>
  <style>
    body {{
      margin: 0;
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
      background: #1a0a0a;
      color: #fecaca;
    }}
    .container {{
      max-width: 720px;
      margin: 0 auto;
      padding: 2rem;
    }}
    h1 {{ color: #f87171; font-size: 1.25rem; }}
    ul.errors {{
      background: #2a0f0f;
      border: 1px solid #7f1d1d;
      border-radius: 6px;
      padding: 1rem 1rem 1rem 2rem;
    }}
    li {{ margin: 0.25rem 0; }}
  </style>
</head>
<body>
  <div class="container">
    <h1>Preview failed to compile</h1>
    <ul class="errors">
{items}    </ul>
  </div>
</body>
</html>
"#
    )
}

/// Minimal HTML escaping for error text interpolated into the page.
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_becomes_a_list_item() {
        let errors = vec!["first problem".to_string(), "second problem".to_string()];
        let page = render_error_page(&errors);
        assert!(page.contains("<li>first problem</li>"));
        assert!(page.contains("<li>second problem</li>"));
        assert!(page.contains("<html"));
        assert!(page.contains("</body>"));
    }

    #[test]
    fn test_error_text_is_escaped() {
        let errors = vec!["<script>alert(1)</script>".to_string()];
        let page = render_error_page(&errors);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_empty_error_list_still_renders() {
        let page = render_error_page(&[]);
        assert!(page.contains("<ul class=\"errors\">"));
    }
}
