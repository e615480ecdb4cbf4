//! Component runtime shim: a tiny DOM-building stand-in for component files.
//!
//! Component files (`.jsx`/`.tsx`) are expected to call this runtime's
//! `createElement`/`render` globals directly. There is no JSX-to-call
//! transform, and no support for fragments, keys, refs, or nested function
//! components. That is a design boundary, not a gap: the shim exists to make
//! simple generated snippets executable in preview, not to run real apps.

/// JavaScript prepended to the script blob when component files are present.
pub const COMPONENT_RUNTIME: &str = r#"/* component runtime */
function createElement(type, props, ...children) {
  const element = document.createElement(type);
  if (props) {
    for (const [key, value] of Object.entries(props)) {
      if (key === 'className') {
        element.className = value;
      } else if (key.startsWith('on') && typeof value === 'function') {
        element.addEventListener(key.slice(2).toLowerCase(), value);
      } else {
        element.setAttribute(key, value);
      }
    }
  }
  for (const child of children) {
    if (typeof child === 'string') {
      element.appendChild(document.createTextNode(child));
    } else if (child) {
      element.appendChild(child);
    }
  }
  return element;
}

function render(element, container) {
  container.innerHTML = '';
  container.appendChild(element);
}
"#;
