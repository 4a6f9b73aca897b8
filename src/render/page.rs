//! Standalone HTML page around an outline fragment.
//!
//! Hosts that embed the fragment in their own panel never need this; it exists
//! so `tocmd render --standalone` output opens directly in a browser.

/// Default panel stylesheet.
pub const STYLESHEET: &str = r#"body { font-family: sans-serif; font-size: 14px; margin: 0.5em; }
a.toc { color: inherit; text-decoration: none; }
a.toc:hover { text-decoration: underline; }
div.toc { margin: 0.15em 0; }
details.toc > summary.toc { cursor: pointer; margin: 0.15em 0; }
div.toc-nesting { margin-left: 1.2em; }
span.math { font-family: serif; font-style: italic; }
"#;

/// Browser stand-in for the host messaging API.
///
/// Scroll requests jump to the anchor, expand changes are only logged.
const HOST_SHIM: &str = r#"window.webviewApi = window.webviewApi || {
  postMessage: function (msg) {
    if (msg.kind === 'scrollToSlug') {
      window.location.hash = msg.slug;
    } else {
      console.log(JSON.stringify(msg));
    }
  }
};"#;

/// Wrap an outline fragment in a complete HTML document.
pub fn standalone_page(title: &str, fragment: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{STYLESHEET}</style>\n<script>\n{HOST_SHIM}\n</script>\n</head>\n<body>\n{fragment}</body>\n</html>\n",
        title = super::escape::escape_html(title),
    )
}
