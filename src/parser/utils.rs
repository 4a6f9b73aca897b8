//! Utility functions for markdown parsing.
//!
//! Shared helper functions used by the extractor and the renderer.

use regex::Regex;
use std::sync::OnceLock;

/// Pattern for an inline math span (`$...$`). The source is capture group 1.
pub(crate) fn math_span_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$([^$]*)\$").unwrap())
}

/// Split a line into its heading mark count and text payload.
///
/// A heading line is one or more `#` marks at the start of the line, a single
/// whitespace character, then the rest of the line. Returns `None` when the
/// line does not match or the payload is empty.
///
/// # Examples
///
/// ```
/// # use tocmd::parser::utils::heading_line;
/// assert_eq!(heading_line("## Section"), Some((2, "Section")));
/// assert_eq!(heading_line("#NoSpace"), None);
/// assert_eq!(heading_line("### "), None);
/// assert_eq!(heading_line("  ## Indented"), None);
/// ```
pub fn heading_line(line: &str) -> Option<(usize, &str)> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"^(#+)\s(.*)").unwrap());

    let caps = re.captures(line)?;
    let marks = caps.get(1)?.as_str().len();
    let text = caps.get(2)?.as_str();

    if text.is_empty() {
        None
    } else {
        Some((marks, text))
    }
}

/// Remove every `$...$` math span from text.
///
/// Slugs are computed from the stripped text so anchors stay stable while
/// the formula is being edited.
///
/// # Examples
///
/// ```
/// # use tocmd::parser::utils::strip_math;
/// assert_eq!(strip_math("Energy $E = mc^2$ relation"), "Energy  relation");
/// assert_eq!(strip_math("no math"), "no math");
/// ```
pub fn strip_math(text: &str) -> String {
    math_span_pattern().replace_all(text, "").into_owned()
}
