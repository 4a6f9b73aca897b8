//! Math span rendering.
//!
//! The outline does not typeset math itself. A [`MathRenderer`] receives the
//! source between `$` delimiters and returns markup to splice into the
//! heading label.

use super::escape::escape_html;

/// Converts a math source string into display markup.
///
/// Implementations must tolerate malformed input: a bad formula degrades to
/// best-effort output (usually the escaped source), it never aborts the
/// outline render.
pub trait MathRenderer {
    fn render(&self, source: &str) -> String;
}

impl<F> MathRenderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, source: &str) -> String {
        self(source)
    }
}

/// Fallback renderer that shows the escaped source in a `math` span.
///
/// Lets a stylesheet or a client-side typesetter pick the formula up later.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceMath;

impl MathRenderer for SourceMath {
    fn render(&self, source: &str) -> String {
        format!("<span class=\"math\">{}</span>", escape_html(source))
    }
}
