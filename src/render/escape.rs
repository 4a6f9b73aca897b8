//! HTML escaping for heading labels.

use super::math::MathRenderer;
use crate::parser::utils::math_span_pattern;

/// Escape the five HTML-significant characters.
///
/// # Examples
///
/// ```
/// # use tocmd::render::escape::escape_html;
/// assert_eq!(escape_html("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
/// assert_eq!(escape_html("Tom & Jerry's"), "Tom &amp; Jerry&#039;s");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape heading text for display, replacing each `$...$` span with the
/// output of `math`.
///
/// Plain segments are escaped; math markup is inserted as returned so it is
/// never escaped a second time. The renderer sees the original source.
pub fn label_markup<M: MathRenderer + ?Sized>(text: &str, math: &M) -> String {
    let mut markup = String::with_capacity(text.len());
    let mut last_end = 0;

    for caps in math_span_pattern().captures_iter(text) {
        let (Some(whole), Some(source)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        markup.push_str(&escape_html(&text[last_end..whole.start()]));
        markup.push_str(&math.render(source.as_str()));
        last_end = whole.end();
    }
    markup.push_str(&escape_html(&text[last_end..]));

    markup
}
