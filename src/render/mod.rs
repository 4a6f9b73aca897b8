//! Nested outline rendering.
//!
//! Turns a heading tree into an HTML fragment of numbered links. Nodes with
//! children become `<details>` containers whose initial open state comes
//! from the [`ExpandState`] and the default expand level. Links and toggles
//! post messages back to the host instead of navigating on their own; see
//! [`crate::session::PanelMessage`] for the message shapes.

pub mod escape;
pub mod math;
pub mod page;

use std::collections::HashMap;

use crate::parser::HeadingNode;
use escape::{escape_html, label_markup};
use math::{MathRenderer, SourceMath};

/// Per-slug record of which collapsible entries the user opened or closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandState {
    entries: HashMap<String, bool>,
}

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded state for `slug`, if the user ever toggled it.
    pub fn get(&self, slug: &str) -> Option<bool> {
        self.entries.get(slug).copied()
    }

    pub fn set(&mut self, slug: impl Into<String>, expanded: bool) {
        self.entries.insert(slug.into(), expanded);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Render-time switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Honour recorded `true` entries in the expand state.
    pub restore_expand_state: bool,
    /// Nodes shallower than this open by default when nothing is recorded.
    pub default_expand_level: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            restore_expand_state: false,
            default_expand_level: crate::config::DEFAULT_EXPAND_LEVEL,
        }
    }
}

/// Decide whether a collapsible node starts open.
///
/// Open when restoring and the user left it open, or when it was never
/// toggled and sits above the default expand level. Closed otherwise.
pub fn initially_open(node: &HeadingNode, state: &ExpandState, options: &RenderOptions) -> bool {
    match state.get(&node.slug) {
        Some(expanded) => options.restore_expand_state && expanded,
        None => node.level < options.default_expand_level,
    }
}

/// Renders heading trees with a fixed expand state, options and math backend.
pub struct OutlineRenderer<'a, M: MathRenderer + ?Sized = SourceMath> {
    state: &'a ExpandState,
    options: RenderOptions,
    math: &'a M,
}

impl<'a, M: MathRenderer + ?Sized> OutlineRenderer<'a, M> {
    pub fn new(state: &'a ExpandState, options: RenderOptions, math: &'a M) -> Self {
        Self {
            state,
            options,
            math,
        }
    }

    /// Render a whole tree, numbering top-level entries from `1`.
    pub fn render(&self, tree: &[HeadingNode]) -> String {
        self.render_nodes(tree, "")
    }

    /// Render sibling nodes whose number labels start with `prefix`.
    ///
    /// With prefix `"2."` the siblings are labelled `2.1`, `2.2`, and so on.
    pub fn render_nodes(&self, nodes: &[HeadingNode], prefix: &str) -> String {
        let mut html = String::new();
        self.write_nodes(&mut html, nodes, prefix);
        html
    }

    fn write_nodes(&self, html: &mut String, nodes: &[HeadingNode], prefix: &str) {
        for (index, node) in nodes.iter().enumerate() {
            let number = format!("{}{}", prefix, index + 1);
            let slug = escape_html(&node.slug);
            let link = format!(
                "<a class=\"toc\" href=\"#\" onclick=\"webviewApi.postMessage({{kind: 'scrollToSlug', slug: '{slug}'}}); return false;\">{number}&nbsp;{label}</a>",
                label = label_markup(&node.text, self.math),
            );

            if node.has_children() {
                let open = if initially_open(node, self.state, &self.options) {
                    " open"
                } else {
                    ""
                };
                html.push_str(&format!(
                    "<details id=\"{slug}\" class=\"toc\" ontoggle=\"webviewApi.postMessage({{kind: 'expandChanged', slug: '{slug}', expanded: this.open}})\"{open}>\n"
                ));
                html.push_str(&format!("<summary class=\"toc\">{link}</summary>\n"));
                html.push_str("<div class=\"toc-nesting\">\n");
                self.write_nodes(html, &node.children, &format!("{}.", number));
                html.push_str("</div>\n</details>\n");
            } else {
                html.push_str(&format!("<div class=\"toc\">{link}</div>\n"));
            }
        }
    }
}

/// Wrap a rendered outline in the top-level panel container.
pub fn container(fragment: &str) -> String {
    format!("<div class=\"container\">\n{}</div>\n", fragment)
}

/// Render a tree with the fallback [`SourceMath`] backend.
///
/// # Examples
///
/// ```
/// use tocmd::parser::extract_outline;
/// use tocmd::render::{ExpandState, RenderOptions, render_outline};
///
/// let tree = extract_outline("## Intro\n### Scope").unwrap();
/// let html = render_outline(&tree, &ExpandState::new(), RenderOptions::default());
/// assert!(html.contains("1.1&nbsp;Scope"));
/// ```
pub fn render_outline(tree: &[HeadingNode], state: &ExpandState, options: RenderOptions) -> String {
    OutlineRenderer::new(state, options, &SourceMath).render(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract_outline;

    fn options(restore: bool, level: usize) -> RenderOptions {
        RenderOptions {
            restore_expand_state: restore,
            default_expand_level: level,
        }
    }

    /// Number labels in document order.
    fn labels(html: &str) -> Vec<String> {
        html.split("\">")
            .filter_map(|chunk| chunk.split_once("&nbsp;"))
            .map(|(number, _)| number.to_string())
            .collect()
    }

    /// `(slug, open)` for every `<details>` element in document order.
    fn details(html: &str) -> Vec<(String, bool)> {
        html.lines()
            .filter(|line| line.starts_with("<details "))
            .map(|line| {
                let slug = line
                    .trim_start_matches("<details id=\"")
                    .split('"')
                    .next()
                    .unwrap_or_default()
                    .to_string();
                (slug, line.ends_with(" open>"))
            })
            .collect()
    }

    #[test]
    fn test_hierarchical_numbering() {
        let tree = extract_outline("## A\n### A1\n### A2\n## B\n### B1\n### B2").unwrap();
        let html = render_outline(&tree, &ExpandState::new(), options(false, 2));
        assert_eq!(labels(&html), vec!["1", "1.1", "1.2", "2", "2.1", "2.2"]);
    }

    #[test]
    fn test_render_nodes_with_prefix() {
        let tree = extract_outline("## A\n## B").unwrap();
        let state = ExpandState::new();
        let renderer = OutlineRenderer::new(&state, options(false, 2), &SourceMath);
        assert_eq!(labels(&renderer.render_nodes(&tree, "3.")), vec!["3.1", "3.2"]);
    }

    #[test]
    fn test_leaf_is_flat_entry() {
        let tree = extract_outline("## Only").unwrap();
        let html = render_outline(&tree, &ExpandState::new(), options(false, 2));
        assert!(!html.contains("<details"));
        assert!(html.starts_with("<div class=\"toc\"><a class=\"toc\""));
        assert!(html.contains("slug: 'only'"));
    }

    #[test]
    fn test_collapsible_entry_layout() {
        let tree = extract_outline("## A\n### B").unwrap();
        let html = render_outline(&tree, &ExpandState::new(), options(false, 2));
        let lines: Vec<&str> = html.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("<details id=\"a\" class=\"toc\" ontoggle="));
        assert!(lines[0].ends_with(" open>"));
        assert!(lines[1].starts_with("<summary class=\"toc\"><a class=\"toc\""));
        assert!(lines[1].ends_with("1&nbsp;A</a></summary>"));
        assert_eq!(lines[2], "<div class=\"toc-nesting\">");
        assert!(lines[3].starts_with("<div class=\"toc\">") && lines[3].ends_with("1.1&nbsp;B</a></div>"));
        assert_eq!(&lines[4..], ["</div>", "</details>"]);
    }

    #[test]
    fn test_default_expand_boundary() {
        let tree = extract_outline("## One\n### Two\n#### Three").unwrap();
        let html = render_outline(&tree, &ExpandState::new(), options(false, 2));
        assert_eq!(
            details(&html),
            vec![("one".to_string(), true), ("two".to_string(), false)]
        );
    }

    #[test]
    fn test_recorded_state_overrides_default() {
        let tree = extract_outline("## One\n### Two\n#### Three").unwrap();
        let mut state = ExpandState::new();
        state.set("one", false);
        state.set("two", true);

        let restored = render_outline(&tree, &state, options(true, 2));
        assert_eq!(
            details(&restored),
            vec![("one".to_string(), false), ("two".to_string(), true)]
        );

        // Without restore, recorded entries only suppress the default.
        let reset = render_outline(&tree, &state, options(false, 2));
        assert_eq!(
            details(&reset),
            vec![("one".to_string(), false), ("two".to_string(), false)]
        );
    }

    #[test]
    fn test_restore_is_idempotent() {
        let tree = extract_outline("## A\n### B\n#### C\n## D\n### E").unwrap();
        let mut state = ExpandState::new();
        state.set("b", true);
        state.set("d", false);

        let first = render_outline(&tree, &state, options(true, 1));
        let second = render_outline(&tree, &state, options(true, 1));
        assert_eq!(details(&first), details(&second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_html_safety_and_math() {
        let tree = extract_outline("## <b> & \"q\" 'x' $y$").unwrap();
        assert_eq!(tree[0].slug, "b-q-x");

        let echo = |s: &str| format!("<i>{}</i>", s);
        let state = ExpandState::new();
        let html = OutlineRenderer::new(&state, options(false, 2), &echo).render(&tree);
        assert!(html.contains("1&nbsp;&lt;b&gt; &amp; &quot;q&quot; &#039;x&#039; <i>y</i>"));
        assert!(!html.contains("$y$"));
    }

    #[test]
    fn test_initially_open_policy() {
        let node = HeadingNode::new("x", 1, "x");
        let mut state = ExpandState::new();
        assert!(initially_open(&node, &state, &options(false, 2)));
        assert!(!initially_open(&node, &state, &options(false, 1)));

        state.set("x", true);
        assert!(initially_open(&node, &state, &options(true, 1)));
        assert!(!initially_open(&node, &state, &options(false, 5)));
    }
}
