//! Markdown heading extraction.
//!
//! This module scans a document body for heading lines and rebuilds them into
//! a nested outline with unique anchor slugs. Only the small grammar needed to
//! find heading lines is understood; everything else in the body is ignored.
//!
//! The shallowest mark (`# Title`) is treated as the document title and left
//! out of the outline, so `##` headings become level 1.

pub mod slug;
pub mod utils;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use slug::{SlugCounter, slugify};
use utils::{heading_line, strip_math};

/// A heading and the sub-headings nested under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingNode {
    /// Heading text as written, after the `#` marks.
    pub text: String,
    /// Outline depth, 1 for `##` headings.
    pub level: usize,
    /// Anchor id, unique across the whole tree.
    pub slug: String,
    /// Sub-headings in document order.
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    pub fn new(text: impl Into<String>, level: usize, slug: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level,
            slug: slug.into(),
            children: Vec::new(),
        }
    }

    /// Whether this node renders as a collapsible entry.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Visit this node and all descendants in document order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a HeadingNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Reasons an extraction pass produces no outline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// A heading skips one or more intermediate levels.
    #[error(
        "heading on line {line} is at level {level} but only {open} enclosing level(s) are open"
    )]
    SkippedLevel {
        /// 1-indexed line number in the document body.
        line: usize,
        level: usize,
        open: usize,
    },
}

/// Stack of open headings along the rightmost path of the tree.
///
/// `open[i]` is the last heading inserted at depth `i`; it is still detached
/// from its parent so new children can be pushed into it. Closing a depth
/// attaches the node to the entry below it, or to `roots` at depth zero.
#[derive(Debug, Default)]
struct OutlineBuilder {
    roots: Vec<HeadingNode>,
    open: Vec<HeadingNode>,
}

impl OutlineBuilder {
    fn close_to(&mut self, depth: usize) {
        while self.open.len() > depth {
            if let Some(node) = self.open.pop() {
                match self.open.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => self.roots.push(node),
                }
            }
        }
    }

    /// Insert a node at `node.level`, which needs `level - 1` open ancestors.
    fn insert(&mut self, node: HeadingNode, line: usize) -> Result<(), ExtractError> {
        let depth = node.level - 1;
        if depth > self.open.len() {
            return Err(ExtractError::SkippedLevel {
                line,
                level: node.level,
                open: self.open.len(),
            });
        }

        self.close_to(depth);
        self.open.push(node);
        Ok(())
    }

    fn finish(mut self) -> Vec<HeadingNode> {
        self.close_to(0);
        self.roots
    }
}

/// Extract the heading outline from a document body.
///
/// Headings with a single `#` are skipped. Slugs are computed from the text
/// with math spans removed and numbered `-2`, `-3`, … on repetition.
///
/// # Errors
///
/// Returns [`ExtractError::SkippedLevel`] if any heading jumps past a level
/// with no open parent to attach to. No partial outline is returned.
///
/// # Examples
///
/// ```
/// use tocmd::parser::extract_outline;
///
/// let tree = extract_outline("# Title\n## Intro\n### Details\n## Usage").unwrap();
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree[0].slug, "intro");
/// assert_eq!(tree[0].children[0].text, "Details");
/// ```
pub fn extract_outline(body: &str) -> Result<Vec<HeadingNode>, ExtractError> {
    let mut builder = OutlineBuilder::default();
    let mut slugs = SlugCounter::new();

    for (index, line) in body.lines().enumerate() {
        let Some((marks, text)) = heading_line(line) else {
            continue;
        };
        let level = marks - 1;
        if level == 0 {
            continue;
        }

        let slug = slugs.assign(slugify(&strip_math(text)));
        let node = HeadingNode::new(text, level, slug);

        if let Err(err) = builder.insert(node, index + 1) {
            debug!("outline extraction aborted: {}", err);
            return Err(err);
        }
    }

    Ok(builder.finish())
}

/// Count every node in a tree.
pub fn count_nodes(tree: &[HeadingNode]) -> usize {
    let mut count = 0;
    for node in tree {
        node.walk(&mut |_: &HeadingNode| count += 1);
    }
    count
}
