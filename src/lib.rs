//! # tocmd
//!
//! A table-of-contents outline builder for markdown notes.
//!
//! This library extracts the heading structure of a note into a tree with
//! unique anchor slugs, renders that tree as a numbered, collapsible HTML
//! outline, and keeps the open/closed state of outline entries alive while
//! the note is being edited.
//!
//! ## Features
//!
//! - Heading tree extraction with deduplicated slugs
//! - Hierarchical numbering (`1`, `1.1`, `1.2`, `2`, ...)
//! - Expand state that survives in-place edits and resets on note switches
//! - Pluggable math rendering for `$...$` spans in headings
//!
//! ## Example
//!
//! ```rust
//! use tocmd::{ExpandState, RenderOptions, extract_outline, render_outline};
//!
//! let markdown = r#"
//! # My note
//! ## Introduction
//! Some content here.
//!
//! ### Background
//! More details.
//!
//! ## Methodology
//! Research approach.
//! "#;
//!
//! let tree = extract_outline(markdown).unwrap();
//! assert_eq!(tree.len(), 2);
//!
//! let html = render_outline(&tree, &ExpandState::new(), RenderOptions::default());
//! assert!(html.contains("1.1&nbsp;Background"));
//! ```

/// Configuration module for persisting user preferences.
pub mod config;

/// Error types shared across the crate.
pub mod error;

/// Heading extraction from markdown bodies.
///
/// Provides the heading tree type and the slug helpers.
pub mod parser;

/// Outline rendering into HTML markup.
pub mod render;

/// Event-driven outline session for the displayed note.
///
/// Owns the last rendered tree and the expand state, and applies the
/// re-render policy for note selection, edits and settings changes.
pub mod session;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use parser::{ExtractError, HeadingNode, extract_outline};
pub use render::{ExpandState, OutlineRenderer, RenderOptions, render_outline};
pub use session::{Event, Host, Outcome, PanelMessage, Session};
