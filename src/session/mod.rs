//! Outline session for the currently displayed note.
//!
//! A [`Session`] owns the last rendered heading tree and the expand state, and
//! changes them only through [`Session::handle`]. Hosts deliver note and
//! settings events plus panel messages there, one at a time, and receive the
//! resulting markup and scroll requests through the [`Host`] trait.

mod message;
pub mod watcher;

pub use message::PanelMessage;
pub use watcher::NoteWatcher;

use log::{debug, trace};

use crate::config::{Config, validate_expand_level};
use crate::error::Result;
use crate::parser::{HeadingNode, count_nodes, extract_outline};
use crate::render::math::{MathRenderer, SourceMath};
use crate::render::{ExpandState, OutlineRenderer, RenderOptions, container};

/// Display surface the session talks to.
pub trait Host {
    /// Show the full outline markup, replacing whatever was shown before.
    fn display(&mut self, markup: &str) -> Result<()>;

    /// Scroll the note view to the heading with `slug`.
    fn scroll_to_slug(&mut self, slug: &str) -> Result<()>;
}

/// Inbound events, processed strictly in delivery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A different note became the displayed one.
    NoteSelected { body: String },
    /// The displayed note was edited in place.
    NoteChanged { body: String },
    /// The default expand level setting changed.
    SettingsChanged { default_expand_level: i64 },
    /// The rendered outline reported an interaction.
    Panel(PanelMessage),
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// New markup was sent to the host.
    Rendered,
    /// The outline is structurally identical; nothing was sent.
    Unchanged,
    /// The body has a malformed heading structure; the previous outline stays.
    ExtractionFailed,
    /// A settings change arrived before any note was delivered.
    NoDocument,
    /// A scroll request was passed to the host.
    Forwarded,
    /// An expand/collapse change was stored.
    Recorded,
}

/// How an update treats the previous render.
#[derive(Debug, Clone, Copy)]
struct UpdateMode {
    force: bool,
    restore_expand_state: bool,
}

pub struct Session<M: MathRenderer = SourceMath> {
    body: Option<String>,
    tree: Option<Vec<HeadingNode>>,
    expand_state: ExpandState,
    default_expand_level: usize,
    math: M,
}

impl Session<SourceMath> {
    pub fn new(default_expand_level: usize) -> Self {
        Self::with_math(default_expand_level, SourceMath)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.expand_level())
    }
}

impl<M: MathRenderer> Session<M> {
    pub fn with_math(default_expand_level: usize, math: M) -> Self {
        Self {
            body: None,
            tree: None,
            expand_state: ExpandState::new(),
            default_expand_level,
            math,
        }
    }

    /// Outline shown by the last render, if any.
    pub fn tree(&self) -> Option<&[HeadingNode]> {
        self.tree.as_deref()
    }

    pub fn expand_state(&self) -> &ExpandState {
        &self.expand_state
    }

    pub fn default_expand_level(&self) -> usize {
        self.default_expand_level
    }

    /// Apply one event. This is the only place session state changes.
    pub fn handle<H: Host + ?Sized>(&mut self, event: Event, host: &mut H) -> Result<Outcome> {
        match event {
            Event::NoteSelected { body } => {
                self.body = Some(body);
                self.update(
                    host,
                    UpdateMode {
                        force: false,
                        restore_expand_state: false,
                    },
                )
            }
            Event::NoteChanged { body } => {
                self.body = Some(body);
                self.update(
                    host,
                    UpdateMode {
                        force: false,
                        restore_expand_state: true,
                    },
                )
            }
            Event::SettingsChanged {
                default_expand_level,
            } => {
                self.default_expand_level = validate_expand_level(default_expand_level);
                self.update(
                    host,
                    UpdateMode {
                        force: true,
                        restore_expand_state: false,
                    },
                )
            }
            Event::Panel(PanelMessage::ScrollToSlug { slug }) => {
                trace!("scroll to {}", slug);
                host.scroll_to_slug(&slug)?;
                Ok(Outcome::Forwarded)
            }
            Event::Panel(PanelMessage::ExpandChanged { slug, expanded }) => {
                trace!("{} expanded = {}", slug, expanded);
                self.expand_state.set(slug, expanded);
                Ok(Outcome::Recorded)
            }
        }
    }

    fn update<H: Host + ?Sized>(&mut self, host: &mut H, mode: UpdateMode) -> Result<Outcome> {
        let Some(body) = self.body.as_deref() else {
            return Ok(Outcome::NoDocument);
        };

        let tree = match extract_outline(body) {
            Ok(tree) => tree,
            Err(e) => {
                debug!("keeping previous outline: {}", e);
                return Ok(Outcome::ExtractionFailed);
            }
        };

        if !mode.force && self.tree.as_ref() == Some(&tree) {
            debug!("outline unchanged, skipping render");
            return Ok(Outcome::Unchanged);
        }

        if !mode.restore_expand_state {
            self.expand_state.clear();
        }

        let options = RenderOptions {
            restore_expand_state: mode.restore_expand_state,
            default_expand_level: self.default_expand_level,
        };
        let fragment =
            OutlineRenderer::new(&self.expand_state, options, &self.math).render(&tree);
        debug!(
            "rendered {} outline entries (restore = {})",
            count_nodes(&tree),
            mode.restore_expand_state
        );
        self.tree = Some(tree);

        host.display(&container(&fragment))?;
        Ok(Outcome::Rendered)
    }
}
