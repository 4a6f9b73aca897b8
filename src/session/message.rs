//! Messages posted back by the rendered outline.

use serde::{Deserialize, Serialize};

/// Interaction reported by the display surface.
///
/// Serialized as `{"kind": "scrollToSlug", "slug": ".."}` or
/// `{"kind": "expandChanged", "slug": "..", "expanded": true}`, which is what
/// the hooks in the rendered markup post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PanelMessage {
    /// An outline link was activated.
    ScrollToSlug { slug: String },
    /// A collapsible entry was opened or closed.
    ExpandChanged { slug: String, expanded: bool },
}

impl PanelMessage {
    /// Parse one JSON message.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
