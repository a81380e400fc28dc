//! Create-or-replace management of the single owned style node.

use chatskin_common::DomError;
use tracing::debug;

use crate::document::Document;

/// Owns the style node identified by `style_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injector {
    style_id: String,
}

impl Injector {
    pub fn new(style_id: impl Into<String>) -> Self {
        Self {
            style_id: style_id.into(),
        }
    }

    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    /// Replace every node carrying the id with one holding `css`.
    ///
    /// Afterwards exactly one node with the id exists, however many were
    /// present before (including duplicates left by other scripts).
    pub fn apply<D: Document + ?Sized>(&self, doc: &mut D, css: &str) -> Result<(), DomError> {
        let removed = doc.remove_styles(&self.style_id)?;
        doc.append_style(&self.style_id, css)?;
        debug!(style_id = %self.style_id, removed, bytes = css.len(), "Stylesheet injected");
        Ok(())
    }

    /// Remove the owned node. Returns how many nodes were removed.
    pub fn remove<D: Document + ?Sized>(&self, doc: &mut D) -> Result<usize, DomError> {
        doc.remove_styles(&self.style_id)
    }
}
