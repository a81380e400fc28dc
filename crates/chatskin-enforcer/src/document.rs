//! The stylable target.
//!
//! A [`Document`] is whatever the enforcer paints: an in-memory tree in
//! tests and the CLI, or a live page reached through a webview. Passes are
//! written against this trait only and receive the document explicitly.

use std::sync::{Arc, Mutex};

use chatskin_common::DomError;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Elements the marker class is stripped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The document element (`<html>`).
    Root,
    Body,
}

/// One batch of child-list changes observed under the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MutationRecord {
    /// Number of element nodes added. Text-only batches report zero.
    pub added: usize,
}

impl MutationRecord {
    pub fn added(added: usize) -> Self {
        Self { added }
    }
}

/// Where observed mutations are delivered.
pub type MutationSink = mpsc::UnboundedSender<MutationRecord>;

/// Operations a pass needs from the page.
pub trait Document: Send {
    /// Whether the body exists and a pass can run.
    fn is_ready(&self) -> bool;

    /// Remove every style node carrying `id`. Returns how many were removed.
    fn remove_styles(&mut self, id: &str) -> Result<usize, DomError>;

    /// Append a new style node with `id` and text `css` to the head.
    fn append_style(&mut self, id: &str, css: &str) -> Result<(), DomError>;

    /// Number of style nodes currently carrying `id`.
    fn style_count(&self, id: &str) -> usize;

    /// Remove `class` from the anchor element. Returns whether it was present.
    fn remove_class(&mut self, anchor: Anchor, class: &str) -> Result<bool, DomError>;

    /// Set `property: value !important` inline on every element matching
    /// `selector`. Returns the number of elements touched; zero matches is
    /// not an error.
    fn set_inline_style(
        &mut self,
        selector: &str,
        property: &str,
        value: &str,
    ) -> Result<usize, DomError>;

    /// Start delivering body mutations to `sink`, replacing any previous sink.
    fn observe_mutations(&mut self, sink: MutationSink) -> Result<(), DomError>;

    /// Stop delivering mutations.
    fn disconnect(&mut self);

    /// Commit everything queued since the last flush.
    fn flush(&mut self) -> Result<(), DomError> {
        Ok(())
    }
}

/// A document shared with an observer outside the loop. Each operation
/// takes the lock for its own duration.
impl<D: Document> Document for Arc<Mutex<D>> {
    fn is_ready(&self) -> bool {
        lock(self).is_ready()
    }

    fn remove_styles(&mut self, id: &str) -> Result<usize, DomError> {
        lock(self).remove_styles(id)
    }

    fn append_style(&mut self, id: &str, css: &str) -> Result<(), DomError> {
        lock(self).append_style(id, css)
    }

    fn style_count(&self, id: &str) -> usize {
        lock(self).style_count(id)
    }

    fn remove_class(&mut self, anchor: Anchor, class: &str) -> Result<bool, DomError> {
        lock(self).remove_class(anchor, class)
    }

    fn set_inline_style(
        &mut self,
        selector: &str,
        property: &str,
        value: &str,
    ) -> Result<usize, DomError> {
        lock(self).set_inline_style(selector, property, value)
    }

    fn observe_mutations(&mut self, sink: MutationSink) -> Result<(), DomError> {
        lock(self).observe_mutations(sink)
    }

    fn disconnect(&mut self) {
        lock(self).disconnect()
    }

    fn flush(&mut self) -> Result<(), DomError> {
        lock(self).flush()
    }
}

fn lock<D>(shared: &Arc<Mutex<D>>) -> std::sync::MutexGuard<'_, D> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
