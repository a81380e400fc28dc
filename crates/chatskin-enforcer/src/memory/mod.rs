//! In-memory document.
//!
//! An arena tree of elements and text nodes with enough CSS behavior to
//! check what a user would actually see: selector matching, a cascade over
//! the head's style nodes and inline styles, and a mutation observer that
//! reports elements appended under the body.

mod cascade;
mod selector;


use std::collections::BTreeMap;

use chatskin_common::DomError;

use crate::document::{Anchor, Document, MutationRecord, MutationSink};

pub use cascade::Declaration;
pub use selector::{SelectorList, Specificity};

use cascade::{parse_declarations, parse_stylesheet, Precedence};

/// Properties a child takes from its parent when nothing sets them.
const INHERITED: &[&str] = &["color", "font-family"];

/// Handle to a node in a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeData {
    Element {
        tag: String,
        attrs: BTreeMap<String, String>,
        inline: Vec<Declaration>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A document tree held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    ready: bool,
    observer: Option<MutationSink>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty, loaded `<html><head></head><body></body></html>`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            ready: true,
            observer: None,
        };
        doc.root = doc.create_element("html");
        doc.head = doc.element(doc.root, "head", &[]);
        doc.body = doc.element(doc.root, "body", &[]);
        doc
    }

    /// An empty document that still reports itself as loading.
    pub fn loading() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    pub fn set_ready(&mut self) {
        self.ready = true;
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // -------------------------------------------------------------------------
    // Tree construction
    // -------------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            inline: Vec::new(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    /// Notifies the observer when an element lands under the body.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);

        if self.tag(child).is_some() && self.is_within(parent, self.body) {
            self.notify(MutationRecord::added(1));
        }
    }

    /// Create an element with attributes and append it to `parent`.
    pub fn element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let node = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attribute(node, name, value);
        }
        self.append_child(parent, node);
        node
    }

    /// Append a text node to `parent`.
    pub fn text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = self.create_text(text);
        self.append_child(parent, node);
        node
    }

    /// Detach `node` (and its subtree) from the tree.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    /// Append a host-owned style node with `css` to the head.
    pub fn add_host_stylesheet(&mut self, css: &str) -> NodeId {
        let head = self.head;
        let style = self.element(head, "style", &[]);
        self.text(style, css);
        style
    }

    // -------------------------------------------------------------------------
    // Attributes and classes
    // -------------------------------------------------------------------------

    /// Set an attribute. Setting `style` replaces the inline declarations.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attrs, inline, .. } = &mut self.nodes[node.0].data {
            let name = name.to_ascii_lowercase();
            if name == "style" {
                *inline = parse_declarations(value);
            }
            attrs.insert(name, value.to_string());
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let NodeData::Element { attrs, .. } = &mut self.nodes[node.0].data {
            attrs.remove(&name.to_ascii_lowercase());
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            NodeData::Text(_) => None,
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let list = match self.attribute(node, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attribute(node, "class", &list);
    }

    /// Remove a class token. Returns whether it was present.
    pub fn remove_class_from(&mut self, node: NodeId, class: &str) -> bool {
        if !self.has_class(node, class) {
            return false;
        }
        let remaining = self
            .attribute(node, "class")
            .unwrap_or_default()
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(node, "class", &remaining);
        true
    }

    /// The inline value of `property`, if set.
    pub fn inline_style(&self, node: NodeId, property: &str) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Element { inline, .. } => inline
                .iter()
                .find(|d| d.property == property)
                .map(|d| d.value.as_str()),
            NodeData::Text(_) => None,
        }
    }

    // -------------------------------------------------------------------------
    // Traversal
    // -------------------------------------------------------------------------

    /// Tag name, or `None` for text nodes.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn is_first_element_child(&self, node: NodeId) -> bool {
        self.parent(node).is_some_and(|parent| {
            self.children(parent)
                .iter()
                .find(|c| self.tag(**c).is_some())
                == Some(&node)
        })
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        match &self.nodes[node.0].data {
            NodeData::Text(text) => text.clone(),
            NodeData::Element { .. } => self
                .children(node)
                .iter()
                .map(|c| self.text_content(*c))
                .collect(),
        }
    }

    /// Serialized markup of `node`. Inline declarations are written as the
    /// `style` attribute.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    /// Attached elements matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .descendants(self.root)
            .into_iter()
            .filter(|n| self.tag(*n).is_some() && list.matches(self, *n))
            .collect())
    }

    /// Attached style nodes carrying `id`, with their text.
    pub fn styles(&self, id: &str) -> Vec<(NodeId, String)> {
        self.styles_with_id(id)
            .into_iter()
            .map(|n| (n, self.text_content(n)))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Cascade
    // -------------------------------------------------------------------------

    /// The value of `property` a renderer would use for `node`.
    ///
    /// Considers every attached style node in document order and the
    /// node's inline styles. `color` and `font-family` inherit.
    pub fn computed_style(&self, node: NodeId, property: &str) -> Option<String> {
        let mut best: Option<(Precedence, String)> = None;
        let mut consider = |precedence: Precedence, value: &str| {
            if best.as_ref().map_or(true, |(current, _)| precedence > *current) {
                best = Some((precedence, value.to_string()));
            }
        };

        let mut order = 0usize;
        for sheet in self.stylesheets() {
            for rule in parse_stylesheet(&self.text_content(sheet)) {
                let specificity = rule.selectors.matching_specificity(self, node);
                for declaration in &rule.declarations {
                    order += 1;
                    let Some(specificity) = specificity else {
                        continue;
                    };
                    if declaration.property == property {
                        consider(
                            Precedence {
                                important: declaration.important,
                                inline: false,
                                specificity,
                                order,
                            },
                            &declaration.value,
                        );
                    }
                }
            }
        }

        if let NodeData::Element { inline, .. } = &self.nodes[node.0].data {
            for declaration in inline.iter().filter(|d| d.property == property) {
                order += 1;
                consider(
                    Precedence {
                        important: declaration.important,
                        inline: true,
                        specificity: (0, 0, 0),
                        order,
                    },
                    &declaration.value,
                );
            }
        }

        match best {
            Some((_, value)) => Some(value),
            None if INHERITED.contains(&property) => self
                .parent(node)
                .and_then(|parent| self.computed_style(parent, property)),
            None => None,
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element { tag, attrs, inline } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs.iter().filter(|(name, _)| *name != "style") {
                    out.push_str(&format!(" {name}=\"{value}\""));
                }
                if !inline.is_empty() {
                    let style = inline
                        .iter()
                        .map(|d| {
                            let bang = if d.important { " !important" } else { "" };
                            format!("{}: {}{bang}", d.property, d.value)
                        })
                        .collect::<Vec<_>>()
                        .join("; ");
                    out.push_str(&format!(" style=\"{style}\""));
                }
                out.push('>');
                for child in &self.nodes[node.0].children {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{tag}>"));
            }
        }
    }

    fn notify(&mut self, record: MutationRecord) {
        if let Some(sink) = &self.observer {
            if sink.send(record).is_err() {
                tracing::debug!("Mutation observer receiver gone, disconnecting");
                self.observer = None;
            }
        }
    }

    /// Whether `node` is `ancestor` or lies beneath it.
    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.is_within(node, self.root)
    }

    /// `from` and everything beneath it, in document order.
    fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    fn stylesheets(&self) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|n| self.tag(*n) == Some("style"))
            .collect()
    }

    fn styles_with_id(&self, id: &str) -> Vec<NodeId> {
        self.stylesheets()
            .into_iter()
            .filter(|n| self.attribute(*n, "id") == Some(id))
            .collect()
    }
}

impl Document for MemoryDocument {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn remove_styles(&mut self, id: &str) -> Result<usize, DomError> {
        let found = self.styles_with_id(id);
        for node in &found {
            self.detach(*node);
        }
        Ok(found.len())
    }

    fn append_style(&mut self, id: &str, css: &str) -> Result<(), DomError> {
        if !self.is_attached(self.head) {
            return Err(DomError::NoHead);
        }
        let head = self.head;
        let style = self.element(head, "style", &[("id", id)]);
        self.text(style, css);
        Ok(())
    }

    fn style_count(&self, id: &str) -> usize {
        self.styles_with_id(id).len()
    }

    fn remove_class(&mut self, anchor: Anchor, class: &str) -> Result<bool, DomError> {
        let node = match anchor {
            Anchor::Root => self.root,
            Anchor::Body if self.is_attached(self.body) => self.body,
            Anchor::Body => return Err(DomError::NoBody),
        };
        Ok(self.remove_class_from(node, class))
    }

    fn set_inline_style(
        &mut self,
        selector: &str,
        property: &str,
        value: &str,
    ) -> Result<usize, DomError> {
        let targets = self.query_selector_all(selector)?;
        for node in &targets {
            if let NodeData::Element { inline, .. } = &mut self.nodes[node.0].data {
                inline.retain(|d| d.property != property);
                inline.push(Declaration::important(property, value));
            }
        }
        Ok(targets.len())
    }

    fn observe_mutations(&mut self, sink: MutationSink) -> Result<(), DomError> {
        if !self.is_attached(self.body) {
            return Err(DomError::NoBody);
        }
        self.observer = Some(sink);
        Ok(())
    }

    fn disconnect(&mut self) {
        self.observer = None;
    }
}
