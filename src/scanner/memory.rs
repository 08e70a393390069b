//! MemoryDocument: arena-backed document tree
//!
//! Node handles are indices into a flat arena. Detached nodes stay in the
//! arena with no parent; they are unreachable from the root and cost nothing
//! beyond their slot.
//!
//! Computed style is resolved from the inline `style` attribute and the
//! `hidden` attribute. `visibility` inherits from the nearest ancestor that
//! declares it, as in CSS.

use super::dom::{ComputedStyle, DocumentTree, NodeKind};
use super::error::DomError;

/// Handle to a node in a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeData {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeEntry {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory document tree rooted at a `body` element
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<NodeEntry>,
    root: NodeId,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        let body = NodeEntry {
            data: NodeData::Element { tag: "body".to_string(), attributes: Vec::new() },
            parent: None,
            children: Vec::new(),
        };
        Self { nodes: vec![body], root: NodeId(0) }
    }

    /// The `body` element
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a new element under `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.append_element_with(parent, tag, &[])
    }

    /// Append a new element with attributes under `parent`
    pub fn append_element_with(&mut self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let id = self.alloc(NodeData::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: attributes.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        });
        self.attach(parent, id);
        id
    }

    /// Append a new text node under `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.alloc(NodeData::Text(text.to_string()));
        self.attach(parent, id);
        id
    }

    /// Serialize a node and its subtree as HTML
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    /// Serialize only the children of a node
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(entry) = self.nodes.get(node.0) {
            for child in &entry.children {
                self.write_html(*child, &mut out);
            }
        }
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(entry) = self.nodes.get(node.0) else { return };
        match &entry.data {
            NodeData::Text(text) => out.push_str(&escape_text(text)),
            NodeData::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
                }
                out.push('>');
                for child in &entry.children {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeEntry { data, parent: None, children: Vec::new() });
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != child);
        }
    }

    fn exists(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    fn is_element(&self, node: NodeId) -> bool {
        matches!(self.nodes.get(node.0).map(|e| &e.data), Some(NodeData::Element { .. }))
    }

    fn position_of(&self, parent: NodeId, child: NodeId) -> Result<usize, DomError> {
        if !self.exists(parent) || !self.exists(child) {
            return Err(DomError::NotAChild);
        }
        self.nodes[parent.0]
            .children
            .iter()
            .position(|c| *c == child)
            .ok_or(DomError::NotAChild)
    }

    /// Last inline declaration of `property`, lowercased
    fn declared_style(&self, node: NodeId, property: &str) -> Option<String> {
        let style = self.attribute(&node, "style")?;
        style
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .filter(|(name, _)| name.trim().eq_ignore_ascii_case(property))
            .map(|(_, value)| value.trim().to_ascii_lowercase())
            .last()
    }
}

impl DocumentTree for MemoryDocument {
    type Node = NodeId;

    fn kind(&self, node: &NodeId) -> NodeKind {
        match self.nodes.get(node.0).map(|e| &e.data) {
            Some(NodeData::Element { .. }) => NodeKind::Element,
            Some(NodeData::Text(_)) => NodeKind::Text,
            None => NodeKind::Other,
        }
    }

    fn tag_name(&self, node: &NodeId) -> Option<String> {
        match &self.nodes.get(node.0)?.data {
            NodeData::Element { tag, .. } => Some(tag.clone()),
            NodeData::Text(_) => None,
        }
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes.get(node.0).map(|e| e.children.clone()).unwrap_or_default()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    fn text_content(&self, node: &NodeId) -> String {
        let Some(entry) = self.nodes.get(node.0) else { return String::new() };
        match &entry.data {
            NodeData::Text(text) => text.clone(),
            NodeData::Element { .. } => entry.children.iter().map(|c| self.text_content(c)).collect(),
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        match &self.nodes.get(node.0)?.data {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.clone()),
            NodeData::Text(_) => None,
        }
    }

    fn computed_style(&self, element: &NodeId) -> ComputedStyle {
        let mut style = ComputedStyle::default();

        if let Some(display) = self.declared_style(*element, "display") {
            style.display = display;
        } else if self.attribute(element, "hidden").is_some() {
            style.display = "none".to_string();
        }

        if let Some(opacity) = self.declared_style(*element, "opacity") {
            style.opacity = opacity;
        }

        // visibility inherits
        let mut current = Some(*element);
        while let Some(node) = current {
            if let Some(visibility) = self.declared_style(node, "visibility") {
                style.visibility = visibility;
                break;
            }
            current = self.parent(&node);
        }

        style
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.parent(&id);
        }
        false
    }

    fn create_text(&mut self, text: &str) -> Result<NodeId, DomError> {
        Ok(self.alloc(NodeData::Text(text.to_string())))
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        Ok(self.alloc(NodeData::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        }))
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        match self.nodes.get_mut(element.0).map(|e| &mut e.data) {
            Some(NodeData::Element { attributes, .. }) => {
                match attributes.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                    Some((_, existing)) => *existing = value.to_string(),
                    None => attributes.push((name.to_string(), value.to_string())),
                }
                Ok(())
            }
            _ => Err(DomError::NotAnElement),
        }
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        if !self.is_element(*parent) || !self.exists(*child) {
            return Err(DomError::NotAnElement);
        }
        self.attach(*parent, *child);
        Ok(())
    }

    fn insert_before(&mut self, parent: &NodeId, child: &NodeId, reference: &NodeId) -> Result<(), DomError> {
        self.position_of(*parent, *reference)?;
        if !self.exists(*child) {
            return Err(DomError::NotAChild);
        }
        self.detach(*child);
        // Position may have shifted if the child was a prior sibling
        let index = self.position_of(*parent, *reference)?;
        self.nodes[parent.0].children.insert(index, *child);
        self.nodes[child.0].parent = Some(*parent);
        Ok(())
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        let index = self.position_of(*parent, *child)?;
        self.nodes[parent.0].children.remove(index);
        self.nodes[child.0].parent = None;
        Ok(())
    }

    fn replace_child(&mut self, parent: &NodeId, new_child: &NodeId, old_child: &NodeId) -> Result<(), DomError> {
        self.position_of(*parent, *old_child)?;
        if !self.exists(*new_child) {
            return Err(DomError::NotAChild);
        }
        if new_child == old_child {
            return Ok(());
        }
        self.detach(*new_child);
        let index = self.position_of(*parent, *old_child)?;
        self.nodes[parent.0].children[index] = *new_child;
        self.nodes[new_child.0].parent = Some(*parent);
        self.nodes[old_child.0].parent = None;
        Ok(())
    }

    fn normalize(&mut self, node: &NodeId) {
        if !self.is_element(*node) {
            return;
        }

        let children = self.nodes[node.0].children.clone();
        let mut kept: Vec<NodeId> = Vec::with_capacity(children.len());

        for child in children {
            let text = match &self.nodes[child.0].data {
                NodeData::Text(text) => Some(text.clone()),
                NodeData::Element { .. } => None,
            };

            let Some(text) = text else {
                self.normalize(&child);
                kept.push(child);
                continue;
            };

            if text.is_empty() {
                self.nodes[child.0].parent = None;
                continue;
            }

            let previous_text = kept
                .last()
                .copied()
                .filter(|prev| matches!(self.nodes[prev.0].data, NodeData::Text(_)));

            match previous_text {
                Some(prev) => {
                    if let NodeData::Text(existing) = &mut self.nodes[prev.0].data {
                        existing.push_str(&text);
                    }
                    self.nodes[child.0].parent = None;
                }
                None => kept.push(child),
            }
        }

        self.nodes[node.0].children = kept;
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_and_serialize() {
        let mut doc = MemoryDocument::new();
        let p = doc.append_element_with(doc.root(), "p", &[("class", "lead")]);
        doc.append_text(p, "Fish & <chips>");

        assert_eq!(
            doc.to_html(doc.root()),
            r#"<body><p class="lead">Fish &amp; &lt;chips&gt;</p></body>"#
        );
        assert_eq!(doc.text_content(&doc.root()), "Fish & <chips>");
    }

    #[test]
    fn test_insert_before_and_remove() {
        let mut doc = MemoryDocument::new();
        let p = doc.append_element(doc.root(), "p");
        let original = doc.append_text(p, "b");

        let a = doc.create_text("a").unwrap();
        doc.insert_before(&p, &a, &original).unwrap();
        assert_eq!(doc.inner_html(p), "ab");

        doc.remove_child(&p, &original).unwrap();
        assert_eq!(doc.inner_html(p), "a");
        assert_eq!(doc.parent(&original), None);
    }

    #[test]
    fn test_insert_before_rejects_foreign_reference() {
        let mut doc = MemoryDocument::new();
        let p = doc.append_element(doc.root(), "p");
        let q = doc.append_element(doc.root(), "q");
        let stranger = doc.append_text(q, "x");
        let new = doc.create_text("y").unwrap();

        assert_eq!(doc.insert_before(&p, &new, &stranger), Err(DomError::NotAChild));
    }

    #[test]
    fn test_replace_child() {
        let mut doc = MemoryDocument::new();
        let p = doc.append_element(doc.root(), "p");
        let span = doc.append_element(p, "span");
        doc.append_text(span, "Acme");

        let text = doc.create_text("Acme").unwrap();
        doc.replace_child(&p, &text, &span).unwrap();

        assert_eq!(doc.inner_html(p), "Acme");
        assert_eq!(doc.kind(&doc.children(&p)[0]), NodeKind::Text);
        assert!(!doc.is_connected(&span));
    }

    #[test]
    fn test_normalize_merges_and_drops_empty() {
        let mut doc = MemoryDocument::new();
        let p = doc.append_element(doc.root(), "p");
        doc.append_text(p, "Hello ");
        doc.append_text(p, "");
        doc.append_text(p, "world");
        let b = doc.append_element(p, "b");
        doc.append_text(b, "x");
        doc.append_text(b, "y");
        doc.append_text(p, "!");

        doc.normalize(&doc.root());

        assert_eq!(doc.children(&p).len(), 3);
        assert_eq!(doc.children(&b).len(), 1);
        assert_eq!(doc.to_html(p), "<p>Hello world<b>xy</b>!</p>");
    }

    #[test]
    fn test_computed_style_inline_and_inherited() {
        let mut doc = MemoryDocument::new();
        let outer = doc.append_element_with(doc.root(), "div", &[("style", "visibility: hidden; color: red")]);
        let inner = doc.append_element(outer, "span");
        let shown = doc.append_element_with(outer, "span", &[("style", "visibility:visible")]);
        let gone = doc.append_element_with(doc.root(), "div", &[("hidden", "")]);
        let faded = doc.append_element_with(doc.root(), "div", &[("style", "opacity: 0")]);

        assert_eq!(doc.computed_style(&inner).visibility, "hidden");
        assert_eq!(doc.computed_style(&shown).visibility, "visible");
        assert_eq!(doc.computed_style(&gone).display, "none");
        assert!(doc.computed_style(&faded).hides_subtree());
    }

    #[test]
    fn test_find_by_class_document_order() {
        let mut doc = MemoryDocument::new();
        let p = doc.append_element(doc.root(), "p");
        let first = doc.append_element_with(p, "span", &[("class", "brand-flagged")]);
        let div = doc.append_element(doc.root(), "div");
        let second = doc.append_element_with(div, "span", &[("class", "x brand-flagged")]);
        doc.append_element_with(div, "span", &[("class", "brand")]);

        assert_eq!(doc.find_by_class(&doc.root(), "brand-flagged"), vec![first, second]);
    }
}
