//! DocumentTree: the seam between the scanner and a live document
//!
//! The visibility filter, annotator and controller are written against this
//! trait only. `BrowserDocument` implements it over `web-sys`;
//! `MemoryDocument` implements it over an arena for host-side use and tests.

use super::error::DomError;

/// Coarse node classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Other,
}

/// The subset of computed style the visibility filter looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: String,
    pub opacity: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: "inline".to_string(),
            visibility: "visible".to_string(),
            opacity: "1".to_string(),
        }
    }
}

impl ComputedStyle {
    /// Nothing under an element with this style can render
    pub fn hides_subtree(&self) -> bool {
        self.display.trim().eq_ignore_ascii_case("none") || is_transparent(&self.opacity)
    }

    /// Text directly inside an element with this style does not render
    pub fn is_hidden(&self) -> bool {
        let visibility = self.visibility.trim();
        self.hides_subtree()
            || visibility.eq_ignore_ascii_case("hidden")
            || visibility.eq_ignore_ascii_case("collapse")
    }
}

/// `opacity: 0` (or `0%`)
fn is_transparent(opacity: &str) -> bool {
    let opacity = opacity.trim();
    let (number, scale) = match opacity.strip_suffix('%') {
        Some(n) => (n, 100.0),
        None => (opacity, 1.0),
    };
    number.trim().parse::<f64>().map(|v| v / scale <= 0.0).unwrap_or(false)
}

/// A mutable document tree addressed through cloneable node handles
pub trait DocumentTree {
    type Node: Clone + PartialEq;

    fn kind(&self, node: &Self::Node) -> NodeKind;

    /// Lowercase tag name, `None` for non-elements
    fn tag_name(&self, node: &Self::Node) -> Option<String>;

    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Concatenated text of the node and its descendants
    fn text_content(&self, node: &Self::Node) -> String;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn computed_style(&self, element: &Self::Node) -> ComputedStyle;

    /// True if the node is attached to the document
    fn is_connected(&self, node: &Self::Node) -> bool;

    fn create_text(&mut self, text: &str) -> Result<Self::Node, DomError>;

    fn create_element(&mut self, tag: &str) -> Result<Self::Node, DomError>;

    fn set_attribute(&mut self, element: &Self::Node, name: &str, value: &str) -> Result<(), DomError>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    fn insert_before(
        &mut self,
        parent: &Self::Node,
        child: &Self::Node,
        reference: &Self::Node,
    ) -> Result<(), DomError>;

    fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    fn replace_child(
        &mut self,
        parent: &Self::Node,
        new_child: &Self::Node,
        old_child: &Self::Node,
    ) -> Result<(), DomError>;

    /// Merge adjacent text nodes and drop empty ones throughout the subtree
    fn normalize(&mut self, node: &Self::Node);

    /// Descendant elements (root excluded) carrying `class`, in document order
    fn find_by_class(&self, root: &Self::Node, class: &str) -> Vec<Self::Node> {
        descendants_with_class(self, root, class)
    }
}

/// Pre-order walk behind the default `find_by_class`
pub fn descendants_with_class<D: DocumentTree + ?Sized>(doc: &D, root: &D::Node, class: &str) -> Vec<D::Node> {
    let mut found = Vec::new();
    let mut stack: Vec<D::Node> = doc.children(root).into_iter().rev().collect();

    while let Some(node) = stack.pop() {
        if doc.kind(&node) != NodeKind::Element {
            continue;
        }
        if doc.has_class(&node, class) {
            found.push(node.clone());
        }
        stack.extend(doc.children(&node).into_iter().rev());
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(display: &str, visibility: &str, opacity: &str) -> ComputedStyle {
        ComputedStyle {
            display: display.to_string(),
            visibility: visibility.to_string(),
            opacity: opacity.to_string(),
        }
    }

    #[test]
    fn test_default_style_is_visible() {
        let s = ComputedStyle::default();
        assert!(!s.is_hidden());
        assert!(!s.hides_subtree());
    }

    #[test]
    fn test_display_none_hides_subtree() {
        let s = style("none", "visible", "1");
        assert!(s.hides_subtree());
        assert!(s.is_hidden());
    }

    #[test]
    fn test_visibility_hidden_only_hides_own_text() {
        let s = style("block", "hidden", "1");
        assert!(s.is_hidden());
        assert!(!s.hides_subtree());
        assert!(style("block", "collapse", "1").is_hidden());
    }

    #[test]
    fn test_opacity_forms() {
        assert!(style("block", "visible", "0").hides_subtree());
        assert!(style("block", "visible", "0.0").hides_subtree());
        assert!(style("block", "visible", "0%").hides_subtree());
        assert!(!style("block", "visible", "0.5").hides_subtree());
        assert!(!style("block", "visible", "").hides_subtree());
    }
}
