//! VisibilityFilter: which text nodes are eligible for scanning
//!
//! A text node is eligible when:
//! 1. no ancestor element is a non-rendering container (`script`, `style`, ...)
//! 2. no ancestor element is an annotation span
//! 3. its parent element's computed style renders (`display`, `visibility`, `opacity`)
//! 4. its trimmed text is non-empty
//!
//! Subtrees under skipped, annotated, `display:none` or fully transparent
//! elements are pruned rather than walked. `visibility:hidden` is not pruned
//! because descendants may set `visibility:visible` again.

use super::config::ScannerConfig;
use super::dom::{DocumentTree, NodeKind};

/// Eligibility rules, borrowed from a [`ScannerConfig`]
#[derive(Debug, Clone, Copy)]
pub struct VisibilityFilter<'c> {
    config: &'c ScannerConfig,
}

impl<'c> VisibilityFilter<'c> {
    pub fn new(config: &'c ScannerConfig) -> Self {
        Self { config }
    }

    /// Lazy pre-order walk over eligible text nodes under `root`.
    ///
    /// Each call starts a fresh walk; nothing is retained between calls.
    pub fn eligible<'d, D: DocumentTree>(&self, doc: &'d D, root: &D::Node) -> EligibleText<'d, 'c, D> {
        let stack = if self.root_is_scannable(doc, root) {
            vec![root.clone()]
        } else {
            Vec::new()
        };
        EligibleText { doc, filter: *self, stack }
    }

    /// Snapshot of every eligible text node under `root`, in document order
    pub fn collect<D: DocumentTree>(&self, doc: &D, root: &D::Node) -> Vec<D::Node> {
        self.eligible(doc, root).collect()
    }

    /// The root itself must be attached and not sit inside excluded content
    fn root_is_scannable<D: DocumentTree>(&self, doc: &D, root: &D::Node) -> bool {
        if !doc.is_connected(root) {
            return false;
        }
        let mut current = doc.parent(root);
        while let Some(ancestor) = current {
            if doc.kind(&ancestor) == NodeKind::Element && !self.admits_element(doc, &ancestor) {
                return false;
            }
            current = doc.parent(&ancestor);
        }
        true
    }

    /// Whether the walk should descend into an element at all
    fn admits_element<D: DocumentTree>(&self, doc: &D, element: &D::Node) -> bool {
        if let Some(tag) = doc.tag_name(element) {
            if self.config.is_skipped_tag(&tag) {
                return false;
            }
        }
        if doc.has_class(element, &self.config.marker_class) {
            return false;
        }
        !doc.computed_style(element).hides_subtree()
    }

    fn admits_text<D: DocumentTree>(&self, doc: &D, text: &D::Node) -> bool {
        let Some(parent) = doc.parent(text) else {
            return false;
        };
        if doc.kind(&parent) != NodeKind::Element {
            return false;
        }
        if doc.computed_style(&parent).is_hidden() {
            return false;
        }
        !doc.text_content(text).trim().is_empty()
    }
}

/// Iterator returned by [`VisibilityFilter::eligible`]
pub struct EligibleText<'d, 'c, D: DocumentTree> {
    doc: &'d D,
    filter: VisibilityFilter<'c>,
    stack: Vec<D::Node>,
}

impl<'d, 'c, D: DocumentTree> Iterator for EligibleText<'d, 'c, D> {
    type Item = D::Node;

    fn next(&mut self) -> Option<D::Node> {
        while let Some(node) = self.stack.pop() {
            match self.doc.kind(&node) {
                NodeKind::Text => {
                    if self.filter.admits_text(self.doc, &node) {
                        return Some(node);
                    }
                }
                NodeKind::Element => {
                    if self.filter.admits_element(self.doc, &node) {
                        self.stack.extend(self.doc.children(&node).into_iter().rev());
                    }
                }
                NodeKind::Other => {}
            }
        }
        None
    }
}

/// Convenience: eligible text nodes under `root` using the given configuration
pub fn collect_eligible_text<D: DocumentTree>(doc: &D, root: &D::Node, config: &ScannerConfig) -> Vec<D::Node> {
    VisibilityFilter::new(config).collect(doc, root)
}
