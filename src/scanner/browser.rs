//! BrowserDocument: `web-sys` implementation of [`DocumentTree`]
//!
//! Handles are plain `web_sys::Node` references into the live page. Computed
//! style comes from `window.getComputedStyle`, so inherited and stylesheet
//! rules are already resolved by the browser.

use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node, Window};

use super::dom::{descendants_with_class, ComputedStyle, DocumentTree, NodeKind};
use super::error::DomError;

/// The live page document
pub struct BrowserDocument {
    window: Window,
    document: Document,
}

impl BrowserDocument {
    /// Bind to the global window's document
    pub fn from_window() -> Result<Self, DomError> {
        let window = web_sys::window().ok_or_else(|| DomError::Host("no global window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| DomError::Host("window has no document".to_string()))?;
        Ok(Self { window, document })
    }

    /// `document.body`, the default scan root
    pub fn body(&self) -> Option<Node> {
        self.document.body().map(Into::into)
    }

    /// The document itself as a tree node
    pub fn document_node(&self) -> Node {
        self.document.clone().into()
    }
}

fn host_error(err: JsValue) -> DomError {
    DomError::Host(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

fn as_element(node: &Node) -> Result<&Element, DomError> {
    node.dyn_ref::<Element>().ok_or(DomError::NotAnElement)
}

impl DocumentTree for BrowserDocument {
    type Node = Node;

    fn kind(&self, node: &Node) -> NodeKind {
        match node.node_type() {
            Node::ELEMENT_NODE => NodeKind::Element,
            Node::TEXT_NODE => NodeKind::Text,
            _ => NodeKind::Other,
        }
    }

    fn tag_name(&self, node: &Node) -> Option<String> {
        node.dyn_ref::<Element>().map(|e| e.tag_name().to_ascii_lowercase())
    }

    fn children(&self, node: &Node) -> Vec<Node> {
        let list = node.child_nodes();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn parent(&self, node: &Node) -> Option<Node> {
        node.parent_node()
    }

    fn text_content(&self, node: &Node) -> String {
        node.text_content().unwrap_or_default()
    }

    fn has_class(&self, node: &Node, class: &str) -> bool {
        node.dyn_ref::<Element>()
            .map(|e| e.class_list().contains(class))
            .unwrap_or(false)
    }

    fn attribute(&self, node: &Node, name: &str) -> Option<String> {
        node.dyn_ref::<Element>()?.get_attribute(name)
    }

    fn computed_style(&self, element: &Node) -> ComputedStyle {
        let declaration = node_style(&self.window, element);
        match declaration {
            Some(decl) => ComputedStyle {
                display: decl.get_property_value("display").unwrap_or_default(),
                visibility: decl.get_property_value("visibility").unwrap_or_default(),
                opacity: decl.get_property_value("opacity").unwrap_or_default(),
            },
            None => ComputedStyle::default(),
        }
    }

    fn is_connected(&self, node: &Node) -> bool {
        node.is_connected()
    }

    fn create_text(&mut self, text: &str) -> Result<Node, DomError> {
        Ok(self.document.create_text_node(text).into())
    }

    fn create_element(&mut self, tag: &str) -> Result<Node, DomError> {
        self.document.create_element(tag).map(Into::into).map_err(host_error)
    }

    fn set_attribute(&mut self, element: &Node, name: &str, value: &str) -> Result<(), DomError> {
        as_element(element)?.set_attribute(name, value).map_err(host_error)
    }

    fn append_child(&mut self, parent: &Node, child: &Node) -> Result<(), DomError> {
        parent.append_child(child).map(|_| ()).map_err(host_error)
    }

    fn insert_before(&mut self, parent: &Node, child: &Node, reference: &Node) -> Result<(), DomError> {
        parent.insert_before(child, Some(reference)).map(|_| ()).map_err(host_error)
    }

    fn remove_child(&mut self, parent: &Node, child: &Node) -> Result<(), DomError> {
        parent.remove_child(child).map(|_| ()).map_err(host_error)
    }

    fn replace_child(&mut self, parent: &Node, new_child: &Node, old_child: &Node) -> Result<(), DomError> {
        parent.replace_child(new_child, old_child).map(|_| ()).map_err(host_error)
    }

    fn normalize(&mut self, node: &Node) {
        node.normalize();
    }

    fn find_by_class(&self, root: &Node, class: &str) -> Vec<Node> {
        let selector = format!(".{}", class);
        // querySelectorAll returns a static NodeList, safe to mutate while iterating
        let listed = if let Some(element) = root.dyn_ref::<Element>() {
            element.query_selector_all(&selector)
        } else if let Some(document) = root.dyn_ref::<Document>() {
            document.query_selector_all(&selector)
        } else {
            return descendants_with_class(self, root, class);
        };

        match listed {
            Ok(list) => (0..list.length()).filter_map(|i| list.item(i)).collect(),
            Err(e) => {
                warn!(error = ?e, selector = %selector, "querySelectorAll failed, walking the tree");
                descendants_with_class(self, root, class)
            }
        }
    }
}

fn node_style(window: &Window, node: &Node) -> Option<web_sys::CssStyleDeclaration> {
    let element = node.dyn_ref::<Element>()?;
    window.get_computed_style(element).ok().flatten()
}
