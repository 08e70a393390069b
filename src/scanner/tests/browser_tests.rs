//! Tests for the live-DOM tree, run with `wasm-pack test --headless --chrome`

use wasm_bindgen_test::*;
use web_sys::Node;

use crate::scanner::browser::BrowserDocument;
use crate::scanner::config::ScannerConfig;
use crate::scanner::controller::{ScanController, ScanState};
use crate::scanner::dictionary::{Category, Dictionary, Entity};
use crate::scanner::dom::DocumentTree;
use crate::scanner::visibility::collect_eligible_text;
use crate::scanner::wasm::BrandScanner;

wasm_bindgen_test_configure!(run_in_browser);

/// Fresh `<div>` attached to `document.body`
fn fixture(doc: &mut BrowserDocument) -> Node {
    let body = doc.body().unwrap();
    let container = doc.create_element("div").unwrap();
    doc.append_child(&body, &container).unwrap();
    container
}

fn paragraph(doc: &mut BrowserDocument, parent: &Node, text: &str, style: Option<&str>) -> Node {
    let p = doc.create_element("p").unwrap();
    if let Some(style) = style {
        doc.set_attribute(&p, "style", style).unwrap();
    }
    let t = doc.create_text(text).unwrap();
    doc.append_child(&p, &t).unwrap();
    doc.append_child(parent, &p).unwrap();
    p
}

fn dictionary() -> Dictionary {
    Dictionary::from_parts(
        vec![Category { id: "Labor".into(), label: "Labor".into(), description: String::new() }],
        vec![Entity::new("Acme", &["Labor"])],
    )
    .unwrap()
}

#[wasm_bindgen_test]
fn test_browser_visibility_uses_computed_style() {
    let mut doc = BrowserDocument::from_window().unwrap();
    let root = fixture(&mut doc);
    paragraph(&mut doc, &root, "shown", None);
    paragraph(&mut doc, &root, "gone", Some("display: none"));
    paragraph(&mut doc, &root, "invisible", Some("visibility: hidden"));

    let config = ScannerConfig::default();
    let texts: Vec<String> = collect_eligible_text(&doc, &root, &config)
        .iter()
        .map(|n| doc.text_content(n))
        .collect();

    assert_eq!(texts, vec!["shown"]);
}

#[wasm_bindgen_test]
fn test_browser_toggle_round_trip() {
    let mut doc = BrowserDocument::from_window().unwrap();
    let root = fixture(&mut doc);
    let p = paragraph(&mut doc, &root, "Buy Acme today", None);

    let mut controller = ScanController::new(doc, root.clone(), ScannerConfig::default());
    controller.hydrate(dictionary());

    let detected = controller.toggle_scan();
    assert_eq!(detected.len(), 1);
    assert_eq!(controller.document().find_by_class(&root, "brand-flagged").len(), 1);
    assert_eq!(p.child_nodes().length(), 3);

    controller.toggle_scan();
    assert_eq!(controller.state(), ScanState::Inactive);
    assert!(controller.document().find_by_class(&root, "brand-flagged").is_empty());
    assert_eq!(p.child_nodes().length(), 1);
    assert_eq!(p.text_content().unwrap_or_default(), "Buy Acme today");
}

#[wasm_bindgen_test]
fn test_browser_find_by_class_from_document_root() {
    let mut doc = BrowserDocument::from_window().unwrap();
    let root = fixture(&mut doc);
    let p = paragraph(&mut doc, &root, "", None);
    doc.set_attribute(&p, "class", "doc-root-marker").unwrap();

    let document = doc.document_node();
    let found = doc.find_by_class(&document, "doc-root-marker");

    assert_eq!(found.len(), 1);
    assert!(found[0].is_same_node(Some(&p)));
}

#[wasm_bindgen_test]
fn test_scanner_rejects_unusable_marker_class() {
    let config = ScannerConfig { marker_class: "brand flagged".into(), ..ScannerConfig::default() };
    let value = serde_wasm_bindgen::to_value(&config).unwrap();

    assert!(BrandScanner::new(value).is_err());
    assert!(BrandScanner::new(wasm_bindgen::JsValue::UNDEFINED).is_ok());
}
