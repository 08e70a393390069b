//! ScanController: the on/off state machine over one document
//!
//! # States
//! `Inactive` (initial) and `Active`. Only `toggle_scan` flips between them;
//! `update_categories` keeps the current state and re-scans when active.
//!
//! # Usage
//! ```rust,ignore
//! let mut controller = ScanController::new(doc, root, ScannerConfig::default());
//! controller.initialize(Dictionary::load(raw), Preferences::default());
//! let detected = controller.toggle_scan(); // Active, page annotated
//! controller.toggle_scan();                // Inactive, page restored
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::annotator::{annotated_names, revert_all, Annotator};
use super::config::ScannerConfig;
use super::dictionary::{CategorySet, Dictionary};
use super::dom::DocumentTree;
use super::error::ParseError;
use super::matcher::{DetectedEntity, Matcher};
use super::request::{Request, Response};
use super::visibility::VisibilityFilter;

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanState {
    #[default]
    Inactive,
    Active,
}

impl ScanState {
    pub fn name(&self) -> &'static str {
        match self {
            ScanState::Inactive => "inactive",
            ScanState::Active => "active",
        }
    }
}

/// One brand in the aggregated result handed to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedBrand {
    pub name: String,
    pub enabled_categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

pub type DetectedResult = Vec<DetectedBrand>;

/// Stored preferences as the host returns them; missing fields use defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub enabled_categories: Option<Vec<String>>,
    #[serde(default)]
    pub auto_scan_enabled: Option<bool>,
}

/// Receives every result the controller emits
pub trait DetectionSink {
    fn emit(&mut self, detected: &[DetectedBrand]);
}

impl<F: FnMut(&[DetectedBrand])> DetectionSink for F {
    fn emit(&mut self, detected: &[DetectedBrand]) {
        self(detected)
    }
}

/// Brand count for one dictionary category, as the popup badges show it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub id: String,
    pub label: String,
    pub count: usize,
}

/// Counters for the most recent scan pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub nodes_scanned: usize,
    pub nodes_annotated: usize,
    pub matches: usize,
    pub elapsed_us: u64,
}

// =============================================================================
// ScanController
// =============================================================================

/// Owns scan state for one document root.
///
/// Every operation takes `&mut self`, so two passes can never interleave on
/// the same tree.
pub struct ScanController<D: DocumentTree> {
    document: D,
    root: D::Node,
    config: ScannerConfig,
    dictionary: Option<Dictionary>,
    enabled: CategorySet,
    /// Set once the host has chosen categories; until then every category is on
    categories_chosen: bool,
    auto_scan: bool,
    state: ScanState,
    detected: DetectedResult,
    last_stats: ScanStats,
    sink: Option<Box<dyn DetectionSink>>,
}

impl<D: DocumentTree> ScanController<D> {
    /// An invalid marker class is replaced by the default (see
    /// [`ScannerConfig::sanitized`]).
    pub fn new(document: D, root: D::Node, config: ScannerConfig) -> Self {
        Self {
            document,
            root,
            config: config.sanitized(),
            dictionary: None,
            enabled: CategorySet::new(),
            categories_chosen: false,
            auto_scan: false,
            state: ScanState::Inactive,
            detected: Vec::new(),
            last_stats: ScanStats::default(),
            sink: None,
        }
    }

    /// Install a dictionary.
    ///
    /// A category choice already made is kept, restricted to the categories
    /// the new dictionary knows; otherwise all of its categories are enabled.
    /// If a scan is active it is re-run against the new data.
    pub fn hydrate(&mut self, dictionary: Dictionary) {
        self.install(dictionary);
        self.rescan_if_active();
    }

    fn install(&mut self, dictionary: Dictionary) {
        let ids = dictionary.category_ids();
        self.enabled = if self.categories_chosen {
            self.enabled.intersection(&ids).cloned().collect()
        } else {
            ids
        };
        self.dictionary = Some(dictionary);
    }

    fn rescan_if_active(&mut self) {
        if self.state == ScanState::Active {
            revert_all(&mut self.document, &self.root, &self.config.marker_class);
            self.detected = self.run_scan();
            self.emit();
        }
    }

    /// Apply the results of the host's startup fetches.
    ///
    /// A failed dictionary load falls back to an empty dictionary, so scans
    /// become harmless no-ops. Returns the result of the auto-scan, if any.
    pub fn initialize(&mut self, dictionary: Result<Dictionary, ParseError>, preferences: Preferences) -> DetectedResult {
        let dictionary = dictionary.unwrap_or_else(|e| {
            warn!(error = %e, "dictionary failed to load, continuing with an empty one");
            Dictionary::empty()
        });
        self.install(dictionary);

        if let Some(categories) = preferences.enabled_categories {
            self.enabled = categories.into_iter().collect();
            self.categories_chosen = true;
        }
        self.auto_scan = preferences.auto_scan_enabled.unwrap_or(false);

        info!(
            brands = self.dictionary.as_ref().map_or(0, Dictionary::len),
            enabled = self.enabled.len(),
            auto_scan = self.auto_scan,
            "scanner initialized"
        );

        match self.state {
            ScanState::Active => {
                self.rescan_if_active();
                self.query_detected()
            }
            ScanState::Inactive if self.auto_scan => self.toggle_scan(),
            ScanState::Inactive => Vec::new(),
        }
    }

    /// Flip between `Inactive` and `Active`.
    ///
    /// Before a dictionary is loaded this does nothing and returns an empty
    /// result.
    pub fn toggle_scan(&mut self) -> DetectedResult {
        if self.dictionary.is_none() {
            debug!("toggle ignored, dictionary not loaded");
            return Vec::new();
        }

        match self.state {
            ScanState::Inactive => {
                self.detected = self.run_scan();
                self.state = ScanState::Active;
            }
            ScanState::Active => {
                revert_all(&mut self.document, &self.root, &self.config.marker_class);
                self.detected.clear();
                self.state = ScanState::Inactive;
            }
        }
        debug!(state = self.state.name(), brands = self.detected.len(), "scan toggled");

        self.emit();
        self.detected.clone()
    }

    /// Replace the enabled category set; re-scans immediately when active
    pub fn update_categories<I, S>(&mut self, categories: I) -> DetectedResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enabled = categories.into_iter().map(Into::into).collect();
        self.categories_chosen = true;
        self.rescan_if_active();
        self.query_detected()
    }

    /// The last aggregated result; empty while inactive
    pub fn query_detected(&self) -> DetectedResult {
        match self.state {
            ScanState::Active => self.detected.clone(),
            ScanState::Inactive => Vec::new(),
        }
    }

    /// Store the auto-scan preference. Takes effect at the next initialize.
    pub fn update_auto_scan(&mut self, enabled: bool) -> DetectedResult {
        self.auto_scan = enabled;
        self.query_detected()
    }

    /// Exhaustive dispatch of a host request
    pub fn handle(&mut self, request: Request) -> Response {
        let brands = match request {
            Request::Toggle => self.toggle_scan(),
            Request::UpdateCategories { categories } => self.update_categories(categories),
            Request::QueryDetected => self.query_detected(),
            Request::UpdateAutoScan { enabled } => self.update_auto_scan(enabled),
        };
        Response {
            success: true,
            active: self.state == ScanState::Active,
            brands,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// True once a dictionary (possibly empty) has been installed
    pub fn is_ready(&self) -> bool {
        self.dictionary.is_some()
    }

    pub fn enabled_categories(&self) -> &CategorySet {
        &self.enabled
    }

    pub fn auto_scan(&self) -> bool {
        self.auto_scan
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        self.dictionary.as_ref()
    }

    pub fn last_stats(&self) -> ScanStats {
        self.last_stats
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Distinct brand names annotated on the page right now, read from the tree
    pub fn annotated_brands(&self) -> Vec<String> {
        annotated_names(&self.document, &self.root, &self.config.marker_class)
    }

    /// Brands per dictionary category, in dictionary order
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let Some(dictionary) = self.dictionary.as_ref() else {
            return Vec::new();
        };
        dictionary
            .categories()
            .iter()
            .map(|c| CategoryCount {
                id: c.id.clone(),
                label: c.label.clone(),
                count: dictionary.count_for_category(&c.id),
            })
            .collect()
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn set_sink(&mut self, sink: Box<dyn DetectionSink>) {
        self.sink = Some(sink);
    }

    fn emit(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(&self.detected);
        }
    }

    /// Collect, match and annotate once; returns the aggregated result
    fn run_scan(&mut self) -> DetectedResult {
        let start = instant::Instant::now();
        let mut stats = ScanStats::default();

        let Some(dictionary) = self.dictionary.as_ref() else {
            return Vec::new();
        };

        let entities = dictionary.entities_for(&self.enabled);
        if entities.is_empty() {
            self.last_stats = stats;
            return Vec::new();
        }

        let matcher = Matcher::with_min_variant_len(entities, self.config.min_variant_len);
        let nodes = VisibilityFilter::new(&self.config).collect(&self.document, &self.root);
        let annotator = Annotator::new(&self.config, dictionary);

        let mut found: Vec<DetectedEntity> = Vec::new();
        for node in &nodes {
            stats.nodes_scanned += 1;
            let text = self.document.text_content(node);
            let outcome = matcher.match_text(&text);
            if !outcome.has_matches() {
                continue;
            }

            match annotator.apply(&mut self.document, node, &outcome.segments) {
                Ok(_) => {
                    stats.nodes_annotated += 1;
                    stats.matches += outcome.match_count();
                    merge_detected(&mut found, outcome.detected);
                }
                Err(e) => warn!(error = %e, "text node could not be annotated"),
            }
        }

        let detected: DetectedResult = found
            .into_iter()
            .map(|d| {
                let entity = dictionary.entity(&d.name);
                DetectedBrand {
                    description: entity.and_then(|e| e.description.clone()),
                    links: entity.map(|e| e.links.clone()).unwrap_or_default(),
                    name: d.name,
                    enabled_categories: d.enabled_categories,
                }
            })
            .collect();

        stats.elapsed_us = start.elapsed().as_micros() as u64;
        self.last_stats = stats;
        debug!(
            nodes = stats.nodes_scanned,
            annotated = stats.nodes_annotated,
            matches = stats.matches,
            brands = detected.len(),
            elapsed_us = stats.elapsed_us,
            "scan complete"
        );

        detected
    }
}

/// Fold one fragment's detections into the running set: by name, categories
/// unioned in first-seen order
fn merge_detected(into: &mut Vec<DetectedEntity>, from: Vec<DetectedEntity>) {
    for entity in from {
        match into.iter_mut().find(|d| d.name == entity.name) {
            Some(existing) => {
                for category in entity.enabled_categories {
                    if !existing.enabled_categories.contains(&category) {
                        existing.enabled_categories.push(category);
                    }
                }
            }
            None => into.push(entity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::dictionary::{Category, Entity};
    use crate::scanner::memory::{MemoryDocument, NodeId};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn category(id: &str) -> Category {
        Category { id: id.into(), label: id.into(), description: String::new() }
    }

    fn dictionary() -> Dictionary {
        Dictionary::from_parts(
            vec![category("Labor"), category("Environmental")],
            vec![
                Entity::new("Acme", &["Environmental", "Labor"]),
                Entity::new("Globex", &["Environmental"]),
            ],
        )
        .unwrap()
    }

    fn page() -> (MemoryDocument, NodeId) {
        let mut doc = MemoryDocument::new();
        let p = doc.append_element(doc.root(), "p");
        doc.append_text(p, "Acme and Globex sell things. acme again.");
        let root = doc.root();
        (doc, root)
    }

    fn controller() -> ScanController<MemoryDocument> {
        let (doc, root) = page();
        let mut controller = ScanController::new(doc, root, ScannerConfig::default());
        controller.hydrate(dictionary());
        controller
    }

    #[test]
    fn test_toggle_before_dictionary_is_noop() {
        let (doc, root) = page();
        let before = doc.to_html(root);
        let mut controller = ScanController::new(doc, root, ScannerConfig::default());

        assert!(controller.toggle_scan().is_empty());
        assert_eq!(controller.state(), ScanState::Inactive);
        assert!(!controller.is_ready());
        assert_eq!(controller.document().to_html(root), before);
    }

    #[test]
    fn test_toggle_on_annotates_and_aggregates() {
        let mut controller = controller();
        let detected = controller.toggle_scan();

        assert_eq!(controller.state(), ScanState::Active);
        let names: Vec<&str> = detected.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Globex"]);
        assert_eq!(detected[0].enabled_categories, vec!["Environmental", "Labor"]);

        let stats = controller.last_stats();
        assert_eq!(stats.nodes_scanned, 1);
        assert_eq!(stats.nodes_annotated, 1);
        assert_eq!(stats.matches, 3);
    }

    #[test]
    fn test_toggle_symmetry() {
        let mut controller = controller();
        let root = controller.document().root();
        let before = controller.document().to_html(root);

        controller.toggle_scan();
        assert_ne!(controller.document().to_html(root), before);

        let detected = controller.toggle_scan();
        assert!(detected.is_empty());
        assert_eq!(controller.state(), ScanState::Inactive);
        assert_eq!(controller.document().to_html(root), before);
    }

    #[test]
    fn test_empty_categories_is_noop() {
        let mut controller = controller();
        controller.update_categories(Vec::<String>::new());
        let root = controller.document().root();
        let before = controller.document().to_html(root);

        assert!(controller.toggle_scan().is_empty());
        assert_eq!(controller.state(), ScanState::Active);
        assert_eq!(controller.document().to_html(root), before);
    }

    #[test]
    fn test_category_filtering() {
        let mut controller = controller();
        controller.update_categories(["Labor"]);
        let detected = controller.toggle_scan();

        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].name, "Acme");
        assert_eq!(detected[0].enabled_categories, vec!["Labor"]);
    }

    #[test]
    fn test_update_categories_while_active_rescans() {
        let mut controller = controller();
        controller.toggle_scan();

        let detected = controller.update_categories(["Labor"]);
        assert_eq!(controller.state(), ScanState::Active);
        assert_eq!(detected.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(), vec!["Acme"]);

        let root = controller.document().root();
        let html = controller.document().to_html(root);
        assert!(!html.contains("data-brand=\"Globex\""));
        assert_eq!(html.matches("data-brand=\"Acme\"").count(), 2);
    }

    #[test]
    fn test_update_categories_while_inactive_only_stores() {
        let mut controller = controller();
        let root = controller.document().root();
        let before = controller.document().to_html(root);

        assert!(controller.update_categories(["Labor"]).is_empty());
        assert_eq!(controller.state(), ScanState::Inactive);
        assert_eq!(controller.document().to_html(root), before);
        assert!(controller.enabled_categories().contains("Labor"));
        assert_eq!(controller.enabled_categories().len(), 1);
    }

    #[test]
    fn test_query_detected_is_read_only() {
        let mut controller = controller();
        assert!(controller.query_detected().is_empty());

        let detected = controller.toggle_scan();
        let root = controller.document().root();
        let html = controller.document().to_html(root);

        assert_eq!(controller.query_detected(), detected);
        assert_eq!(controller.query_detected(), detected);
        assert_eq!(controller.document().to_html(root), html);
    }

    #[test]
    fn test_initialize_defaults_and_auto_scan() {
        let (doc, root) = page();
        let mut controller = ScanController::new(doc, root, ScannerConfig::default());
        let detected = controller.initialize(
            Ok(dictionary()),
            Preferences { enabled_categories: None, auto_scan_enabled: Some(true) },
        );

        assert_eq!(controller.state(), ScanState::Active);
        assert_eq!(detected.len(), 2);
        assert_eq!(controller.enabled_categories().len(), 2);
        assert!(controller.auto_scan());
    }

    #[test]
    fn test_initialize_without_auto_scan_stays_inactive() {
        let (doc, root) = page();
        let mut controller = ScanController::new(doc, root, ScannerConfig::default());
        let detected = controller.initialize(
            Ok(dictionary()),
            Preferences { enabled_categories: Some(vec!["Labor".into()]), auto_scan_enabled: None },
        );

        assert!(detected.is_empty());
        assert_eq!(controller.state(), ScanState::Inactive);
        assert!(!controller.auto_scan());
        assert_eq!(controller.enabled_categories().iter().collect::<Vec<_>>(), vec!["Labor"]);
    }

    #[test]
    fn test_initialize_with_load_failure_falls_back_to_empty() {
        let (doc, root) = page();
        let before = doc.to_html(root);
        let mut controller = ScanController::new(doc, root, ScannerConfig::default());
        controller.initialize(Dictionary::load("{ not json"), Preferences::default());

        assert!(controller.is_ready());
        assert!(controller.toggle_scan().is_empty());
        assert_eq!(controller.state(), ScanState::Active);
        assert_eq!(controller.document().to_html(root), before);
    }

    #[test]
    fn test_detected_enriched_from_dictionary() {
        let (doc, root) = page();
        let mut controller = ScanController::new(doc, root, ScannerConfig::default());
        let mut acme = Entity::new("Acme", &["Labor"]);
        acme.description = Some("Subsidiary of Acme Holdings".into());
        acme.links = vec!["https://example.org/acme".into()];
        controller.hydrate(Dictionary::from_parts(vec![category("Labor")], vec![acme]).unwrap());

        let detected = controller.toggle_scan();
        assert_eq!(
            detected,
            vec![DetectedBrand {
                name: "Acme".into(),
                enabled_categories: vec!["Labor".into()],
                description: Some("Subsidiary of Acme Holdings".into()),
                links: vec!["https://example.org/acme".into()],
            }]
        );
    }

    #[test]
    fn test_sink_receives_every_emission() {
        let mut controller = controller();
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        controller.set_sink(Box::new(move |detected: &[DetectedBrand]| log.borrow_mut().push(detected.len())));

        controller.toggle_scan();
        controller.update_categories(["Labor"]);
        controller.query_detected();
        controller.toggle_scan();

        assert_eq!(*seen.borrow(), vec![2, 1, 0]);
    }

    #[test]
    fn test_handle_dispatch() {
        let mut controller = controller();

        let response = controller.handle(Request::Toggle);
        assert!(response.success);
        assert!(response.active);
        assert_eq!(response.brands.len(), 2);

        let response = controller.handle(Request::QueryDetected);
        assert_eq!(response.brands.len(), 2);

        let response = controller.handle(Request::UpdateCategories { categories: vec!["Environmental".into()] });
        assert_eq!(response.brands.len(), 2);

        let response = controller.handle(Request::UpdateAutoScan { enabled: true });
        assert!(response.active);
        assert!(controller.auto_scan());

        let response = controller.handle(Request::Toggle);
        assert!(!response.active);
        assert!(response.brands.is_empty());
    }

    #[test]
    fn test_rehydrate_while_active_rescans() {
        let mut controller = controller();
        controller.toggle_scan();

        let replacement =
            Dictionary::from_parts(vec![category("Labor")], vec![Entity::new("Globex", &["Labor"])]).unwrap();
        controller.hydrate(replacement);

        let names: Vec<String> = controller.query_detected().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Globex"]);
        let root = controller.document().root();
        assert!(!controller.document().to_html(root).contains("data-brand=\"Acme\""));
    }

    #[test]
    fn test_preferences_deserialize_camel_case() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"enabledCategories": ["Labor"], "autoScanEnabled": true}"#).unwrap();
        assert_eq!(prefs.enabled_categories, Some(vec!["Labor".to_string()]));
        assert_eq!(prefs.auto_scan_enabled, Some(true));

        let empty: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Preferences::default());
    }

    #[test]
    fn test_reinitialize_while_active_applies_preferences() {
        let (doc, root) = page();
        let mut controller = ScanController::new(doc, root, ScannerConfig::default());
        let labor_only = || Preferences { enabled_categories: Some(vec!["Labor".into()]), auto_scan_enabled: None };

        controller.initialize(Ok(dictionary()), labor_only());
        controller.toggle_scan();
        let detected = controller.initialize(Ok(dictionary()), labor_only());

        assert_eq!(controller.state(), ScanState::Active);
        assert_eq!(controller.enabled_categories().iter().collect::<Vec<_>>(), vec!["Labor"]);
        assert_eq!(
            detected.iter().map(|d| (d.name.as_str(), d.enabled_categories.clone())).collect::<Vec<_>>(),
            vec![("Acme", vec!["Labor".to_string()])]
        );
        assert_eq!(controller.query_detected(), detected);
        assert!(!controller.document().to_html(root).contains("data-brand=\"Globex\""));
    }

    #[test]
    fn test_rehydrate_keeps_chosen_categories() {
        let mut controller = controller();
        controller.update_categories(["Labor"]);
        controller.toggle_scan();

        controller.hydrate(dictionary());

        assert_eq!(controller.enabled_categories().iter().collect::<Vec<_>>(), vec!["Labor"]);
        let names: Vec<String> = controller.query_detected().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Acme"]);
    }

    #[test]
    fn test_rehydrate_drops_categories_the_dictionary_lacks() {
        let mut controller = controller();
        controller.update_categories(["Labor", "Environmental"]);

        let replacement =
            Dictionary::from_parts(vec![category("Labor")], vec![Entity::new("Globex", &["Labor"])]).unwrap();
        controller.hydrate(replacement);

        assert_eq!(controller.enabled_categories().iter().collect::<Vec<_>>(), vec!["Labor"]);
    }

    #[test]
    fn test_marker_class_with_whitespace_still_reverts() {
        let (doc, root) = page();
        let before = doc.to_html(root);
        let config = ScannerConfig { marker_class: "brand flagged".into(), ..ScannerConfig::default() };
        let mut controller = ScanController::new(doc, root, config);
        controller.hydrate(dictionary());

        assert_eq!(controller.config().marker_class, "brand-flagged");
        assert_eq!(controller.toggle_scan().len(), 2);
        controller.toggle_scan();

        assert_eq!(controller.document().to_html(root), before);
    }

    #[test]
    fn test_annotated_brands_follow_the_page() {
        let mut controller = controller();
        assert!(controller.annotated_brands().is_empty());

        controller.toggle_scan();
        assert_eq!(controller.annotated_brands(), vec!["Acme", "Globex"]);

        controller.toggle_scan();
        assert!(controller.annotated_brands().is_empty());
    }

    #[test]
    fn test_category_counts() {
        let (doc, root) = page();
        let empty = ScanController::new(doc, root, ScannerConfig::default());
        assert!(empty.category_counts().is_empty());

        let counts = controller().category_counts();
        assert_eq!(
            counts,
            vec![
                CategoryCount { id: "Labor".into(), label: "Labor".into(), count: 1 },
                CategoryCount { id: "Environmental".into(), label: "Environmental".into(), count: 2 },
            ]
        );
    }
}
