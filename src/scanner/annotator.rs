//! Annotator: in-place wrapping of matches, and lossless reversal
//!
//! `apply` replaces one text node with a run of sibling nodes: literal text
//! stays text, each match becomes a marker-classed `span` holding the matched
//! text verbatim. Nodes are built structurally; no markup string is ever
//! parsed, so page text cannot inject anything.
//!
//! `revert_all` swaps every marker span back to a plain text node and
//! normalizes the touched parents, which restores the original text exactly.

use tracing::{debug, warn};

use super::config::ScannerConfig;
use super::dictionary::Dictionary;
use super::dom::DocumentTree;
use super::error::DomError;
use super::matcher::{MatchedSpan, Segment};

/// Attribute carrying the owning brand's canonical name
pub const BRAND_ATTRIBUTE: &str = "data-brand";

/// Attribute carrying the tooltip text
pub const TOOLTIP_ATTRIBUTE: &str = "data-tooltip";

/// Outcome of [`revert_all`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevertSummary {
    pub reverted: usize,
    pub failed: usize,
}

/// Builds annotation elements for one scan pass
pub struct Annotator<'a> {
    config: &'a ScannerConfig,
    dictionary: &'a Dictionary,
}

impl<'a> Annotator<'a> {
    pub fn new(config: &'a ScannerConfig, dictionary: &'a Dictionary) -> Self {
        Self { config, dictionary }
    }

    /// Replace `node` with the annotated segment run.
    ///
    /// Returns `Ok(false)` without touching the tree when nothing matched.
    pub fn apply<D: DocumentTree>(&self, doc: &mut D, node: &D::Node, segments: &[Segment]) -> Result<bool, DomError> {
        if !segments.iter().any(Segment::is_match) {
            return Ok(false);
        }

        let parent = doc.parent(node).ok_or(DomError::Detached)?;

        let mut replacements = Vec::with_capacity(segments.len());
        for segment in segments {
            let built = match segment {
                Segment::Literal(text) if text.is_empty() => continue,
                Segment::Literal(text) => doc.create_text(text)?,
                Segment::Matched(span) => self.build_annotation(doc, span)?,
            };
            replacements.push(built);
        }

        for (inserted, replacement) in replacements.iter().enumerate() {
            if let Err(e) = doc.insert_before(&parent, replacement, node) {
                discard(doc, &parent, &replacements[..inserted]);
                return Err(e);
            }
        }
        if let Err(e) = doc.remove_child(&parent, node) {
            discard(doc, &parent, &replacements);
            return Err(e);
        }

        Ok(true)
    }

    fn build_annotation<D: DocumentTree>(&self, doc: &mut D, span: &MatchedSpan) -> Result<D::Node, DomError> {
        let tooltip = self.tooltip(&span.categories);

        let element = doc.create_element("span")?;
        doc.set_attribute(&element, "class", &self.config.marker_class)?;
        doc.set_attribute(&element, TOOLTIP_ATTRIBUTE, &tooltip)?;
        doc.set_attribute(&element, "title", &tooltip)?;
        doc.set_attribute(&element, BRAND_ATTRIBUTE, &span.entity)?;

        let text = doc.create_text(&span.text)?;
        doc.append_child(&element, &text)?;

        Ok(element)
    }

    /// `⚠️ Flagged for: Labor (Poor working conditions); BDS`
    pub fn tooltip(&self, categories: &[String]) -> String {
        let parts: Vec<String> = categories
            .iter()
            .map(|id| match self.dictionary.category(id) {
                Some(c) if c.description.trim().is_empty() => c.label.clone(),
                Some(c) => format!("{} ({})", c.label, c.description.trim()),
                None => id.clone(),
            })
            .collect();
        format!("{} {}", self.config.tooltip_prefix, parts.join("; "))
    }
}

/// Undo a partial `apply`: the original node stays, the inserted run goes
fn discard<D: DocumentTree>(doc: &mut D, parent: &D::Node, inserted: &[D::Node]) {
    for node in inserted {
        if let Err(e) = doc.remove_child(parent, node) {
            warn!(error = %e, "could not remove partially inserted annotation");
        }
    }
}

/// Strip every annotation under `root` back to plain text.
///
/// Each annotation is handled on its own; one that cannot be reverted is
/// counted and logged, and the rest still revert. Safe to call repeatedly.
pub fn revert_all<D: DocumentTree>(doc: &mut D, root: &D::Node, marker_class: &str) -> RevertSummary {
    let annotations = doc.find_by_class(root, marker_class);
    let mut summary = RevertSummary::default();
    let mut parents: Vec<D::Node> = Vec::new();

    for annotation in annotations {
        match revert_one(doc, &annotation) {
            Ok(parent) => {
                summary.reverted += 1;
                if !parents.contains(&parent) {
                    parents.push(parent);
                }
            }
            Err(e) => {
                summary.failed += 1;
                warn!(error = %e, "annotation could not be reverted");
            }
        }
    }

    for parent in &parents {
        doc.normalize(parent);
    }

    if summary.reverted > 0 || summary.failed > 0 {
        debug!(reverted = summary.reverted, failed = summary.failed, "annotations reverted");
    }
    summary
}

fn revert_one<D: DocumentTree>(doc: &mut D, annotation: &D::Node) -> Result<D::Node, DomError> {
    let parent = doc.parent(annotation).ok_or(DomError::Detached)?;
    let content = doc.text_content(annotation);
    let text = doc.create_text(&content)?;
    doc.replace_child(&parent, &text, annotation)?;
    Ok(parent)
}

/// Distinct brand names currently annotated under `root`, in document order
pub fn annotated_names<D: DocumentTree>(doc: &D, root: &D::Node, marker_class: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for annotation in doc.find_by_class(root, marker_class) {
        let name = doc
            .attribute(&annotation, BRAND_ATTRIBUTE)
            .unwrap_or_else(|| doc.text_content(&annotation));
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
