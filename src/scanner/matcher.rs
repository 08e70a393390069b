//! Matcher: longest-first, non-overlapping brand matching
//!
//! Entities are tried in order of their longest variant (longest first) so a
//! short name can never claim text inside a longer one ("Art" inside
//! "Artisan Co"). Each variant is a case-insensitive, word-bounded regex.
//! A candidate is accepted only if it does not intersect an already accepted
//! range; accepted matches are then merged back into document order.
//!
//! An Aho-Corasick automaton over the variants acts as a prefilter: when both
//! the text and every variant are ASCII, a text with no automaton hit cannot
//! contain any match and the regex pass is skipped.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

use super::dictionary::Entity;

// =============================================================================
// Types
// =============================================================================

/// An accepted occurrence inside one text fragment.
///
/// Offsets are byte offsets into the fragment and always fall on char boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub entity: String,
    pub start: usize,
    pub end: usize,
    pub matched_variant: String,
}

/// A matched run of text plus the entity that owns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedSpan {
    pub entity: String,
    /// The entity's enabled categories
    pub categories: Vec<String>,
    /// Literal text as it appears in the fragment
    pub text: String,
}

/// One piece of a fragment after matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Literal(String),
    Matched(MatchedSpan),
}

impl Segment {
    pub fn is_match(&self) -> bool {
        matches!(self, Segment::Matched(_))
    }

    /// The fragment text this segment covers
    pub fn text(&self) -> &str {
        match self {
            Segment::Literal(text) => text,
            Segment::Matched(span) => &span.text,
        }
    }
}

/// An entity found in a fragment, with its enabled categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedEntity {
    pub name: String,
    pub enabled_categories: Vec<String>,
}

/// Result of matching one fragment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub segments: Vec<Segment>,
    /// One entry per entity name, in order of first occurrence
    pub detected: Vec<DetectedEntity>,
}

impl MatchOutcome {
    pub fn has_matches(&self) -> bool {
        self.segments.iter().any(Segment::is_match)
    }

    pub fn match_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_match()).count()
    }
}

struct VariantPattern {
    variant: String,
    regex: Regex,
}

struct CompiledEntity {
    entity: Entity,
    patterns: Vec<VariantPattern>,
}

// =============================================================================
// Matcher
// =============================================================================

/// Compiled matcher over a fixed entity list
pub struct Matcher {
    entities: Vec<CompiledEntity>,
    /// Present only when every variant is ASCII
    prefilter: Option<AhoCorasick>,
}

impl Matcher {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self::with_min_variant_len(entities, 1)
    }

    /// Build a matcher ignoring variants shorter than `min_len` chars
    pub fn with_min_variant_len(mut entities: Vec<Entity>, min_len: usize) -> Self {
        // Stable: ties keep dictionary order, so the earlier entity wins
        entities.sort_by(|a, b| b.longest_variant_len().cmp(&a.longest_variant_len()));

        let mut all_variants: Vec<String> = Vec::new();
        let compiled: Vec<CompiledEntity> = entities
            .into_iter()
            .map(|entity| {
                let patterns = compile_variants(&entity, min_len);
                all_variants.extend(patterns.iter().map(|p| p.variant.clone()));
                CompiledEntity { entity, patterns }
            })
            .filter(|c| !c.patterns.is_empty())
            .collect();

        let prefilter = build_prefilter(&all_variants);

        Self { entities: compiled, prefilter }
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Accepted matches, non-overlapping and ordered by `start`
    pub fn find_matches(&self, text: &str) -> Vec<Match> {
        if text.is_empty() || self.entities.is_empty() {
            return Vec::new();
        }

        if let Some(prefilter) = &self.prefilter {
            if text.is_ascii() && !prefilter.is_match(text) {
                return Vec::new();
            }
        }

        let mut accepted: Vec<Match> = Vec::new();

        for compiled in &self.entities {
            for pattern in &compiled.patterns {
                for found in pattern.regex.find_iter(text) {
                    let (start, end) = (found.start(), found.end());
                    if start == end {
                        continue;
                    }
                    if accepted.iter().any(|m| m.start < end && start < m.end) {
                        continue;
                    }
                    accepted.push(Match {
                        entity: compiled.entity.name.clone(),
                        start,
                        end,
                        matched_variant: pattern.variant.clone(),
                    });
                }
            }
        }

        accepted.sort_by_key(|m| m.start);
        accepted
    }

    /// Split `text` into literal and matched segments
    pub fn match_text(&self, text: &str) -> MatchOutcome {
        let matches = self.find_matches(text);
        if matches.is_empty() {
            return MatchOutcome {
                segments: vec![Segment::Literal(text.to_string())],
                detected: Vec::new(),
            };
        }

        let mut segments = Vec::with_capacity(matches.len() * 2 + 1);
        let mut detected: Vec<DetectedEntity> = Vec::new();
        let mut last = 0;

        for m in &matches {
            if m.start > last {
                segments.push(Segment::Literal(text[last..m.start].to_string()));
            }

            let categories = self.categories_of(&m.entity);
            segments.push(Segment::Matched(MatchedSpan {
                entity: m.entity.clone(),
                categories: categories.clone(),
                text: text[m.start..m.end].to_string(),
            }));

            if !detected.iter().any(|d| d.name == m.entity) {
                detected.push(DetectedEntity {
                    name: m.entity.clone(),
                    enabled_categories: categories,
                });
            }

            last = m.end;
        }

        if last < text.len() {
            segments.push(Segment::Literal(text[last..].to_string()));
        }

        MatchOutcome { segments, detected }
    }

    fn categories_of(&self, name: &str) -> Vec<String> {
        self.entities
            .iter()
            .find(|c| c.entity.name == name)
            .map(|c| c.entity.categories.clone())
            .unwrap_or_default()
    }
}

/// One-shot match of `text` against `entities`
pub fn match_text(text: &str, entities: &[Entity]) -> MatchOutcome {
    Matcher::new(entities.to_vec()).match_text(text)
}

/// Longest-first, deduplicated (case-insensitively) variant regexes
fn compile_variants(entity: &Entity, min_len: usize) -> Vec<VariantPattern> {
    let mut variants: Vec<&String> = entity
        .variants
        .iter()
        .filter(|v| !v.trim().is_empty() && v.chars().count() >= min_len)
        .collect();
    variants.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let mut seen: HashSet<String> = HashSet::new();
    let mut patterns = Vec::with_capacity(variants.len());

    for variant in variants {
        if !seen.insert(variant.to_lowercase()) {
            continue;
        }
        match RegexBuilder::new(&word_bounded(variant)).case_insensitive(true).build() {
            Ok(regex) => patterns.push(VariantPattern { variant: variant.clone(), regex }),
            Err(e) => warn!(brand = %entity.name, variant = %variant, error = %e, "skipping variant"),
        }
    }

    patterns
}

/// Escaped pattern with `\b` on each side whose edge char is a word char.
///
/// `\b` next to punctuation would demand a word char on the far side, so
/// "Yahoo!" gets only a leading anchor.
fn word_bounded(variant: &str) -> String {
    let leading = variant.chars().next().is_some_and(is_word_char);
    let trailing = variant.chars().last().is_some_and(is_word_char);
    format!(
        "{}{}{}",
        if leading { r"\b" } else { "" },
        regex::escape(variant),
        if trailing { r"\b" } else { "" },
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn build_prefilter(variants: &[String]) -> Option<AhoCorasick> {
    if variants.is_empty() || !variants.iter().all(|v| v.is_ascii()) {
        return None;
    }
    AhoCorasickBuilder::new()
        .match_kind(MatchKind::Standard)
        .ascii_case_insensitive(true)
        .build(variants)
        .map_err(|e| warn!(error = %e, "prefilter build failed, scanning without it"))
        .ok()
}

// =============================================================================
// Tests
// =============================================================================
