//! Scanner configuration
//!
//! Every field has a serde default so a host can pass a partial object (or
//! nothing at all) across the JS boundary.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::ConfigError;

/// Class carried by every annotation element
pub const DEFAULT_MARKER_CLASS: &str = "brand-flagged";

/// Tooltip lead-in shown before the category list
pub const DEFAULT_TOOLTIP_PREFIX: &str = "⚠️ Flagged for:";

/// Elements whose text never renders as page content
pub const DEFAULT_SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "head", "title", "meta", "link",
];

/// Configuration for the scanner
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScannerConfig {
    #[serde(default = "default_marker_class")]
    pub marker_class: String,
    #[serde(default = "default_tooltip_prefix")]
    pub tooltip_prefix: String,
    #[serde(default = "default_skip_tags")]
    pub skip_tags: Vec<String>,
    /// Variants shorter than this (in chars) are never matched
    #[serde(default = "default_min_variant_len")]
    pub min_variant_len: usize,
}

fn default_marker_class() -> String { DEFAULT_MARKER_CLASS.to_string() }
fn default_tooltip_prefix() -> String { DEFAULT_TOOLTIP_PREFIX.to_string() }
fn default_skip_tags() -> Vec<String> { DEFAULT_SKIP_TAGS.iter().map(|t| t.to_string()).collect() }
fn default_min_variant_len() -> usize { 1 }

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            marker_class: default_marker_class(),
            tooltip_prefix: default_tooltip_prefix(),
            skip_tags: default_skip_tags(),
            min_variant_len: default_min_variant_len(),
        }
    }
}

impl ScannerConfig {
    /// True if text under this tag never renders
    pub fn is_skipped_tag(&self, tag: &str) -> bool {
        self.skip_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Reject settings that would leave annotations unrevertable.
    ///
    /// The marker class is written into `class` and looked up by selector, so
    /// it has to be one identifier with no whitespace or selector syntax.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_plain_class_name(&self.marker_class) {
            Ok(())
        } else {
            Err(ConfigError::InvalidMarkerClass(self.marker_class.clone()))
        }
    }

    /// Same config with an invalid marker class replaced by the default
    pub fn sanitized(mut self) -> Self {
        if let Err(e) = self.validate() {
            warn!(error = %e, fallback = DEFAULT_MARKER_CLASS, "replacing marker class");
            self.marker_class = default_marker_class();
        }
        self
    }
}

/// `[A-Za-z_-][A-Za-z0-9_-]*`, not starting with `-` followed by a digit
fn is_plain_class_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == '-') {
        return false;
    }
    if first == '-' && name[1..].starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
