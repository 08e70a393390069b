//! Dictionary: Brands, Name Variants and Categories
//!
//! Normalizes the extension's `brandList.json` into an in-memory model.
//! Two payload shapes are accepted:
//! - Full: `{ "categories": { "<id>": { "name", "description" } }, "brands": [...] }`
//! - Legacy: a bare array of brand records (categories derived from the ids used)
//!
//! Matching always runs against `variants`; `name` is the display/dedupe key.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, warn};

use super::error::ParseError;

/// A set of enabled category ids
pub type CategorySet = BTreeSet<String>;

// =============================================================================
// Types
// =============================================================================

/// An ethical/topical classification a brand can belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub description: String,
}

/// A tracked brand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Canonical display label, unique within a dictionary
    pub name: String,
    /// Surface forms to match, never empty once loaded
    pub variants: Vec<String>,
    /// Category ids, in dictionary order
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

impl Entity {
    /// Build an entity whose only variant is its name
    pub fn new(name: &str, categories: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            variants: vec![name.to_string()],
            categories: categories.iter().map(|c| c.to_string()).collect(),
            description: None,
            links: Vec::new(),
        }
    }

    /// Replace the variant list
    pub fn with_variants(mut self, variants: &[&str]) -> Self {
        self.variants = variants.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Length in chars of the longest variant
    pub fn longest_variant_len(&self) -> usize {
        self.variants.iter().map(|v| v.chars().count()).max().unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    #[serde(alias = "label")]
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct RawBrand {
    name: String,
    #[serde(default)]
    variants: Vec<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    links: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDictionary {
    Full {
        #[serde(default)]
        categories: BTreeMap<String, RawCategory>,
        brands: Vec<RawBrand>,
    },
    Legacy(Vec<RawBrand>),
}

// =============================================================================
// Dictionary
// =============================================================================

/// Normalized brand dictionary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    categories: Vec<Category>,
    entities: Vec<Entity>,
}

impl Dictionary {
    /// Dictionary with no brands; scanning against it is a no-op
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON payload
    pub fn load(raw: &str) -> Result<Self, ParseError> {
        let raw: RawDictionary = serde_json::from_str(raw)?;
        Self::from_raw(raw)
    }

    /// Parse an already-decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self, ParseError> {
        let raw: RawDictionary = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    /// Build directly from categories and entities, applying load normalization
    pub fn from_parts(categories: Vec<Category>, entities: Vec<Entity>) -> Result<Self, ParseError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut normalized = Vec::with_capacity(entities.len());

        for (index, entity) in entities.into_iter().enumerate() {
            let name = entity.name.trim().to_string();
            if name.is_empty() {
                return Err(ParseError::EmptyName(index));
            }
            if !seen.insert(name.clone()) {
                return Err(ParseError::DuplicateEntity(name));
            }

            let variants = normalize_variants(&name, entity.variants);
            let categories = dedupe(entity.categories);

            normalized.push(Entity {
                name,
                variants,
                categories,
                description: entity.description.filter(|d| !d.trim().is_empty()),
                links: entity.links,
            });
        }

        let dictionary = Self { categories, entities: normalized };
        dictionary.warn_unknown_categories();
        debug!(
            brands = dictionary.entities.len(),
            categories = dictionary.categories.len(),
            "dictionary loaded"
        );
        Ok(dictionary)
    }

    fn from_raw(raw: RawDictionary) -> Result<Self, ParseError> {
        let (categories, brands) = match raw {
            RawDictionary::Full { categories, brands } => {
                let categories = categories
                    .into_iter()
                    .map(|(id, c)| Category { id, label: c.name, description: c.description })
                    .collect();
                (categories, brands)
            }
            RawDictionary::Legacy(brands) => {
                // Derive categories from the ids the brands reference
                let mut ids: Vec<String> = Vec::new();
                for brand in &brands {
                    for id in &brand.categories {
                        if !ids.contains(id) {
                            ids.push(id.clone());
                        }
                    }
                }
                let categories = ids
                    .into_iter()
                    .map(|id| Category { label: id.clone(), id, description: String::new() })
                    .collect();
                (categories, brands)
            }
        };

        let entities = brands
            .into_iter()
            .map(|b| Entity {
                name: b.name,
                variants: b.variants,
                categories: b.categories,
                description: b.description,
                links: b.links,
            })
            .collect();

        Self::from_parts(categories, entities)
    }

    fn warn_unknown_categories(&self) {
        for entity in &self.entities {
            for id in &entity.categories {
                if self.category(id).is_none() {
                    warn!(brand = %entity.name, category = %id, "brand references unknown category");
                }
            }
        }
    }

    /// Entities with at least one enabled, known category.
    ///
    /// Each returned entity's `categories` is restricted to that intersection.
    pub fn entities_for(&self, enabled: &CategorySet) -> Vec<Entity> {
        if enabled.is_empty() {
            return Vec::new();
        }

        self.entities
            .iter()
            .filter_map(|entity| {
                let categories: Vec<String> = entity
                    .categories
                    .iter()
                    .filter(|c| enabled.contains(*c) && self.category(c).is_some())
                    .cloned()
                    .collect();
                if categories.is_empty() {
                    return None;
                }
                Some(Entity { categories, ..entity.clone() })
            })
            .collect()
    }

    /// Look up a category by id
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// All categories
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Every known category id (the default enabled set)
    pub fn category_ids(&self) -> CategorySet {
        self.categories.iter().map(|c| c.id.clone()).collect()
    }

    /// Look up a brand by canonical name
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// All brands
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of brands tagged with a category
    pub fn count_for_category(&self, id: &str) -> usize {
        self.entities.iter().filter(|e| e.categories.iter().any(|c| c == id)).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Trim, drop blanks, dedupe case-insensitively; fall back to `[name]`
fn normalize_variants(name: &str, variants: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(variants.len().max(1));

    for variant in variants {
        let variant = variant.trim();
        if variant.is_empty() {
            continue;
        }
        if seen.insert(variant.to_lowercase()) {
            out.push(variant.to_string());
        }
    }

    if out.is_empty() {
        out.push(name.to_string());
    }
    out
}

fn dedupe(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
