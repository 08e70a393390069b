//! Request/Response: messages exchanged with the extension popup
//!
//! The wire tag is the `type` field the popup already sends
//! (`toggle_highlighting`, `update_categories`, `get_detected_brands`,
//! `update_auto_scan`). Short aliases are accepted for other hosts.

use serde::{Deserialize, Serialize};

use super::controller::DetectedBrand;

/// A request to the scan controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "toggle_highlighting", alias = "toggle")]
    Toggle,
    #[serde(rename = "update_categories")]
    UpdateCategories { categories: Vec<String> },
    #[serde(rename = "get_detected_brands", alias = "query_detected")]
    QueryDetected,
    #[serde(rename = "update_auto_scan")]
    UpdateAutoScan { enabled: bool },
}

/// Reply to any [`Request`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub success: bool,
    /// True while annotations are on the page
    pub active: bool,
    pub brands: Vec<DetectedBrand>,
}
