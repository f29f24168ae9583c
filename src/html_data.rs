//! Custom HTML data model
//!
//! Mirrors the "custom data" format VS Code's HTML language service loads
//! (`version: 1.1`). Only tags and global attributes are produced; value sets
//! are not.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An attribute shown in completion and hover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub description: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A custom element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// Everything extracted from one source unit.
///
/// Tags are not merged by name: a declaration contributes one tag per
/// qualifying selector fragment, and two declarations may contribute tags
/// with the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractResult {
    pub tags: Vec<Tag>,
    pub global_attributes: Vec<Attribute>,
}

impl ExtractResult {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.global_attributes.is_empty()
    }

    /// Append another result, keeping order
    pub fn append(&mut self, other: ExtractResult) {
        self.tags.extend(other.tags);
        self.global_attributes.extend(other.global_attributes);
    }
}

/// The document written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlData {
    pub version: f64,
    pub tags: Vec<Tag>,
    pub global_attributes: Vec<Attribute>,
}

impl HtmlData {
    /// Custom data format version
    pub const VERSION: f64 = 1.1;

    /// Add the contents of one source unit
    pub fn merge(&mut self, result: ExtractResult) {
        self.tags.extend(result.tags);
        self.global_attributes.extend(result.global_attributes);
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for HtmlData {
    fn default() -> Self {
        Self {
            version: Self::VERSION,
            tags: Vec::new(),
            global_attributes: Vec::new(),
        }
    }
}

impl From<ExtractResult> for HtmlData {
    fn from(result: ExtractResult) -> Self {
        let mut data = Self::default();
        data.merge(result);
        data
    }
}
