//! The flat pattern record searched by the query engine.

use serde::{Deserialize, Serialize};

/// A catalog pattern record.
///
/// This is the lexical surface of a pattern: the flat object produced by the
/// ingestion pipeline, carrying the text fields the query engine matches
/// against. Embedding vectors for the same id live in the embedding store
/// and are resolved separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    /// Unique pattern identifier.
    pub id: String,
    /// Human-facing pattern name.
    pub name: String,
    /// Longer prose description.
    #[serde(default)]
    pub description: String,
    /// Category assigned by the taxonomy.
    #[serde(default)]
    pub category: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Example prompt bodies.
    #[serde(default)]
    pub examples: Vec<String>,
}

impl PatternRecord {
    /// Create a new record with an id and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Add a tag.
    pub fn add_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add an example body.
    pub fn add_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Flatten all text fields into a lower-cased list for query evaluation.
    ///
    /// A term matches the record if it matches any one of these fields;
    /// empty fields are skipped.
    pub fn flattened_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(4 + self.tags.len() + self.examples.len());
        for field in [&self.name, &self.description, &self.category] {
            if !field.is_empty() {
                fields.push(field.to_lowercase());
            }
        }
        for tag in &self.tags {
            if !tag.is_empty() {
                fields.push(tag.to_lowercase());
            }
        }
        for example in &self.examples {
            if !example.is_empty() {
                fields.push(example.to_lowercase());
            }
        }
        fields
    }
}
