//! Document types
//!
//! A minimal document tree: text goes in, an embedding comes out, and
//! nested documents hang off `chunks` and `matches`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A unit of text flowing through the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier (random UUID when not supplied)
    #[serde(default = "new_id")]
    pub id: String,
    /// Input text, also accepted as `content`
    #[serde(default, alias = "content", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Embedding vector assigned by the encoder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    /// Sub-documents one level down
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chunks: Vec<Document>,
    /// Related documents one level down
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<Document>,
    /// Free-form metadata carried through untouched
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub tags: serde_json::Map<String, serde_json::Value>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            id: new_id(),
            text: None,
            embedding: None,
            chunks: vec![],
            matches: vec![],
            tags: serde_json::Map::new(),
        }
    }
}

impl Document {
    /// Create an empty document with a fresh id
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document holding `text`
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Append a chunk
    pub fn chunk(mut self, chunk: Document) -> Self {
        self.chunks.push(chunk);
        self
    }

    /// Append a match
    pub fn matched(mut self, doc: Document) -> Self {
        self.matches.push(doc);
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Text eligible for encoding: present and non-empty
    pub fn text_to_embed(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// Ordered collection of root-level documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentArray(Vec<Document>);

impl DocumentArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, doc: Document) {
        self.0.push(doc);
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Document> {
        self.0.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Document] {
        &self.0
    }
}

impl From<Vec<Document>> for DocumentArray {
    fn from(docs: Vec<Document>) -> Self {
        Self(docs)
    }
}

impl FromIterator<Document> for DocumentArray {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for DocumentArray {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DocumentArray {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
