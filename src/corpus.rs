//! In-memory corpus of documents and their embeddings.
//!
//! Entries are stored in insertion order. A document and its vector live in
//! one struct, so the i-th vector always belongs to the i-th document and no
//! partially-added entry is ever observable.

/// A document paired with its embedding vector.
#[derive(Debug, Clone)]
pub struct CorpusEntry {
    /// Original document text, immutable once ingested
    pub text: String,
    /// The embedding vector
    pub embedding: Vec<f32>,
}

/// Append-only, insertion-ordered collection of corpus entries.
///
/// Duplicate texts are deliberately kept as distinct entries.
#[derive(Debug, Default)]
pub struct CorpusStore {
    entries: Vec<CorpusEntry>,
}

impl CorpusStore {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document and its vector as one entry.
    pub fn add(&mut self, text: String, embedding: Vec<f32>) {
        self.entries.push(CorpusEntry { text, embedding });
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. The only teardown the corpus supports.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
