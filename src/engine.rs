//! Retrieval engine: embeds queries, scores the corpus, ranks results.
//!
//! `SearchSession` is the context object tying the pieces together: one
//! embedder, one corpus, and optionally one external sink. Sessions are
//! independent of each other; nothing here is process-global.

use std::sync::RwLock;

use crate::corpus::CorpusStore;
use crate::embeddings::{EmbeddingError, TextEmbedder};
use crate::similarity::{cosine_similarity, SimilarityError};
use crate::sink::VectorSink;

/// A ranked search hit.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScoredResult {
    /// 1-based position in the ranked output
    pub rank: usize,
    /// Cosine similarity to the query, in [-1.0, 1.0]
    pub score: f32,
    /// The matched document text
    pub text: String,
}

/// Errors surfaced by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Similarity error: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// One retrieval session: an embedder plus the corpus it has ingested.
///
/// The corpus sits behind an RwLock: searches may run concurrently with
/// each other, while ingestion takes the write lock so an entry's text
/// and vector become visible together.
pub struct SearchSession {
    embedder: Box<dyn TextEmbedder>,
    corpus: RwLock<CorpusStore>,
    sink: Option<Box<dyn VectorSink>>,
}

impl SearchSession {
    /// Create a session with no external sink.
    pub fn new(embedder: Box<dyn TextEmbedder>) -> Self {
        Self {
            embedder,
            corpus: RwLock::new(CorpusStore::new()),
            sink: None,
        }
    }

    /// Create a session that mirrors ingested entries to an external sink.
    pub fn with_sink(embedder: Box<dyn TextEmbedder>, sink: Box<dyn VectorSink>) -> Self {
        Self {
            embedder,
            corpus: RwLock::new(CorpusStore::new()),
            sink: Some(sink),
        }
    }

    /// Number of documents ingested so far.
    pub fn corpus_len(&self) -> Result<usize, SessionError> {
        let corpus = self
            .corpus
            .read()
            .map_err(|e| SessionError::Internal(format!("Corpus lock poisoned: {}", e)))?;
        Ok(corpus.len())
    }

    /// Embed one document and append it to the corpus.
    ///
    /// Forwarding to the external sink happens after the in-memory append
    /// and is best-effort: a sink failure is logged, never returned.
    pub fn add_document(&self, text: &str) -> Result<(), SessionError> {
        let embedding = self.embedder.embed(text)?;

        {
            let mut corpus = self
                .corpus
                .write()
                .map_err(|e| SessionError::Internal(format!("Corpus lock poisoned: {}", e)))?;
            corpus.add(text.to_string(), embedding.clone());
        }

        self.forward_to_sink(&embedding, text);
        Ok(())
    }

    /// Embed and ingest a batch of documents, preserving their order.
    ///
    /// Returns the number of documents added.
    pub fn add_documents(&self, texts: &[String]) -> Result<usize, SessionError> {
        if texts.is_empty() {
            return Ok(0);
        }

        let embeddings = self.embedder.embed_batch(texts)?;
        if embeddings.len() != texts.len() {
            return Err(SessionError::Internal(format!(
                "Embedder returned {} vectors for {} texts",
                embeddings.len(),
                texts.len()
            )));
        }

        {
            let mut corpus = self
                .corpus
                .write()
                .map_err(|e| SessionError::Internal(format!("Corpus lock poisoned: {}", e)))?;
            for (text, embedding) in texts.iter().zip(embeddings.iter()) {
                corpus.add(text.clone(), embedding.clone());
            }
        }

        for (text, embedding) in texts.iter().zip(embeddings.iter()) {
            self.forward_to_sink(embedding, text);
        }

        Ok(texts.len())
    }

    /// Rank the corpus against a free-text query.
    ///
    /// Scores every entry with cosine similarity, sorts descending, and
    /// returns the best `min(top_k, corpus_len)` hits with 1-based ranks.
    /// Ties keep corpus insertion order (the sort is stable). `top_k == 0`
    /// and an empty corpus both yield an empty result, not an error.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<ScoredResult>, SessionError> {
        if top_k == 0 {
            return Ok(vec![]);
        }

        // Embed before locking; model inference must not block ingestion
        let query_vector = self.embedder.embed(query)?;

        let corpus = self
            .corpus
            .read()
            .map_err(|e| SessionError::Internal(format!("Corpus lock poisoned: {}", e)))?;

        if corpus.is_empty() {
            return Ok(vec![]);
        }

        let mut scored: Vec<(f32, &str)> = Vec::with_capacity(corpus.len());
        for entry in corpus.entries() {
            let score = cosine_similarity(&query_vector, &entry.embedding)?;
            scored.push((score, entry.text.as_str()));
        }

        // Stable sort keeps insertion order among equal scores
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .enumerate()
            .map(|(i, (score, text))| ScoredResult {
                rank: i + 1,
                score,
                text: text.to_string(),
            })
            .collect())
    }

    /// Drop every ingested document.
    pub fn clear(&self) -> Result<(), SessionError> {
        let mut corpus = self
            .corpus
            .write()
            .map_err(|e| SessionError::Internal(format!("Corpus lock poisoned: {}", e)))?;
        corpus.clear();
        Ok(())
    }

    fn forward_to_sink(&self, vector: &[f32], text: &str) {
        let Some(sink) = &self.sink else {
            return;
        };

        if let Err(err) = sink.add(vector, text) {
            log::warn!(
                "External sink '{}' failed, in-memory corpus remains authoritative: {}",
                sink.name(),
                err
            );
        }
    }
}
