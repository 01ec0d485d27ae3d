//! End-to-end retrieval tests: corpus file -> ingestion -> session -> ranking.
//!
//! Most tests run against a deterministic letter-frequency embedder so no
//! model download is needed. The real-model test at the bottom is marked
//! #[ignore]; run with: cargo test -- --ignored

use std::io::Write;

use crate::embeddings::{EmbeddingError, EmbeddingModel, TextEmbedder};
use crate::engine::SearchSession;
use crate::ingest;

/// Embeds text as its lowercase letter-frequency histogram (26 dims).
///
/// Deterministic and pure; texts sharing vocabulary land close together,
/// which is enough structure for pipeline tests.
struct LetterFrequencyEmbedder;

impl TextEmbedder for LetterFrequencyEmbedder {
    fn dimensions(&self) -> usize {
        26
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut counts = vec![0.0f32; 26];
        for c in text.chars().flat_map(|c| c.to_lowercase()) {
            if c.is_ascii_lowercase() {
                counts[(c as u8 - b'a') as usize] += 1.0;
            }
        }
        Ok(counts)
    }
}

fn corpus_file(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_file_to_ranked_results() {
    let file = corpus_file(&[
        "the quick brown fox jumps over the lazy dog",
        "",
        "rust compiles to fast native machine code",
        "foxes are members of the canine family",
    ]);

    let session = SearchSession::new(Box::new(LetterFrequencyEmbedder));
    let documents = ingest::load_lines(file.path()).unwrap();
    assert_eq!(documents.len(), 3); // blank line skipped

    session.add_documents(&documents).unwrap();
    assert_eq!(session.corpus_len().unwrap(), 3);

    let results = session.search("quick brown fox", 3).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].rank, 1);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_document_retrieves_itself() {
    let docs = [
        "the cat sat on the mat",
        "dogs bark loudly",
        "cats and dogs are pets",
    ];

    let session = SearchSession::new(Box::new(LetterFrequencyEmbedder));
    for doc in &docs {
        session.add_document(doc).unwrap();
    }

    // A document's similarity to its own embedding is maximal
    for doc in &docs {
        let results = session.search(doc, 1).unwrap();
        assert_eq!(results[0].text, *doc, "query '{}' should retrieve itself", doc);
        assert!((results[0].score - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_chunked_ingestion_searchable() {
    let long_doc: String = (0..120)
        .map(|i| format!("word{}", i))
        .collect::<Vec<_>>()
        .join(" ");

    let chunks = ingest::chunk_text(&long_doc, 50, 10);
    assert!(chunks.len() > 2);

    let session = SearchSession::new(Box::new(LetterFrequencyEmbedder));
    session.add_documents(&chunks).unwrap();
    assert_eq!(session.corpus_len().unwrap(), chunks.len());

    let results = session.search("word0 word1 word2", 2).unwrap();
    assert_eq!(results.len(), 2);
}

#[test]
fn test_search_results_not_retained_between_queries() {
    let session = SearchSession::new(Box::new(LetterFrequencyEmbedder));
    session.add_document("persistent corpus entry").unwrap();

    let first = session.search("persistent", 1).unwrap();
    let second = session.search("persistent", 1).unwrap();

    // Scored results are produced fresh per query over the same corpus
    assert_eq!(first[0].text, second[0].text);
    assert_eq!(first[0].score, second[0].score);
    assert_eq!(session.corpus_len().unwrap(), 1);
}

/// Full flow against the real model.
#[test]
#[ignore = "requires model download (~23MB)"]
fn test_real_model_semantic_ranking() {
    let test_dir = std::env::temp_dir().join(format!(
        "semsearch-integration-{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&test_dir).unwrap();

    let model = EmbeddingModel::new("all-MiniLM-L6-v2", test_dir.clone())
        .expect("Failed to initialize embedding model");
    assert_eq!(model.dimensions(), 384);

    let session = SearchSession::new(Box::new(model));
    session.add_document("the cat sat on the mat").unwrap();
    session.add_document("dogs bark loudly").unwrap();
    session.add_document("cats and dogs are pets").unwrap();

    let results = session.search("cat", 2).unwrap();
    assert_eq!(results.len(), 2);

    // Cat-related documents rank above the unrelated dog line
    for result in &results {
        assert_ne!(result.text, "dogs bark loudly");
    }

    let _ = std::fs::remove_dir_all(&test_dir);
}
