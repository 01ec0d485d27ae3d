//! Corpus ingestion helpers.
//!
//! Documents arrive either as a plain-text file (one document per non-blank
//! line) or as already-extracted page text that needs cleanup before it is
//! worth embedding. The cleanup thresholds are tunable through
//! [`IngestConfig`](crate::config::IngestConfig) rather than baked in.

use std::path::Path;

use crate::config::IngestConfig;

/// Errors from reading a corpus file.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Failed to read corpus file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// Load a plain-text corpus, one document per line.
///
/// Lines are trimmed; blank lines are skipped.
pub fn load_lines(path: &Path) -> Result<Vec<String>, IngestError> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.display().to_string(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Clean extracted page text down to lines worth embedding.
///
/// Drops lines shorter than the configured minimum (page numbers, headers)
/// and lines containing any configured noise keyword, then joins the
/// survivors with single spaces. Returns `None` if nothing survives.
pub fn clean_page_text(text: &str, config: &IngestConfig) -> Option<String> {
    let cleaned: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= config.min_line_chars)
        .filter(|line| {
            let lower = line.to_lowercase();
            !config
                .noise_keywords
                .iter()
                .any(|kw| lower.contains(&kw.to_lowercase()))
        })
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join(" "))
    }
}

/// Trim a document down to its first `max_sentences` sentences of substance.
///
/// Sentences are split on '.'; fragments at or under `min_sentence_chars`
/// are skipped. The result always ends with a '.'.
pub fn extract_sentences(text: &str, max_sentences: usize, min_sentence_chars: usize) -> String {
    let sentences: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|s| s.chars().count() > min_sentence_chars)
        .take(max_sentences)
        .collect();

    if sentences.is_empty() {
        return String::new();
    }

    format!("{}.", sentences.join(". "))
}

/// Split long text into overlapping word windows.
///
/// Each chunk holds up to `chunk_size` words and the window advances by
/// `chunk_size - overlap` words, so consecutive chunks share `overlap`
/// words of context. `overlap` must be smaller than `chunk_size`.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    debug_assert!(chunk_size > 0 && overlap < chunk_size);

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![];
    }

    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();

    let mut i = 0;
    while i < words.len() {
        let end = (i + chunk_size).min(words.len());
        chunks.push(words[i..end].join(" "));
        i += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn test_config() -> IngestConfig {
        IngestConfig {
            min_line_chars: 40,
            noise_keywords: vec!["Notes".to_string(), "Chapter".to_string()],
            max_excerpt_sentences: 2,
            min_sentence_chars: 30,
            chunk_size: 200,
            chunk_overlap: 50,
        }
    }

    #[test]
    fn test_load_lines_skips_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first document").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "  second document  ").unwrap();

        let lines = load_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["first document", "second document"]);
    }

    #[test]
    fn test_load_lines_missing_file() {
        let result = load_lines(Path::new("/nonexistent/documents.txt"));
        assert!(matches!(result, Err(IngestError::Read { .. })));
    }

    #[test]
    fn test_clean_drops_short_lines() {
        let text = "Pg. 12\nThis sentence is comfortably longer than forty characters total.";
        let cleaned = clean_page_text(text, &test_config()).unwrap();
        assert!(!cleaned.contains("Pg. 12"));
        assert!(cleaned.starts_with("This sentence"));
    }

    #[test]
    fn test_clean_drops_noise_keywords_case_insensitively() {
        let text = concat!(
            "CHAPTER ONE and plenty of padding to clear the length filter here\n",
            "A perfectly normal line of body text that is long enough to keep.",
        );
        let cleaned = clean_page_text(text, &test_config()).unwrap();
        assert_eq!(
            cleaned,
            "A perfectly normal line of body text that is long enough to keep."
        );
    }

    #[test]
    fn test_clean_joins_surviving_lines_with_spaces() {
        let text = concat!(
            "First surviving line with more than enough characters in it.\n",
            "Second surviving line with more than enough characters too.",
        );
        let cleaned = clean_page_text(text, &test_config()).unwrap();
        assert!(cleaned.contains("in it. Second surviving"));
    }

    #[test]
    fn test_clean_returns_none_when_all_filtered() {
        assert_eq!(clean_page_text("short\nPg. 3\n", &test_config()), None);
        assert_eq!(clean_page_text("", &test_config()), None);
    }

    #[test]
    fn test_extract_sentences_caps_count() {
        let text = "The first sentence is long enough to keep around. \
                    The second sentence is also long enough to keep. \
                    The third sentence would exceed the configured cap.";
        let excerpt = extract_sentences(text, 2, 30);

        assert!(excerpt.contains("first sentence"));
        assert!(excerpt.contains("second sentence"));
        assert!(!excerpt.contains("third sentence"));
        assert!(excerpt.ends_with('.'));
    }

    #[test]
    fn test_extract_sentences_skips_fragments() {
        let text = "Short. Tiny. This one is a real sentence with enough length to count.";
        let excerpt = extract_sentences(text, 2, 30);
        assert_eq!(
            excerpt,
            "This one is a real sentence with enough length to count."
        );
    }

    #[test]
    fn test_extract_sentences_empty_input() {
        assert_eq!(extract_sentences("", 2, 30), "");
        assert_eq!(extract_sentences("tiny. bits.", 2, 30), "");
    }

    #[test]
    fn test_chunk_text_windows_and_overlap() {
        let words: Vec<String> = (0..10).map(|i| format!("w{}", i)).collect();
        let text = words.join(" ");

        let chunks = chunk_text(&text, 4, 2);
        assert_eq!(chunks[0], "w0 w1 w2 w3");
        assert_eq!(chunks[1], "w2 w3 w4 w5");
        // Last window may be shorter than chunk_size
        assert!(chunks.last().unwrap().starts_with("w8"));
    }

    #[test]
    fn test_chunk_text_short_input_is_single_chunk() {
        let chunks = chunk_text("just a few words", 200, 50);
        assert_eq!(chunks, vec!["just a few words".to_string()]);
    }

    #[test]
    fn test_chunk_text_empty_input() {
        assert!(chunk_text("", 200, 50).is_empty());
        assert!(chunk_text("   ", 200, 50).is_empty());
    }
}
