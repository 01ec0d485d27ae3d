//! Query-term highlighting for result display.

use regex::RegexBuilder;

/// ANSI bold-yellow, reset.
const MARK_OPEN: &str = "\x1b[1;33m";
const MARK_CLOSE: &str = "\x1b[0m";

/// Wrap whole-word, case-insensitive occurrences of each query term in the
/// given markers. Terms of one or two characters are skipped; they match
/// too much to be useful.
pub fn highlight_with(text: &str, query: &str, open: &str, close: &str) -> String {
    let mut result = text.to_string();

    for word in query.split_whitespace().filter(|w| w.chars().count() > 2) {
        let pattern = format!(r"\b({})\b", regex::escape(word));
        let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(re) => re,
            // escape() makes the pattern valid; skip the term if not
            Err(_) => continue,
        };
        result = re
            .replace_all(&result, format!("{}$1{}", open, close))
            .into_owned();
    }

    result
}

/// Highlight query terms for terminal output.
pub fn highlight(text: &str, query: &str) -> String {
    highlight_with(text, query, MARK_OPEN, MARK_CLOSE)
}
