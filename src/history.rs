//! Per-session search history.
//!
//! Only the raw query strings are kept; result sets are never retained
//! past the response that produced them.

/// Queries issued during this session, oldest first.
#[derive(Debug, Default)]
pub struct SearchHistory {
    queries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a query. Repeated queries are recorded each time.
    pub fn record(&mut self, query: &str) {
        self.queries.push(query.to_string());
    }

    /// All recorded queries in the order they were issued.
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }
}
