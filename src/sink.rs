//! Optional forwarding of vectors to an external index.
//!
//! The in-memory corpus is the source of truth for a session; an external
//! vector store is a best-effort mirror. A sink either exists and implements
//! `add`, or the session has none at all. There is no runtime capability
//! probing.

/// External vector index a session may forward entries to.
pub trait VectorSink: Send + Sync {
    /// Human-readable name for log messages.
    fn name(&self) -> &str;

    /// Store one (vector, document text) pair.
    fn add(&self, vector: &[f32], text: &str) -> Result<(), SinkError>;
}

/// Error from an external vector sink. Never propagated past ingestion;
/// the caller logs it and moves on.
#[derive(Debug, thiserror::Error)]
#[error("Vector sink '{sink}' rejected entry: {message}")]
pub struct SinkError {
    pub sink: String,
    pub message: String,
}
