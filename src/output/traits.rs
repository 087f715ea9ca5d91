//! Output sink traits and error types
//!
//! This module defines the trait interface for the places a harvested
//! collection can be persisted to, and the associated error type.

use crate::model::RecordCollection;
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for collection sinks
///
/// A sink receives the whole collection every time it is persisted and must
/// replace whatever it stored before, so the last call always wins.
pub trait CollectionSink {
    /// Persists the full collection
    ///
    /// # Arguments
    ///
    /// * `collection` - Every entry harvested so far
    fn persist(&self, collection: &RecordCollection) -> OutputResult<()>;
}

/// Sink that keeps every persisted snapshot in memory
///
/// Useful for inspecting how often and with what content a run persisted.
#[derive(Debug, Default)]
pub struct MemorySink {
    snapshots: Mutex<Vec<RecordCollection>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All snapshots, oldest first
    pub fn snapshots(&self) -> Vec<RecordCollection> {
        self.snapshots
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// The most recent snapshot, if any
    pub fn last(&self) -> Option<RecordCollection> {
        self.snapshots().pop()
    }
}

impl CollectionSink for MemorySink {
    fn persist(&self, collection: &RecordCollection) -> OutputResult<()> {
        let mut snapshots = self
            .snapshots
            .lock()
            .map_err(|e| OutputError::Format(format!("Failed to lock sink: {}", e)))?;
        snapshots.push(collection.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_snapshots_in_order() {
        let sink = MemorySink::new();
        assert!(sink.last().is_none());

        sink.persist(&RecordCollection::new()).unwrap();
        sink.persist(&RecordCollection::new()).unwrap();

        assert_eq!(sink.snapshots().len(), 2);
        assert!(sink.last().unwrap().is_empty());
    }
}
