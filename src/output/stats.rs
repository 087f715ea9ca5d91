//! Harvest statistics
//!
//! `CrawlStatistics` is filled in while a run progresses. `CollectionStatistics`
//! is computed from a finished output document.

use crate::model::RecordCollection;
use crate::state::PageOutcome;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Counters collected during one harvest run
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Detail page links found on the index page
    pub detail_pages_listed: u64,

    /// Detail pages that contributed records
    pub pages_processed: u64,

    /// Detail pages skipped because row and link counts disagreed
    pub pages_mismatched: u64,

    /// Detail pages without a parsable table
    pub pages_unparsable: u64,

    /// Detail pages that could not be fetched
    pub pages_unreachable: u64,

    /// Records appended to the collection
    pub records_harvested: u64,

    /// Records kept without a summary
    pub enrichment_failures: u64,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            detail_pages_listed: 0,
            pages_processed: 0,
            pages_mismatched: 0,
            pages_unparsable: 0,
            pages_unreachable: 0,
            records_harvested: 0,
            enrichment_failures: 0,
        }
    }

    /// Counts a detail page by its outcome
    pub fn record_outcome(&mut self, outcome: &PageOutcome) {
        match outcome {
            PageOutcome::Records(_) => self.pages_processed += 1,
            PageOutcome::Mismatch { .. } => self.pages_mismatched += 1,
            PageOutcome::ParseFailure => self.pages_unparsable += 1,
            PageOutcome::FetchFailed => self.pages_unreachable += 1,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn pages_visited(&self) -> u64 {
        self.pages_processed + self.pages_mismatched + self.pages_unparsable + self.pages_unreachable
    }

    /// Elapsed seconds, up to now if the run has not finished
    pub fn duration_seconds(&self) -> i64 {
        let end = self.finished_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_seconds()
    }

    /// Logs a one-line summary of the run
    pub fn log_summary(&self) {
        tracing::info!(
            "Harvest finished: {} records from {} of {} visited detail pages, {} listed ({} mismatched, {} unparsable, {} unreachable, {} without summary) in {}s",
            self.records_harvested,
            self.pages_processed,
            self.pages_visited(),
            self.detail_pages_listed,
            self.pages_mismatched,
            self.pages_unparsable,
            self.pages_unreachable,
            self.enrichment_failures,
            self.duration_seconds()
        );
    }
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts computed from an output document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionStatistics {
    pub total_entries: usize,
    pub unique_identifiers: usize,
    pub with_summary: usize,
    pub without_summary: usize,
}

/// Computes statistics for a collection
///
/// # Arguments
///
/// * `collection` - The harvested collection
/// * `enrichment_field` - Name of the summary field
pub fn collection_statistics(
    collection: &RecordCollection,
    enrichment_field: &str,
) -> CollectionStatistics {
    let unique: HashSet<_> = collection.iter().map(|e| &e.identifier).collect();
    let with_summary = collection
        .iter()
        .filter(|e| e.record.get(enrichment_field).is_some())
        .count();

    CollectionStatistics {
        total_entries: collection.len(),
        unique_identifiers: unique.len(),
        with_summary,
        without_summary: collection.len() - with_summary,
    }
}

/// Prints collection statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CollectionStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Total entries: {}", stats.total_entries);
    println!("  Unique identifiers: {}", stats.unique_identifiers);
    println!(
        "  Repeated identifiers: {}",
        stats.total_entries - stats.unique_identifiers
    );
    println!();

    let coverage = if stats.total_entries > 0 {
        (stats.with_summary as f64 / stats.total_entries as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Summary Coverage: {:.1}% ({} with summary, {} without)",
        coverage, stats.with_summary, stats.without_summary
    );
}
