//! Output module for persisting harvested collections
//!
//! This module handles:
//! - Writing the consolidated JSON document (and reading it back)
//! - The sink interface the coordinator persists through
//! - Recording harvest statistics

mod json;
pub mod stats;
mod traits;

pub use json::{load_collection, to_pretty_json, JsonFileSink};
pub use stats::{collection_statistics, print_statistics, CollectionStatistics, CrawlStatistics};
pub use traits::{CollectionSink, MemorySink, OutputError, OutputResult};
