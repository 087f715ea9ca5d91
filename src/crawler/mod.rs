//! Crawler module for the three-stage harvest
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with error classification
//! - Identifier extraction from page anchors
//! - Detail table parsing
//! - Summary page enrichment
//! - Overall harvest coordination

mod coordinator;
mod fetcher;
mod links;
mod summary;
mod table;

pub use coordinator::{run_harvest, Coordinator};
pub use fetcher::{build_http_client, fetch_document, fetch_url, FetchResult};
pub use links::LinkExtractor;
pub use summary::{extract_summary, SummaryEnhancer};
pub use table::{header_names, parse_table};

use crate::config::Config;
use crate::model::RecordCollection;
use crate::HarvestError;

/// Runs a complete harvest
///
/// This is the main entry point for starting a harvest. It will:
/// 1. Build the HTTP client
/// 2. Fetch the index page and extract the detail page identifiers
/// 3. Fetch every detail page and pair its rows with its report links
/// 4. Enrich every row from its summary page
/// 5. Write the consolidated JSON document
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(RecordCollection)` - Everything harvested, as written to disk
/// * `Err(HarvestError)` - Harvest failed; whatever was collected has still been written
pub async fn harvest(config: Config) -> Result<RecordCollection, HarvestError> {
    run_harvest(config).await
}
