//! Harvest coordinator - main crawl orchestration logic
//!
//! This module contains the three-stage harvest loop:
//! - Fetching the index page and extracting detail page identifiers
//! - Fetching each detail page, pairing its row links with its table rows
//! - Enriching every row from its summary page and accumulating the result
//!
//! The collection only ever grows. A page that fails in any way contributes
//! nothing and the run moves on to the next page.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_document};
use crate::crawler::links::LinkExtractor;
use crate::crawler::summary::SummaryEnhancer;
use crate::crawler::table::parse_table;
use crate::model::{CollectionEntry, Identifier, Record, RecordCollection};
use crate::output::{CollectionSink, CrawlStatistics, JsonFileSink};
use crate::state::{PageOutcome, RunPhase};
use crate::{ConfigError, HarvestError};
use futures::stream::{self, StreamExt};
use reqwest::Client;

/// Main harvest coordinator structure
pub struct Coordinator<S: CollectionSink> {
    config: Config,
    client: Client,
    links: LinkExtractor,
    sink: S,
    phase: RunPhase,
    collection: RecordCollection,
    stats: CrawlStatistics,
}

impl Coordinator<JsonFileSink> {
    /// Creates a coordinator writing to the configured data path
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - Failed to build the HTTP client or link pattern
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let sink = JsonFileSink::new(&config.output.data_path);
        Self::with_sink(config, sink)
    }
}

impl<S: CollectionSink> Coordinator<S> {
    /// Creates a coordinator persisting through the given sink
    pub fn with_sink(config: Config, sink: S) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent)?;
        let links = LinkExtractor::new(config.site.identifier_digits, &config.site.page_suffix)
            .map_err(|e| ConfigError::Validation(format!("Invalid identifier pattern: {}", e)))?;

        Ok(Self {
            config,
            client,
            links,
            sink,
            phase: RunPhase::Idle,
            collection: RecordCollection::new(),
            stats: CrawlStatistics::new(),
        })
    }

    /// Runs the harvest from the index page to the final output document
    ///
    /// The collection is persisted at the end of every run, including runs
    /// whose index page was unavailable (an empty document) and runs that
    /// hit an unexpected error (whatever was harvested before the error).
    /// On an unexpected error the collection is persisted once when the
    /// error surfaces and once more at the very end, and the error is
    /// returned after the final write. A failed checkpoint write is only
    /// logged; a failed final write is returned.
    pub async fn run(&mut self) -> Result<RecordCollection, HarvestError> {
        if self.phase != RunPhase::Idle {
            return Err(HarvestError::InvalidTransition {
                from: self.phase,
                to: RunPhase::IndexFetched,
            });
        }

        let index_url = self.config.site.index_url()?;
        tracing::info!("Fetching index page {}", index_url);

        let pages = match fetch_document(&self.client, index_url.as_str()).await {
            Some(index) => self.links.extract(Some(&index)),
            None => {
                tracing::error!(
                    "Index page {} is unavailable, writing an empty collection",
                    index_url
                );
                self.finish()?;
                return Ok(self.collection.clone());
            }
        };

        self.transition(RunPhase::IndexFetched)?;
        self.stats.detail_pages_listed = pages.len() as u64;
        tracing::info!("Index lists {} detail pages", pages.len());

        self.transition(RunPhase::Crawling)?;
        let crawl_result = self.crawl_pages(&pages).await;

        if let Err(e) = &crawl_result {
            tracing::error!(
                "Harvest interrupted after {} records: {}",
                self.collection.len(),
                e
            );
            if let Err(persist_err) = self.persist() {
                tracing::error!("Failed to save partial collection: {}", persist_err);
            }
        }

        self.finish()?;
        crawl_result?;

        Ok(self.collection.clone())
    }

    /// Processes every detail page in index order
    async fn crawl_pages(&mut self, pages: &[Identifier]) -> Result<(), HarvestError> {
        let checkpoint_every = self.config.crawler.checkpoint_every as usize;

        for (position, page) in pages.iter().enumerate() {
            let outcome = self.process_detail_page(page).await?;
            self.stats.record_outcome(&outcome);

            match outcome {
                PageOutcome::Records(pairs) => {
                    let entries = self.enrich(pairs).await;
                    let field = &self.config.output.enrichment_field;
                    let missing = entries
                        .iter()
                        .filter(|e| e.record.get(field).is_none())
                        .count();

                    self.stats.records_harvested += entries.len() as u64;
                    self.stats.enrichment_failures += missing as u64;
                    self.collection.extend(entries);
                }
                PageOutcome::Mismatch {
                    identifiers,
                    records,
                } => {
                    tracing::warn!(
                        "Unexpected HTML format on page {}: {} report links but {} table rows, skipping",
                        page,
                        identifiers,
                        records
                    );
                }
                PageOutcome::ParseFailure => {
                    tracing::warn!("Cannot read a report table from page {}, skipping", page);
                }
                PageOutcome::FetchFailed => {
                    tracing::warn!("Cannot read from page {}, skipping", page);
                }
            }

            tracing::info!(
                "Progress: {}/{} detail pages, {} records",
                position + 1,
                pages.len(),
                self.collection.len()
            );

            if checkpoint_every > 0 && (position + 1) % checkpoint_every == 0 {
                if let Err(e) = self.persist() {
                    tracing::warn!("Checkpoint failed after page {}: {}", page, e);
                }
            }
        }

        Ok(())
    }

    /// Fetches one detail page and pairs its row links with its table rows
    ///
    /// The count check happens here, before any summary page is fetched, so
    /// a malformed page never leaves partial entries behind.
    pub async fn process_detail_page(
        &self,
        page: &Identifier,
    ) -> Result<PageOutcome, HarvestError> {
        let url = self
            .config
            .site
            .page_url(page)
            .map_err(|e| HarvestError::PageUrl {
                identifier: page.to_string(),
                message: e.to_string(),
            })?;

        let Some(doc) = fetch_document(&self.client, url.as_str()).await else {
            return Ok(PageOutcome::FetchFailed);
        };

        let identifiers = self.links.extract(Some(&doc));
        let records = parse_table(Some(&doc));
        tracing::debug!(
            "Page {}: {} report links, {} table rows",
            page,
            identifiers.len(),
            records.as_ref().map_or(0, Vec::len)
        );

        Ok(PageOutcome::pair(identifiers, records))
    }

    /// Attaches each record's summary, preserving row order
    async fn enrich(&self, pairs: Vec<(Identifier, Record)>) -> Vec<CollectionEntry> {
        let enhancer = SummaryEnhancer::new(&self.client, &self.config.site);
        let enhancer = &enhancer;
        let field = self.config.output.enrichment_field.as_str();
        let limit = self.config.crawler.max_concurrent_summaries.max(1);

        stream::iter(pairs)
            .map(move |(identifier, mut record)| async move {
                let summary = enhancer.enhance(&identifier).await;
                record.enrich(field, summary);
                CollectionEntry::new(identifier, record)
            })
            .buffered(limit)
            .collect()
            .await
    }

    /// Writes the current collection through the sink
    fn persist(&self) -> Result<(), HarvestError> {
        self.sink.persist(&self.collection)?;
        Ok(())
    }

    /// Final persist and transition to `Persisted`
    fn finish(&mut self) -> Result<(), HarvestError> {
        self.persist()?;
        self.transition(RunPhase::Persisted)?;
        self.stats.finish();
        self.stats.log_summary();
        Ok(())
    }

    fn transition(&mut self, next: RunPhase) -> Result<(), HarvestError> {
        if !self.phase.can_transition_to(next) {
            return Err(HarvestError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::debug!("Run phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn collection(&self) -> &RecordCollection {
        &self.collection
    }

    pub fn statistics(&self) -> &CrawlStatistics {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Runs a complete harvest writing to the configured data path
///
/// # Example
///
/// ```no_run
/// use report_harvest::config::load_config;
/// use report_harvest::crawler::run_harvest;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let collection = run_harvest(config).await?;
/// println!("{} records", collection.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: Config) -> Result<RecordCollection, HarvestError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
    use crate::output::MemorySink;

    fn create_test_config(base_url: &str) -> Config {
        Config {
            site: SiteConfig {
                base_url: base_url.to_string(),
                index_page: "ndxevent.html".to_string(),
                identifier_digits: 6,
                page_suffix: ".html".to_string(),
            },
            user_agent: UserAgentConfig {
                crawler_name: "TestHarvester".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            crawler: CrawlerConfig::default(),
            output: OutputConfig {
                data_path: "./unused.json".to_string(),
                enrichment_field: "Summary".to_string(),
            },
        }
    }

    #[test]
    fn test_coordinator_creation() {
        let coordinator =
            Coordinator::with_sink(create_test_config("http://127.0.0.1:9/"), MemorySink::new())
                .unwrap();
        assert_eq!(coordinator.phase(), RunPhase::Idle);
        assert!(coordinator.collection().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_index_persists_empty_collection() {
        let mut coordinator =
            Coordinator::with_sink(create_test_config("http://127.0.0.1:9/"), MemorySink::new())
                .unwrap();

        let collection = coordinator.run().await.unwrap();

        assert!(collection.is_empty());
        assert_eq!(coordinator.phase(), RunPhase::Persisted);
        assert_eq!(coordinator.sink().snapshots().len(), 1);
        assert!(coordinator.sink().last().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_run_is_rejected() {
        let mut coordinator =
            Coordinator::with_sink(create_test_config("http://127.0.0.1:9/"), MemorySink::new())
                .unwrap();

        coordinator.run().await.unwrap();
        let second = coordinator.run().await;

        assert!(matches!(
            second,
            Err(HarvestError::InvalidTransition {
                from: RunPhase::Persisted,
                ..
            })
        ));
    }
}
