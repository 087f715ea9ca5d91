//! Summary page enrichment
//!
//! Every report row links to its own summary page whose table ends with the
//! free-text description of the sighting. That text becomes the record's
//! enrichment field.

use crate::config::SiteConfig;
use crate::crawler::fetcher::fetch_document;
use crate::html::{HtmlDocument, HtmlNode};
use crate::model::Identifier;
use reqwest::Client;

/// Fetches summary pages and extracts their enrichment text
pub struct SummaryEnhancer<'a> {
    client: &'a Client,
    site: &'a SiteConfig,
}

impl<'a> SummaryEnhancer<'a> {
    pub fn new(client: &'a Client, site: &'a SiteConfig) -> Self {
        Self { client, site }
    }

    /// Returns the summary text for a record, or `None` when unavailable
    ///
    /// A missing summary is not an error: the record is kept without it.
    pub async fn enhance(&self, identifier: &Identifier) -> Option<String> {
        let url = match self.site.page_url(identifier) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot build summary URL for {}: {}", identifier, e);
                return None;
            }
        };

        let doc = fetch_document(self.client, url.as_str()).await?;
        let summary = extract_summary(&doc);
        if summary.is_none() {
            tracing::debug!("No summary text found at {}", url);
        }
        summary
    }
}

/// Text of the last cell of the last row of the document's first table
pub fn extract_summary<D: HtmlDocument>(doc: &D) -> Option<String> {
    let table = doc.first_table()?;
    let rows = table.rows();
    let cells = rows.last()?.cells();
    let cell = cells.last()?;
    Some(cell.text_content().trim().to_string())
}
