use crate::model::Identifier;
use serde::Deserialize;
use url::Url;

/// Main configuration structure for Report-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Location of the report site
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Stem every page URL is built from (e.g., "http://www.nuforc.org/webreports/")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// File name of the index page, relative to the base URL
    #[serde(rename = "index-page")]
    pub index_page: String,

    /// Number of digits in a page identifier
    #[serde(rename = "identifier-digits", default = "default_identifier_digits")]
    pub identifier_digits: usize,

    /// Extension every identifier-named page carries
    #[serde(rename = "page-suffix", default = "default_page_suffix")]
    pub page_suffix: String,
}

impl SiteConfig {
    /// Parses the base URL, treating it as a directory even without a trailing slash
    pub fn base(&self) -> Result<Url, url::ParseError> {
        if self.base_url.ends_with('/') {
            Url::parse(&self.base_url)
        } else {
            Url::parse(&format!("{}/", self.base_url))
        }
    }

    /// URL of the index page: `<base>/<index-page>`
    pub fn index_url(&self) -> Result<Url, url::ParseError> {
        self.base()?.join(&self.index_page)
    }

    /// URL of a detail or summary page: `<base>/<identifier><suffix>`
    pub fn page_url(&self, identifier: &Identifier) -> Result<Url, url::ParseError> {
        self.base()?
            .join(&format!("{}{}", identifier.as_str(), self.page_suffix))
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of summary pages fetched at once for one detail page
    #[serde(
        rename = "max-concurrent-summaries",
        default = "default_max_concurrent_summaries"
    )]
    pub max_concurrent_summaries: usize,

    /// Persist the collection after this many detail pages (0 disables)
    #[serde(rename = "checkpoint-every", default)]
    pub checkpoint_every: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_summaries: default_max_concurrent_summaries(),
            checkpoint_every: 0,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the consolidated JSON document
    #[serde(rename = "data-path")]
    pub data_path: String,

    /// Name of the field the summary text is stored under
    #[serde(rename = "enrichment-field", default = "default_enrichment_field")]
    pub enrichment_field: String,
}

fn default_identifier_digits() -> usize {
    6
}

fn default_page_suffix() -> String {
    ".html".to_string()
}

fn default_max_concurrent_summaries() -> usize {
    1
}

fn default_enrichment_field() -> String {
    "Summary".to_string()
}
