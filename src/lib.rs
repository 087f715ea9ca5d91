//! Report-Harvest: a three-stage report table harvester
//!
//! This crate walks a public report site from its index page to the per-page
//! detail tables and on to the per-record summary pages, and assembles every
//! harvested row into one consolidated JSON document.

pub mod config;
pub mod crawler;
pub mod html;
pub mod model;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Report-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid page URL for identifier {identifier}: {message}")]
    PageUrl { identifier: String, message: String },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid run phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::RunPhase,
        to: state::RunPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Report-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{CollectionEntry, Identifier, Record, RecordCollection};
pub use state::{PageOutcome, RunPhase};
