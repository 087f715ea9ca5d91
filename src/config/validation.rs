use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site location
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = config
        .base()
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.index_page.trim().is_empty() {
        return Err(ConfigError::Validation(
            "index_page cannot be empty".to_string(),
        ));
    }

    config.index_url().map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid index-page '{}': {}", config.index_page, e))
    })?;

    if config.identifier_digits < 1 || config.identifier_digits > 32 {
        return Err(ConfigError::Validation(format!(
            "identifier_digits must be between 1 and 32, got {}",
            config.identifier_digits
        )));
    }

    if !config.page_suffix.starts_with('.') || config.page_suffix.len() < 2 {
        return Err(ConfigError::Validation(format!(
            "page_suffix must look like '.html', got '{}'",
            config.page_suffix
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_summaries < 1 || config.max_concurrent_summaries > 32 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_summaries must be between 1 and 32, got {}",
            config.max_concurrent_summaries
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_path.is_empty() {
        return Err(ConfigError::Validation(
            "data_path cannot be empty".to_string(),
        ));
    }

    if config.enrichment_field.trim().is_empty() {
        return Err(ConfigError::Validation(
            "enrichment_field cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteConfig {
        SiteConfig {
            base_url: "http://www.nuforc.org/webreports/".to_string(),
            index_page: "ndxevent.html".to_string(),
            identifier_digits: 6,
            page_suffix: ".html".to_string(),
        }
    }

    #[test]
    fn test_validate_site_config() {
        assert!(validate_site_config(&site()).is_ok());

        let mut bad = site();
        bad.base_url = "not a url".to_string();
        assert!(matches!(
            validate_site_config(&bad),
            Err(ConfigError::InvalidUrl(_))
        ));

        let mut bad = site();
        bad.base_url = "ftp://example.com/reports/".to_string();
        assert!(validate_site_config(&bad).is_err());

        let mut bad = site();
        bad.identifier_digits = 0;
        assert!(validate_site_config(&bad).is_err());

        let mut bad = site();
        bad.page_suffix = "html".to_string();
        assert!(validate_site_config(&bad).is_err());
    }

    #[test]
    fn test_validate_crawler_config() {
        let ok = CrawlerConfig {
            max_concurrent_summaries: 4,
            checkpoint_every: 10,
        };
        assert!(validate_crawler_config(&ok).is_ok());

        let bad = CrawlerConfig {
            max_concurrent_summaries: 0,
            checkpoint_every: 0,
        };
        assert!(validate_crawler_config(&bad).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }
}
