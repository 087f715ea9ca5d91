//! Identifier extraction from page anchors
//!
//! Index and detail pages link to their children with anchors whose target
//! ends in a fixed-width numeric file name, e.g. `201710.html` or
//! `138123.html`. Only the numeric token is kept, and the page is fetched
//! again as `<base>/<token><suffix>`.

use crate::html::{HtmlDocument, HtmlNode};
use crate::model::Identifier;
use regex::Regex;

/// Extracts page identifiers from anchor targets
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    pattern: Regex,
}

impl LinkExtractor {
    /// Creates an extractor for `digits`-wide tokens followed by `suffix`
    ///
    /// The token must not be preceded by another digit, so a 7-digit name
    /// never yields its last 6 digits.
    pub fn new(digits: usize, suffix: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"(?:^|[^0-9])([0-9]{{{}}}){}$",
            digits,
            regex::escape(suffix)
        ))?;
        Ok(Self { pattern })
    }

    /// Returns the identifiers linked from a document, in anchor order
    ///
    /// An absent document yields no identifiers. Anchors without a target or
    /// with a non-matching target are skipped. Repeats are preserved.
    pub fn extract<D: HtmlDocument>(&self, doc: Option<&D>) -> Vec<Identifier> {
        let Some(doc) = doc else {
            tracing::debug!("No document to extract links from");
            return Vec::new();
        };

        doc.anchors()
            .iter()
            .filter_map(|anchor| anchor.attr("href"))
            .filter_map(|href| self.match_target(href))
            .collect()
    }

    /// Matches a single anchor target
    pub fn match_target(&self, href: &str) -> Option<Identifier> {
        let path = href
            .trim()
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        self.pattern
            .captures(path)
            .and_then(|caps| caps.get(1))
            .map(|token| Identifier::new(token.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_document;
    use scraper::Html;

    fn extractor() -> LinkExtractor {
        LinkExtractor::new(6, ".html").unwrap()
    }

    fn ids(found: Vec<Identifier>) -> Vec<String> {
        found.into_iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_index_page_excludes_non_matching_anchor() {
        let doc = parse_document(
            r#"<html><body>
            <a href="100001.html">Oct 2017</a>
            <a href="100002.html">Sep 2017</a>
            <a href="about.html">About</a>
            </body></html>"#,
        );
        assert_eq!(ids(extractor().extract(Some(&doc))), vec!["100001", "100002"]);
    }

    #[test]
    fn test_absent_document_yields_nothing() {
        assert!(extractor().extract::<Html>(None).is_empty());
    }

    #[test]
    fn test_prefixed_and_nested_targets() {
        let ex = extractor();
        assert_eq!(ex.match_target("ndxe201710.html"), Some("201710".into()));
        assert_eq!(ex.match_target("../html/138/S138123.html"), Some("138123".into()));
        assert_eq!(ex.match_target("/webreports/200001.html"), Some("200001".into()));
    }

    #[test]
    fn test_rejects_wrong_width_and_suffix() {
        let ex = extractor();
        assert_eq!(ex.match_target("12345.html"), None);
        assert_eq!(ex.match_target("1234567.html"), None);
        assert_eq!(ex.match_target("123456.htm"), None);
        assert_eq!(ex.match_target("123456.html.bak"), None);
        assert_eq!(ex.match_target("123456xhtml"), None);
    }

    #[test]
    fn test_query_and_fragment_are_ignored() {
        let ex = extractor();
        assert_eq!(ex.match_target("200001.html?x=1"), Some("200001".into()));
        assert_eq!(ex.match_target("200001.html#top"), Some("200001".into()));
    }

    #[test]
    fn test_missing_href_and_duplicates() {
        let doc = parse_document(
            r#"<a name="top"></a><a href="200001.html">a</a><a href="200001.html">b</a>"#,
        );
        assert_eq!(ids(extractor().extract(Some(&doc))), vec!["200001", "200001"]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let html = r#"<a href="300001.html">1</a><a href="300002.html">2</a>"#;
        let first = extractor().extract(Some(&parse_document(html)));
        let second = extractor().extract(Some(&parse_document(html)));
        assert_eq!(first, second);
    }
}
