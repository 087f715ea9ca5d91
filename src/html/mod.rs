//! Narrow document capability used by the extraction stages
//!
//! The link, table and summary stages never touch a concrete HTML parser.
//! They only need to find the first table, walk its rows and cells, list the
//! anchors of a page and read text or attributes. [`HtmlDocument`] and
//! [`HtmlNode`] expose exactly that, and are implemented here over
//! `scraper::Html`.

use scraper::{ElementRef, Html, Selector};

/// A parsed page
pub trait HtmlDocument {
    type Node<'a>: HtmlNode
    where
        Self: 'a;

    /// The first `<table>` of the document, in document order
    fn first_table(&self) -> Option<Self::Node<'_>>;

    /// Every `<a>` element of the document, in document order
    fn anchors(&self) -> Vec<Self::Node<'_>>;
}

/// An element of a parsed page
pub trait HtmlNode: Sized {
    /// Concatenated text of the element and its descendants, untrimmed
    fn text_content(&self) -> String;

    fn attr(&self, name: &str) -> Option<&str>;

    /// Rows of a table element, including rows inside `thead`/`tbody`/`tfoot`
    ///
    /// Rows of nested tables are not included.
    fn rows(&self) -> Vec<Self>;

    /// `td` and `th` children of a row element
    fn cells(&self) -> Vec<Self>;
}

/// Parses an HTML string into a document
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

impl HtmlDocument for Html {
    type Node<'a> = ElementRef<'a>;

    fn first_table(&self) -> Option<ElementRef<'_>> {
        let selector = Selector::parse("table").ok()?;
        self.select(&selector).next()
    }

    fn anchors(&self) -> Vec<ElementRef<'_>> {
        match Selector::parse("a") {
            Ok(selector) => self.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl<'a> HtmlNode for ElementRef<'a> {
    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn rows(&self) -> Vec<Self> {
        let mut rows = Vec::new();

        for child in self.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "tr" => rows.push(child),
                "thead" | "tbody" | "tfoot" => rows.extend(
                    child
                        .children()
                        .filter_map(ElementRef::wrap)
                        .filter(|el| el.value().name() == "tr"),
                ),
                _ => {}
            }
        }

        rows
    }

    fn cells(&self) -> Vec<Self> {
        self.children()
            .filter_map(ElementRef::wrap)
            .filter(|el| matches!(el.value().name(), "td" | "th"))
            .collect()
    }
}
