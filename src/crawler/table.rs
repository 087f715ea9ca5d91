//! Detail table parsing
//!
//! A detail page carries one table: a header row naming the columns followed
//! by one row per report. Rows whose cell count does not match the header
//! are dropped rather than padded, truncated or merged with a neighbour.

use crate::html::{HtmlDocument, HtmlNode};
use crate::model::{HeaderSet, Record};

/// Parses the first table of a document into records
///
/// # Returns
///
/// * `Some(records)` - One record per well-formed body row, in row order
/// * `None` - The document is absent, has no table, or has no usable header row
pub fn parse_table<D: HtmlDocument>(doc: Option<&D>) -> Option<Vec<Record>> {
    let table = doc?.first_table()?;
    let rows = table.rows();
    let (header_row, body_rows) = rows.split_first()?;

    let Some(headers) = header_names(header_row) else {
        tracing::debug!("Table header row has no usable column names");
        return None;
    };

    let mut records = Vec::with_capacity(body_rows.len());
    for (index, row) in body_rows.iter().enumerate() {
        let cells: Vec<String> = row
            .cells()
            .iter()
            .map(|cell| cell.text_content().trim().to_string())
            .collect();
        let cell_count = cells.len();

        match Record::from_row(&headers, cells) {
            Some(record) => records.push(record),
            None => tracing::debug!(
                "Skipping table row {}: {} cells, expected {}",
                index + 1,
                cell_count,
                headers.len()
            ),
        }
    }

    Some(records)
}

/// Derives the column names from the header row
///
/// The row text is split on line breaks; cell boundaries count as line
/// breaks too, so headers laid out on a single source line still separate.
pub fn header_names<N: HtmlNode>(row: &N) -> Option<HeaderSet> {
    let cells = row.cells();
    let texts: Vec<String> = if cells.is_empty() {
        vec![row.text_content()]
    } else {
        cells.iter().map(|cell| cell.text_content()).collect()
    };

    let names: Vec<String> = texts
        .iter()
        .flat_map(|text| text.lines())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    HeaderSet::new(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_document;
    use scraper::Html;

    #[test]
    fn test_parse_simple_table() {
        let doc = parse_document(
            r#"<table>
            <thead><tr>
              <th>City</th>
              <th>State</th>
            </tr></thead>
            <tbody>
              <tr><td> Troy </td><td>OH</td></tr>
              <tr><td>Dayton</td><td>OH</td></tr>
            </tbody>
            </table>"#,
        );

        let records = parse_table(Some(&doc)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("City"), Some("Troy"));
        assert_eq!(records[0].get("State"), Some("OH"));
        assert_eq!(records[1].get("City"), Some("Dayton"));
    }

    #[test]
    fn test_header_split_on_line_breaks() {
        let doc = parse_document(
            "<table><tr><td>Date / Time\nCity\nState</td></tr><tr><td>1</td><td>2</td><td>3</td></tr></table>",
        );
        let records = parse_table(Some(&doc)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Date / Time"), Some("1"));
        assert_eq!(records[0].get("State"), Some("3"));
    }

    #[test]
    fn test_mismatched_rows_are_skipped() {
        let doc = parse_document(
            r#"<table>
            <tr><th>City</th><th>State</th><th>Shape</th></tr>
            <tr><td>Troy</td><td>OH</td><td>Disk</td></tr>
            <tr><td>Short</td><td>row</td></tr>
            <tr><td>Too</td><td>many</td><td>cells</td><td>here</td></tr>
            <tr><td>Dayton</td><td>OH</td><td>Light</td></tr>
            </table>"#,
        );

        let records = parse_table(Some(&doc)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("City"), Some("Troy"));
        assert_eq!(records[1].get("City"), Some("Dayton"));
    }

    #[test]
    fn test_record_arity_always_matches_header() {
        let doc = parse_document(
            r#"<table>
            <tr><th>A</th><th>B</th></tr>
            <tr><td>1</td></tr>
            <tr><td>1</td><td>2</td></tr>
            <tr><td>1</td><td>2</td><td>3</td></tr>
            <tr></tr>
            </table>"#,
        );

        let records = parse_table(Some(&doc)).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records.iter().all(|r| r.field_count() == 2));
    }

    #[test]
    fn test_missing_table_is_none() {
        let doc = parse_document("<html><body><p>No reports</p></body></html>");
        assert!(parse_table(Some(&doc)).is_none());
        assert!(parse_table::<Html>(None).is_none());
    }

    #[test]
    fn test_empty_header_is_none() {
        let doc = parse_document("<table><tr><th> </th></tr><tr><td>x</td></tr></table>");
        assert!(parse_table(Some(&doc)).is_none());
    }

    #[test]
    fn test_header_only_table_has_no_records() {
        let doc = parse_document("<table><tr><th>City</th></tr></table>");
        assert_eq!(parse_table(Some(&doc)), Some(vec![]));
    }
}
