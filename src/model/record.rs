use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered column names taken from a table's header row
///
/// The header set fixes the arity and field names of every record parsed
/// from the same table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet(Vec<String>);

impl HeaderSet {
    /// Builds a header set, rejecting empty or duplicated names
    ///
    /// Duplicates are rejected because two columns sharing a name would
    /// collapse into a single record field.
    pub fn new(names: Vec<String>) -> Option<Self> {
        if names.is_empty() || names.iter().any(|n| n.is_empty()) {
            return None;
        }

        let mut seen = HashSet::new();
        if !names.iter().all(|n| seen.insert(n.as_str())) {
            return None;
        }

        Some(Self(names))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// One harvested table row keyed by header name
///
/// Table fields always hold a string. The enrichment field is appended after
/// creation and serializes as `null` when no summary could be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Option<String>>);

impl Record {
    /// Converts a row into a record
    ///
    /// Returns `None` unless the row has exactly one cell per header.
    pub fn from_row(headers: &HeaderSet, cells: Vec<String>) -> Option<Self> {
        if cells.len() != headers.len() {
            return None;
        }

        let fields = headers
            .names()
            .iter()
            .cloned()
            .zip(cells.into_iter().map(Some))
            .collect();

        Some(Self(fields))
    }

    /// Attaches the enrichment field as the last field of the record
    pub fn enrich(&mut self, field: &str, value: Option<String>) {
        self.0.shift_remove(field);
        self.0.insert(field.to_string(), value);
    }

    /// Returns the value of a field, or `None` when it is missing or null
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|v| v.as_deref())
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn field_count(&self) -> usize {
        self.0.len()
    }

    /// Iterates fields in header order, enrichment field last
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> HeaderSet {
        HeaderSet::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_header_set_rejects_empty_and_duplicates() {
        assert!(HeaderSet::new(vec![]).is_none());
        assert!(HeaderSet::new(vec!["City".into(), "".into()]).is_none());
        assert!(HeaderSet::new(vec!["City".into(), "City".into()]).is_none());
        assert_eq!(headers(&["City", "State"]).len(), 2);
    }

    #[test]
    fn test_from_row_matching_arity() {
        let record =
            Record::from_row(&headers(&["City", "State"]), vec!["Troy".into(), "OH".into()])
                .unwrap();
        assert_eq!(record.field_count(), 2);
        assert_eq!(record.get("City"), Some("Troy"));
        assert_eq!(record.get("State"), Some("OH"));
    }

    #[test]
    fn test_from_row_rejects_mismatched_arity() {
        let h = headers(&["City", "State", "Shape"]);
        assert!(Record::from_row(&h, vec!["Troy".into(), "OH".into()]).is_none());
        assert!(Record::from_row(
            &h,
            vec!["Troy".into(), "OH".into(), "Disk".into(), "extra".into()]
        )
        .is_none());
    }

    #[test]
    fn test_enrich_appends_last_field() {
        let mut record =
            Record::from_row(&headers(&["City", "State"]), vec!["Troy".into(), "OH".into()])
                .unwrap();
        record.enrich("Summary", Some("Bright light".into()));

        let names: Vec<&str> = record.fields().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["City", "State", "Summary"]);
        assert_eq!(record.get("Summary"), Some("Bright light"));
    }

    #[test]
    fn test_enrich_with_absent_value_serializes_null() {
        let mut record = Record::from_row(&headers(&["City"]), vec!["Troy".into()]).unwrap();
        record.enrich("Summary", None);

        assert!(record.contains_field("Summary"));
        assert_eq!(record.get("Summary"), None);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"City":"Troy","Summary":null}"#
        );
    }
}
