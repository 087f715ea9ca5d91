use crate::model::{Identifier, Record};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single `{identifier: record}` entry of the output document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEntry {
    pub identifier: Identifier,
    pub record: Record,
}

impl CollectionEntry {
    pub fn new(identifier: Identifier, record: Record) -> Self {
        Self { identifier, record }
    }
}

impl Serialize for CollectionEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.identifier, &self.record)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for CollectionEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = IndexMap::<Identifier, Record>::deserialize(deserializer)?;
        if map.len() != 1 {
            return Err(D::Error::custom(format!(
                "expected a single-key object, found {} keys",
                map.len()
            )));
        }

        map.into_iter()
            .next()
            .map(|(identifier, record)| Self { identifier, record })
            .ok_or_else(|| D::Error::custom("empty entry"))
    }
}

/// Ordered, append-only sequence of harvested entries
///
/// This is not a map: several entries may share an identifier, and a later
/// entry never replaces an earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCollection(Vec<CollectionEntry>);

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: CollectionEntry) {
        self.0.push(entry);
    }

    /// Appends every entry of a page at once
    pub fn extend(&mut self, entries: impl IntoIterator<Item = CollectionEntry>) {
        self.0.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> &[CollectionEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CollectionEntry> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a CollectionEntry;
    type IntoIter = std::slice::Iter<'a, CollectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
