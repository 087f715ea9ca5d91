//! JSON document output
//!
//! The consolidated document is a JSON array of single-key objects,
//! indented with four spaces. It is the only handoff to the downstream
//! transform pipeline.

use crate::model::RecordCollection;
use crate::output::traits::{CollectionSink, OutputError, OutputResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the collection to a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads a previously written document back
    pub fn load(&self) -> OutputResult<RecordCollection> {
        load_collection(&self.path)
    }
}

impl CollectionSink for JsonFileSink {
    /// Writes to a sibling temporary file, then renames it over the target
    ///
    /// A crash mid-write leaves the previous document intact.
    fn persist(&self, collection: &RecordCollection) -> OutputResult<()> {
        let bytes = to_pretty_json(collection)?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, &bytes).map_err(|source| OutputError::Write {
            path: tmp_path.display().to_string(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| OutputError::Write {
            path: self.path.display().to_string(),
            source,
        })?;

        tracing::info!(
            "Saved {} records to {}",
            collection.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Serializes a collection with four-space indentation
pub fn to_pretty_json(collection: &RecordCollection) -> OutputResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    collection.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Loads a collection from a JSON document
pub fn load_collection(path: &Path) -> OutputResult<RecordCollection> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
