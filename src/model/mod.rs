//! Data model for harvested reports
//!
//! # Components
//!
//! - `Identifier`: the numeric token naming an index, detail or summary page
//! - `Record`: one table row keyed by its header names, plus the enrichment field
//! - `RecordCollection`: the ordered list of `{identifier: record}` entries that is persisted

mod collection;
mod identifier;
mod record;

pub use collection::{CollectionEntry, RecordCollection};
pub use identifier::Identifier;
pub use record::{HeaderSet, Record};
