/// Outcome of processing one detail page
use crate::model::{Identifier, Record};
use std::fmt;

/// What a detail page yielded before enrichment
///
/// Only `Records` contributes entries to the collection. Every other variant
/// leaves the collection exactly as it was before the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Rows paired positionally with their summary identifiers
    Records(Vec<(Identifier, Record)>),

    /// Number of row links and number of parsed rows disagree
    Mismatch { identifiers: usize, records: usize },

    /// The page had no parsable table
    ParseFailure,

    /// The page could not be fetched
    FetchFailed,
}

impl PageOutcome {
    /// Pairs extracted identifiers with parsed records
    ///
    /// Row order must equal identifier order; any difference in length means
    /// the page is malformed and no pairing is attempted.
    pub fn pair(identifiers: Vec<Identifier>, records: Option<Vec<Record>>) -> Self {
        let Some(records) = records else {
            return Self::ParseFailure;
        };

        if identifiers.len() != records.len() {
            return Self::Mismatch {
                identifiers: identifiers.len(),
                records: records.len(),
            };
        }

        Self::Records(identifiers.into_iter().zip(records).collect())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Records(_) => "records",
            Self::Mismatch { .. } => "mismatch",
            Self::ParseFailure => "parse_failure",
            Self::FetchFailed => "fetch_failed",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
