use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-format numeric token naming a page on the report site
///
/// Identifiers carry no uniqueness guarantee: a page that re-lists a report
/// yields the same identifier again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}
