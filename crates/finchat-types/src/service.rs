//! Advisory service catalog types.
//!
//! A `ServiceRecord` is one entry of the static catalog the matcher ranks
//! user questions against. Records are created once at catalog load and
//! never mutated.

use serde::{Deserialize, Serialize};

/// One advisory service offered by the firm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub name: String,
    pub summary: String,
    /// Ordered keyword list; matched as case-insensitive substrings of the query.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ServiceRecord {
    pub fn new(
        name: impl Into<String>,
        summary: impl Into<String>,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}
