//! One page of the chart listing.

use serde::{Deserialize, Deserializer, Serialize};

use crate::chart::ChartRecord;

/// Records of the current page plus the total across all pages.
///
/// Missing `records` or `total` decode as empty / zero. Like chart ids, `total` may
/// arrive as a JSON string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T = ChartRecord> {
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub total: u64,
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTotal {
        Number(u64),
        Text(String),
    }

    match RawTotal::deserialize(deserializer)? {
        RawTotal::Number(n) => Ok(n),
        RawTotal::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self { records: Vec::new(), total: 0 }
    }
}

impl<T> PageResult<T> {
    #[must_use]
    pub const fn new(records: Vec<T>, total: u64) -> Self {
        Self { records, total }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
