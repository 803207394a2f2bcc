//! Search, sort and pagination state sent to the chart-listing service.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD};
use crate::error::{CoreError, Result};

/// Direction of the listing sort.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascend" | "ascending" => Ok(Self::Ascending),
            "desc" | "descend" | "descending" => Ok(Self::Descending),
            other => Err(format!("invalid sort order: {other}")),
        }
    }
}

/// Query state driving the "my charts" listing.
///
/// Page and page size are `NonZeroU32`, so a request with a zero page can't be built.
/// Equality is by value: the controller only refetches when this compares unequal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub current: NonZeroU32,
    pub page_size: NonZeroU32,
    pub sort_field: String,
    pub sort_order: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            current: NonZeroU32::new(DEFAULT_PAGE).unwrap_or(NonZeroU32::MIN),
            page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
            sort_field: DEFAULT_SORT_FIELD.to_owned(),
            sort_order: SortOrder::default(),
            name: None,
        }
    }
}

impl QueryParams {
    /// Defaults with a custom page size; used as the reset point for name searches.
    #[must_use]
    pub fn with_page_size(page_size: NonZeroU32) -> Self {
        Self { page_size, ..Self::default() }
    }

    /// Build the parameters for a new name search.
    ///
    /// Everything except the name comes from `defaults`, so page goes back to 1 and
    /// sort and page size return to their configured values. A blank filter means
    /// "no filter".
    #[must_use]
    pub fn filtered(defaults: &Self, name: &str) -> Self {
        let name = name.trim();
        Self { name: (!name.is_empty()).then(|| name.to_owned()), ..defaults.clone() }
    }

    /// Move to another page, keeping name and sort untouched.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPage`] when `page` or `page_size` is zero.
    pub fn paged(&self, page: u32, page_size: u32) -> Result<Self> {
        let (Some(current), Some(size)) = (NonZeroU32::new(page), NonZeroU32::new(page_size))
        else {
            return Err(CoreError::InvalidPage { page, page_size });
        };
        Ok(Self { current, page_size: size, ..self.clone() })
    }

    /// Number of pages needed to show `total` records at the current page size.
    #[must_use]
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.page_size.get()))
    }
}
