use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised by chartboard domain types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid page: page and page size must be positive (got page={page}, page_size={page_size})")]
    InvalidPage { page: u32, page_size: u32 },

    #[error("Unknown chart status: {0}")]
    UnknownStatus(i32),
}

pub type Result<T> = StdResult<T, CoreError>;
