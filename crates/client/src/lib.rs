//! Client for the paginated "my charts" listing service.

mod client;
mod error;
mod service;


pub use client::{
    ChartClient, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT, truncate,
};
pub use error::ClientError;
pub use service::{ChartQueryService, ListResponse};
