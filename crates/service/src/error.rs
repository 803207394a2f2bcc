//! Typed error enum for the service layer.
//!
//! Callers match on the failure mode instead of downcasting opaque errors.

use chartboard_client::ClientError;
use thiserror::Error;

/// Service-layer error for fetching and reconciling pages.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The listing call failed (transport, HTTP status, envelope code, bad body).
    #[error("{0}")]
    Retrieval(#[from] ClientError),

    /// The listing call succeeded but carried no data payload.
    #[error("response carried no data")]
    MissingData,

    /// The board driver task is gone; no more fetches will be issued.
    #[error("chart board has shut down")]
    Stopped,
}

impl ServiceError {
    /// Whether this failure should be reported as a retrieval notice.
    pub fn is_retrieval(&self) -> bool {
        matches!(self, Self::Retrieval(_) | Self::MissingData)
    }
}
