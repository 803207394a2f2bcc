//! The query-service seam between the controller and the network.

use async_trait::async_trait;
use chartboard_core::{PageResult, QueryParams};
use serde::Deserialize;

use crate::error::ClientError;

/// Response of a successful listing call.
///
/// `data` is optional on the wire; an absent payload is a retrieval failure that the
/// caller reports, not something the client decides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListResponse {
    pub data: Option<PageResult>,
}

impl ListResponse {
    #[must_use]
    pub const fn with_page(page: PageResult) -> Self {
        Self { data: Some(page) }
    }
}

/// Service envelope wrapping every API response.
#[derive(Debug, Deserialize)]
pub(crate) struct BaseResponse<T> {
    #[serde(default)]
    pub code: i32,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Paginated listing of the signed-in user's charts.
#[async_trait]
pub trait ChartQueryService: Send + Sync {
    async fn list_my_charts(&self, params: &QueryParams) -> Result<ListResponse, ClientError>;
}
