use chartboard_core::{ChartRecord, ChartStatus, QueryParams};

/// View state published by the board driver.
///
/// `chart_list` and `total` always come from the same response; they are only
/// replaced together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    /// Parameters of the most recently issued fetch.
    pub query: QueryParams,
    pub chart_list: Vec<ChartRecord>,
    pub total: u64,
    pub busy: bool,
    /// Request id whose response produced `chart_list`/`total`.
    pub applied_request: Option<u64>,
    /// Number of fetches that have settled, successfully or not.
    pub settled: u64,
}

impl BoardState {
    #[must_use]
    pub fn new(query: QueryParams) -> Self {
        Self { query, chart_list: Vec::new(), total: 0, busy: true, applied_request: None, settled: 0 }
    }

    /// Whether any visible job is still queued or generating.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.chart_list
            .iter()
            .any(|record| record.status().is_ok_and(|status| !status.is_terminal()))
    }

    #[must_use]
    pub fn page_count(&self) -> u64 {
        self.query.page_count(self.total)
    }

    pub(crate) fn count_status(&self, status: ChartStatus) -> usize {
        self.chart_list.iter().filter(|record| record.status == status.code()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient, non-blocking user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}
