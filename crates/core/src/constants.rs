//! Shared constants for chartboard.
//!
//! Centralizes defaults that both the controller and the CLI rely on.

/// Page shown when a query is first built or the name filter changes.
pub const DEFAULT_PAGE: u32 = 1;

/// Number of cards per page when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 4;

/// Field the listing is sorted by unless the caller overrides it.
pub const DEFAULT_SORT_FIELD: &str = "createTime";

/// Base URL of the chart-listing service when `CHARTBOARD_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8101";

/// Path of the "my charts" paginated listing endpoint.
pub const LIST_MY_CHARTS_PATH: &str = "/api/chart/my/list/page";

/// Placeholder shown for queued jobs that carry no execution message.
pub const QUEUE_BUSY_MESSAGE: &str =
    "The chart generation queue is busy, please wait patiently";

/// Prefix of the user-visible notice raised when a page cannot be loaded.
pub const LOAD_FAILED_NOTICE: &str = "Failed to load my charts";

/// Key of the embedded chart title removed from ready chart specs.
pub const CHART_TITLE_KEY: &str = "title";
