use std::time::Duration;

use async_trait::async_trait;
use chartboard_core::constants::LIST_MY_CHARTS_PATH;
use chartboard_core::{PageResult, QueryParams};

use crate::error::ClientError;
use crate::service::{BaseResponse, ChartQueryService, ListResponse};

/// Request timeout applied when the caller doesn't configure one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Retries after the first attempt for transient failures.
pub const DEFAULT_MAX_RETRIES: usize = 2;
/// Delay before the first retry; doubles on every further attempt.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Client for the chart-listing API.
pub struct ChartClient {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) session: Option<String>,
    pub(crate) max_retries: usize,
    pub(crate) retry_delay: Duration,
}

impl std::fmt::Debug for ChartClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartClient")
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .field("session", &self.session.as_ref().map(|_| "***"))
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

impl ChartClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            session: None,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// Sends `value` as the `Cookie` header of every request.
    #[must_use]
    pub fn with_session(mut self, value: Option<String>) -> Self {
        self.session = value;
        self
    }

    /// Overrides how transient failures are retried.
    #[must_use]
    pub const fn with_retry_policy(mut self, max_retries: usize, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of the signed-in user's charts.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the API returns a non-success
    /// status or a non-zero envelope code, or the body cannot be parsed.
    pub async fn list_my_charts(&self, params: &QueryParams) -> Result<ListResponse, ClientError> {
        let url = format!("{}{LIST_MY_CHARTS_PATH}", self.base_url);
        let mut last_error: Option<ClientError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.retry_delay.saturating_mul(1 << (attempt - 1).min(4));
                tracing::warn!("chart list retry attempt {attempt}/{} after {delay:?}", self.max_retries);
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&url).json(params);
            if let Some(session) = &self.session {
                request = request.header(reqwest::header::COOKIE, session);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ClientError::HttpRequest(e));
                    continue;
                },
            };

            let status = response.status();
            if status.is_success() {
                let body = match response.text().await {
                    Ok(b) => b,
                    Err(e) => {
                        last_error = Some(ClientError::HttpRequest(e));
                        continue;
                    },
                };
                return parse_list_body(&body);
            }

            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            let err = ClientError::HttpStatus { code: status.as_u16(), body };
            if err.is_transient() {
                last_error = Some(err);
                continue;
            }
            return Err(err);
        }

        let last = last_error.unwrap_or_else(|| ClientError::ClientInit("no attempt made".to_owned()));
        if self.max_retries == 0 {
            return Err(last);
        }
        Err(ClientError::RetriesExhausted(Box::new(last)))
    }
}

#[async_trait]
impl ChartQueryService for ChartClient {
    async fn list_my_charts(&self, params: &QueryParams) -> Result<ListResponse, ClientError> {
        ChartClient::list_my_charts(self, params).await
    }
}

/// Decode the service envelope around a listing page.
pub(crate) fn parse_list_body(body: &str) -> Result<ListResponse, ClientError> {
    let envelope: BaseResponse<PageResult> =
        serde_json::from_str(body).map_err(|e| ClientError::JsonParse {
            context: format!("chart list response (body: {})", truncate(body, 200)),
            source: e,
        })?;
    if envelope.code != 0 {
        return Err(ClientError::Api {
            code: envelope.code,
            message: envelope.message.unwrap_or_else(|| "no message".to_owned()),
        });
    }
    Ok(ListResponse { data: envelope.data })
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
