//! Runtime settings: environment first, command-line flags on top.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chartboard_client::{ChartClient, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT};
use chartboard_core::constants::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE};
use chartboard_core::{Identity, QueryParams, env_non_empty, env_parse_with_default};

use crate::GlobalArgs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub api_url: String,
    pub session: Option<String>,
    pub avatar_url: Option<String>,
    pub page_size: NonZeroU32,
    pub timeout: Duration,
    pub max_retries: usize,
}

impl Settings {
    pub(crate) fn from_env() -> Self {
        let page_size = env_parse_with_default("CHARTBOARD_PAGE_SIZE", DEFAULT_PAGE_SIZE);
        Self {
            api_url: env_non_empty("CHARTBOARD_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
            session: env_non_empty("CHARTBOARD_SESSION"),
            avatar_url: env_non_empty("CHARTBOARD_AVATAR_URL"),
            page_size: positive_page_size(page_size),
            timeout: Duration::from_secs(env_parse_with_default(
                "CHARTBOARD_TIMEOUT_SECS",
                DEFAULT_TIMEOUT.as_secs(),
            )),
            max_retries: env_parse_with_default("CHARTBOARD_MAX_RETRIES", DEFAULT_MAX_RETRIES),
        }
    }

    #[must_use]
    pub(crate) fn with_args(mut self, args: &GlobalArgs) -> Self {
        if let Some(url) = &args.api_url {
            self.api_url.clone_from(url);
        }
        if args.session.is_some() {
            self.session.clone_from(&args.session);
        }
        if args.avatar_url.is_some() {
            self.avatar_url.clone_from(&args.avatar_url);
        }
        if let Some(secs) = args.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = args.max_retries {
            self.max_retries = retries;
        }
        self
    }

    pub(crate) fn client(&self) -> Result<Arc<ChartClient>> {
        let client = ChartClient::new(&self.api_url, self.timeout)?
            .with_session(self.session.clone())
            .with_retry_policy(self.max_retries, DEFAULT_RETRY_DELAY);
        Ok(Arc::new(client))
    }

    /// What a name search resets to.
    pub(crate) fn default_params(&self) -> QueryParams {
        QueryParams::with_page_size(self.page_size)
    }

    pub(crate) fn identity(&self) -> Identity {
        Identity { avatar_url: self.avatar_url.clone() }
    }
}

fn positive_page_size(page_size: u32) -> NonZeroU32 {
    NonZeroU32::new(page_size).unwrap_or_else(|| {
        tracing::warn!(default = DEFAULT_PAGE_SIZE, "CHARTBOARD_PAGE_SIZE must be positive, using default");
        NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Settings {
        Settings {
            api_url: DEFAULT_API_URL.to_owned(),
            session: None,
            avatar_url: None,
            page_size: NonZeroU32::new(4).unwrap(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    #[test]
    fn test_args_override_env() {
        let args = GlobalArgs {
            api_url: Some("http://bi.example:9000".to_owned()),
            session: Some("SESSION=1".to_owned()),
            avatar_url: None,
            timeout_secs: Some(3),
            max_retries: Some(0),
        };
        let settings = base().with_args(&args);
        assert_eq!(settings.api_url, "http://bi.example:9000");
        assert_eq!(settings.session.as_deref(), Some("SESSION=1"));
        assert_eq!(settings.avatar_url, None);
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.max_retries, 0);
    }

    #[test]
    fn test_zero_page_size_falls_back() {
        assert_eq!(positive_page_size(0).get(), DEFAULT_PAGE_SIZE);
        assert_eq!(positive_page_size(6).get(), 6);
    }

    #[test]
    fn test_default_params_use_configured_page_size() {
        let mut settings = base();
        settings.page_size = NonZeroU32::new(10).unwrap();
        let params = settings.default_params();
        assert_eq!(params.page_size.get(), 10);
        assert_eq!(params.current.get(), 1);
    }
}
