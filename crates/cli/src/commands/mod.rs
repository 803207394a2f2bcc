pub(crate) mod list;
pub(crate) mod watch;

use anyhow::Result;
use chartboard_core::QueryParams;

use crate::config::Settings;

/// First query of a session: optional name search, then the requested page.
pub(crate) fn initial_params(
    settings: &Settings,
    name: Option<&str>,
    page: u32,
    page_size: Option<u32>,
) -> Result<QueryParams> {
    let defaults = settings.default_params();
    let size = page_size.unwrap_or(defaults.page_size.get());
    Ok(QueryParams::filtered(&defaults, name.unwrap_or("")).paged(page, size)?)
}
